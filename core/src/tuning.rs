//! Tuning knobs for every per-tick constant used by the simulation.
//!
//! All quantities are expressed per tick; the frame driver issues one tick per
//! display refresh, so the defaults assume roughly sixty ticks per second.
//! Every struct deserialises with `#[serde(default)]`, letting a partial
//! configuration file override only the values it names.

use serde::Deserialize;

/// Inclusive-exclusive sampling range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct TuningRange<T> {
    /// Lower bound of the range.
    pub min: T,
    /// Upper bound of the range.
    pub max: T,
}

impl<T> TuningRange<T> {
    /// Creates a new range.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> TuningRange<T> {
    /// Reports whether the range contains no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.min < self.max)
    }
}

/// Aggregated tuning surface for a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Controls building and road generation.
    pub city: CityTuning,
    /// Controls NPC generation and wandering.
    pub population: PopulationTuning,
    /// Controls player size and modal speeds.
    pub player: PlayerTuning,
    /// Controls contact damage and mission capture.
    pub contact: ContactTuning,
    /// Controls the on-screen directional control.
    pub joystick: JoystickTuning,
}

/// City layout parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CityTuning {
    /// Number of buildings generated per session.
    pub building_count: u32,
    /// Generation index of the building designated as the mission target.
    pub target_index: u32,
    /// Width range of generated buildings.
    pub building_width: TuningRange<f32>,
    /// Height range of generated buildings.
    pub building_height: TuningRange<f32>,
    /// Range each colour channel of a regular building is drawn from.
    pub building_channel: TuningRange<u8>,
    /// Number of vertical and of horizontal road bands.
    pub road_bands: u32,
    /// Thickness of each road band.
    pub road_thickness: f32,
}

impl Default for CityTuning {
    fn default() -> Self {
        Self {
            building_count: 20,
            target_index: 5,
            building_width: TuningRange::new(50.0, 150.0),
            building_height: TuningRange::new(50.0, 200.0),
            building_channel: TuningRange::new(100, 255),
            road_bands: 5,
            road_thickness: 60.0,
        }
    }
}

/// NPC population parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PopulationTuning {
    /// Number of NPCs generated per session.
    pub count: u32,
    /// Body radius shared by every NPC.
    pub radius: f32,
    /// Range each NPC's walking speed is drawn from.
    pub speed: TuningRange<f32>,
    /// Range of ticks between heading changes.
    pub turn_interval: TuningRange<u32>,
}

impl Default for PopulationTuning {
    fn default() -> Self {
        Self {
            count: 10,
            radius: 15.0,
            speed: TuningRange::new(1.0, 2.0),
            turn_interval: TuningRange::new(60, 180),
        }
    }
}

/// Player body and speed parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Body radius of the player.
    pub radius: f32,
    /// Speed while walking.
    pub walk_speed: f32,
    /// Speed while running.
    pub run_speed: f32,
    /// Ceiling for the vehicle throttle.
    pub max_vehicle_speed: f32,
    /// Throttle change applied per accelerate or brake press.
    pub throttle_step: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            walk_speed: 3.0,
            run_speed: 5.0,
            max_vehicle_speed: 8.0,
            throttle_step: 1.0,
        }
    }
}

/// Contact damage and mission capture parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactTuning {
    /// Health removed per overlapping NPC per tick.
    pub damage_per_npc: f32,
    /// Distance from the mission target that counts as arrival.
    pub capture_radius: f32,
    /// Health restored when the mission completes.
    pub mission_bonus: f32,
}

impl Default for ContactTuning {
    fn default() -> Self {
        Self {
            damage_per_npc: 0.5,
            capture_radius: 50.0,
            mission_bonus: 30.0,
        }
    }
}

/// Directional control parameters expressed in the control's own pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct JoystickTuning {
    /// Deflection at or below which the control reports no input.
    pub deadzone: f32,
    /// Maximum knob travel from the control centre.
    pub travel: f32,
}

impl Default for JoystickTuning {
    fn default() -> Self {
        Self {
            deadzone: 10.0,
            travel: 50.0,
        }
    }
}
