#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Metro Dash engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that HUD
//! observers and tests react to. Systems receive plain values and return new
//! values; none of them hold global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

mod tuning;

pub use tuning::{
    CityTuning, ContactTuning, GameTuning, JoystickTuning, PlayerTuning, PopulationTuning,
    TuningRange,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Metro Dash.";

/// Human readable description of the single mission offered per session.
pub const MISSION_DESCRIPTION: &str = "Find the red building";

/// Status text pushed to the HUD once the mission is completed.
pub const MISSION_COMPLETE_STATUS: &str = "Mission Complete!";

/// Colour applied to the designated mission target building.
pub const TARGET_BUILDING_COLOR: RgbColor = RgbColor::from_rgb(0xff, 0x00, 0x00);

/// Colour applied to every road band.
pub const ROAD_COLOR: RgbColor = RgbColor::from_rgb(0x33, 0x33, 0x33);

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Replaces the directional input consumed by subsequent ticks.
    SetDirectionalInput {
        /// Latest sample reported by the input adapter.
        input: DirectionalInput,
    },
    /// Advances the simulation by one discrete tick.
    Tick,
    /// Flips the running mode.
    ToggleRunning,
    /// Flips the driving mode.
    ToggleDriving,
    /// Raises the vehicle speed by one step while driving.
    Accelerate,
    /// Lowers the vehicle speed by one step while driving.
    Brake,
    /// Flips the ambient lighting flag used when drawing windows.
    ToggleLights,
    /// Updates the bounds every subsequent tick clamps against.
    ResizeViewport {
        /// New viewport dimensions.
        viewport: Viewport,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced by one tick.
    TimeAdvanced {
        /// Index of the tick that just completed, starting at one.
        tick: u64,
    },
    /// Reports the new health value after it changed.
    HealthChanged {
        /// Health after the change.
        health: Health,
    },
    /// Announces that the mission was completed. Emitted at most once.
    MissionCompleted {
        /// Status text intended for the HUD.
        status: &'static str,
    },
    /// Announces that one of the mode toggles flipped.
    ModeChanged {
        /// Toggle that changed.
        toggle: ModeToggle,
        /// State of the toggle after the change.
        active: bool,
    },
    /// Reports the vehicle throttle after it changed.
    VehicleSpeedChanged {
        /// Vehicle speed after the change.
        speed: f32,
    },
    /// Confirms that the viewport bounds changed.
    ViewportResized {
        /// Viewport dimensions now in effect.
        viewport: Viewport,
    },
}

/// Independent boolean toggles driven by external button presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeToggle {
    /// Elevated on-foot speed.
    Running,
    /// Vehicle mode with throttle-controlled speed.
    Driving,
    /// Ambient lighting used when drawing building windows.
    Lights,
}

/// Dimensions of the playable area measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport descriptor. Negative dimensions collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Horizontal extent of the viewport.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the viewport.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Geometric centre of the viewport.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Clamps a circle centre so the circle stays within the viewport.
    ///
    /// Each axis is limited to `[radius, extent - radius]`. When the viewport
    /// is narrower than the circle the lower bound wins, mirroring a
    /// `max(radius, min(extent - radius, value))` evaluation.
    #[must_use]
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(center.x, radius, self.width),
            clamp_axis(center.y, radius, self.height),
        )
    }

    /// Reports whether a circle lies within the clamp bounds.
    #[must_use]
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        self.clamp_circle(center, radius) == center
    }
}

fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    radius.max(value.min(extent - radius))
}

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    origin: Vec2,
    size: Vec2,
}

impl WorldRect {
    /// Constructs a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width and height of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Geometric centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Circle used for proximity checks between actors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Centre of the circle.
    pub center: Vec2,
    /// Radius of the circle.
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Reports whether the two circles overlap. Touching circles do not.
    #[must_use]
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }
}

/// Opaque display colour expressed as byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to a building, equal to its generation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(u32);

impl BuildingId {
    /// Creates a new building identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an NPC, equal to its generation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Static building placed by the city generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    id: BuildingId,
    rect: WorldRect,
    color: RgbColor,
    is_target: bool,
}

impl Building {
    /// Creates a building descriptor.
    #[must_use]
    pub const fn new(id: BuildingId, rect: WorldRect, color: RgbColor, is_target: bool) -> Self {
        Self {
            id,
            rect,
            color,
            is_target,
        }
    }

    /// Identifier of the building.
    #[must_use]
    pub const fn id(&self) -> BuildingId {
        self.id
    }

    /// Footprint of the building.
    #[must_use]
    pub const fn rect(&self) -> WorldRect {
        self.rect
    }

    /// Display colour of the building.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }

    /// Whether the building is the mission target.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        self.is_target
    }
}

/// Road band drawn underneath buildings. Roads carry no collision semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Road {
    rect: WorldRect,
    color: RgbColor,
}

impl Road {
    /// Creates a road descriptor.
    #[must_use]
    pub const fn new(rect: WorldRect, color: RgbColor) -> Self {
        Self { rect, color }
    }

    /// Footprint of the road band.
    #[must_use]
    pub const fn rect(&self) -> WorldRect {
        self.rect
    }

    /// Display colour of the road band.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }
}

/// Player health, always within `[Health::MIN, Health::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Health(f32);

impl Health {
    /// Lowest representable health.
    pub const MIN: f32 = 0.0;
    /// Highest representable health.
    pub const MAX: f32 = 100.0;

    /// Creates a health value clamped to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Health at the start of a session.
    #[must_use]
    pub const fn full() -> Self {
        Self(Self::MAX)
    }

    /// Raw health value.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }

    /// Health reduced by `amount`, floored at [`Health::MIN`].
    #[must_use]
    pub fn damaged(self, amount: f32) -> Self {
        Self::new(self.0 - amount)
    }

    /// Health raised by `amount`, capped at [`Health::MAX`].
    #[must_use]
    pub fn restored(self, amount: f32) -> Self {
        Self::new(self.0 + amount)
    }

    /// Health expressed as a fraction of [`Health::MAX`].
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.0 / Self::MAX
    }

    /// Three-tier classification used by the HUD health bar.
    #[must_use]
    pub fn tier(&self) -> HealthTier {
        if self.0 > 50.0 {
            HealthTier::Healthy
        } else if self.0 > 20.0 {
            HealthTier::Wounded
        } else {
            HealthTier::Critical
        }
    }
}

/// Coarse health classification rendered as the health bar colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthTier {
    /// Strictly above half health.
    Healthy,
    /// Above twenty and at most fifty.
    Wounded,
    /// Twenty or below.
    Critical,
}

/// Sample produced by the input adapter.
///
/// `heading` is meaningful only while `active` is set.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DirectionalInput {
    /// Whether the control is currently deflected beyond its deadzone.
    pub active: bool,
    /// Requested direction of travel in radians.
    pub heading: f32,
}

impl DirectionalInput {
    /// Sample reported while the control is released or inside the deadzone.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            active: false,
            heading: 0.0,
        }
    }

    /// Sample requesting travel along `heading`.
    #[must_use]
    pub const fn toward(heading: f32) -> Self {
        Self {
            active: true,
            heading,
        }
    }
}

/// Immutable representation of a single NPC used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NpcSnapshot {
    /// Identifier assigned to the NPC.
    pub id: NpcId,
    /// Centre of the NPC.
    pub position: Vec2,
    /// Radius of the NPC body.
    pub radius: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Current heading in radians.
    pub heading: f32,
    /// Ticks remaining before the next heading change.
    pub turn_countdown: u32,
}

impl NpcSnapshot {
    /// Body of the NPC used for contact checks.
    #[must_use]
    pub const fn body(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Centre of the player.
    pub position: Vec2,
    /// Radius of the player body.
    pub radius: f32,
    /// Distance travelled per tick while moving.
    pub speed: f32,
    /// Current heading in radians.
    pub heading: f32,
    /// Whether the player receives directional input.
    pub moving: bool,
}

impl PlayerSnapshot {
    /// Body of the player used for contact checks.
    #[must_use]
    pub const fn body(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Immutable representation of the mission used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissionSnapshot {
    /// Point the player must reach.
    pub target: Vec2,
    /// Human readable mission description.
    pub description: &'static str,
    /// Whether the mission has been completed.
    pub completed: bool,
    /// Building the target point was derived from.
    pub target_building: Option<BuildingId>,
}

/// Immutable representation of the mode toggles used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeSnapshot {
    /// Whether running mode is enabled.
    pub running: bool,
    /// Whether driving mode is enabled.
    pub driving: bool,
    /// Whether ambient lighting is enabled.
    pub lights: bool,
    /// Current vehicle throttle.
    pub vehicle_speed: f32,
}
