#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mode and throttle state machine driven by discrete button presses.
//!
//! Running, driving and lights are independent boolean toggles. The vehicle
//! throttle is only adjustable while driving and is reset whenever driving is
//! switched off. Speed changes are instantaneous.

use metro_dash_core::{Event, ModeSnapshot, ModeToggle, PlayerTuning};

/// Named transitions accepted by [`Controls::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Flips running mode.
    ToggleRunning,
    /// Flips driving mode.
    ToggleDriving,
    /// Raises the vehicle throttle by one step.
    Accelerate,
    /// Lowers the vehicle throttle by one step.
    Brake,
    /// Flips ambient lighting.
    ToggleLights,
}

/// Current mode flags and throttle.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    running: bool,
    driving: bool,
    lights: bool,
    vehicle_speed: f32,
    walk_speed: f32,
    run_speed: f32,
    max_vehicle_speed: f32,
    throttle_step: f32,
}

impl Controls {
    /// Creates controls with every toggle off and the throttle at rest.
    #[must_use]
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            running: false,
            driving: false,
            lights: false,
            vehicle_speed: 0.0,
            walk_speed: tuning.walk_speed,
            run_speed: tuning.run_speed,
            max_vehicle_speed: tuning.max_vehicle_speed.max(0.0),
            throttle_step: tuning.throttle_step,
        }
    }

    /// Speed the player moves at under the current mode.
    #[must_use]
    pub fn player_speed(&self) -> f32 {
        if self.driving {
            self.vehicle_speed
        } else if self.running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    /// Whether the throttle controls should be shown.
    #[must_use]
    pub const fn throttle_visible(&self) -> bool {
        self.driving
    }

    /// Captures the current toggle state.
    #[must_use]
    pub const fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            running: self.running,
            driving: self.driving,
            lights: self.lights,
            vehicle_speed: self.vehicle_speed,
        }
    }

    /// Applies a transition, appending an event for every value that changed.
    pub fn apply(&mut self, transition: Transition, out_events: &mut Vec<Event>) {
        match transition {
            Transition::ToggleRunning => {
                self.running = !self.running;
                out_events.push(Event::ModeChanged {
                    toggle: ModeToggle::Running,
                    active: self.running,
                });
            }
            Transition::ToggleDriving => {
                self.driving = !self.driving;
                out_events.push(Event::ModeChanged {
                    toggle: ModeToggle::Driving,
                    active: self.driving,
                });
                if !self.driving {
                    self.set_vehicle_speed(0.0, out_events);
                }
            }
            Transition::Accelerate => {
                if self.driving {
                    let speed = (self.vehicle_speed + self.throttle_step).min(self.max_vehicle_speed);
                    self.set_vehicle_speed(speed, out_events);
                }
            }
            Transition::Brake => {
                if self.driving {
                    let speed = (self.vehicle_speed - self.throttle_step).max(0.0);
                    self.set_vehicle_speed(speed, out_events);
                }
            }
            Transition::ToggleLights => {
                self.lights = !self.lights;
                out_events.push(Event::ModeChanged {
                    toggle: ModeToggle::Lights,
                    active: self.lights,
                });
            }
        }
    }

    fn set_vehicle_speed(&mut self, speed: f32, out_events: &mut Vec<Event>) {
        let speed = speed.clamp(0.0, self.max_vehicle_speed);
        if speed != self.vehicle_speed {
            self.vehicle_speed = speed;
            out_events.push(Event::VehicleSpeedChanged { speed });
        }
    }
}
