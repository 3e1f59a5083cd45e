use glam::Vec2;
use metro_dash_core::{DirectionalInput, JoystickTuning};

/// On-screen analogue stick translating pointer drags into headings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualJoystick {
    deadzone: f32,
    travel: f32,
}

/// Result of deflecting the joystick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickState {
    /// Knob offset from the joystick centre after clamping to the travel radius.
    pub knob: Vec2,
    /// Directional sample to forward to the simulation.
    pub input: DirectionalInput,
}

impl VirtualJoystick {
    /// Creates a joystick from tuning values.
    #[must_use]
    pub fn new(tuning: &JoystickTuning) -> Self {
        Self {
            deadzone: tuning.deadzone.max(0.0),
            travel: tuning.travel.max(0.0),
        }
    }

    /// Maximum knob travel from the centre.
    #[must_use]
    pub const fn travel(&self) -> f32 {
        self.travel
    }

    /// Resolves a pointer offset relative to the joystick centre.
    ///
    /// Offsets at or inside the deadzone report an idle input while the knob
    /// still follows the pointer.
    #[must_use]
    pub fn deflect(&self, offset: Vec2) -> JoystickState {
        let knob = offset.clamp_length_max(self.travel);
        let input = if offset.length() > self.deadzone {
            DirectionalInput::toward(offset.y.atan2(offset.x))
        } else {
            DirectionalInput::idle()
        };
        JoystickState { knob, input }
    }

    /// State reported while nothing touches the joystick.
    #[must_use]
    pub fn released(&self) -> JoystickState {
        JoystickState {
            knob: Vec2::ZERO,
            input: DirectionalInput::idle(),
        }
    }
}
