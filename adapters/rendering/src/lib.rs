#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Metro Dash adapters.
//!
//! Backends receive a [`Presentation`] once and then drive the frame loop,
//! handing every frame's [`FrameInput`] to an update closure that advances the
//! simulation and refreshes the [`Scene`] before it is drawn. Scenes only ever
//! describe the current frame; backends never read simulation state directly.

mod hud;
mod joystick;
mod windows;

pub use hud::{dispatch_events, HealthBar, HudObserver, HudPresentation};
pub use joystick::{JoystickState, VirtualJoystick};
pub use windows::{WindowPattern, WINDOW_INSET, WINDOW_SIZE, WINDOW_SPACING};

use anyhow::Result as AnyResult;
use glam::Vec2;
use metro_dash_core::{DirectionalInput, RgbColor, Viewport, WorldRect};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl From<RgbColor> for Color {
    fn from(color: RgbColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Fixed palette used by the scene builder.
pub mod palette {
    use super::Color;

    /// Background cleared before every frame.
    pub const GROUND: Color = Color::from_rgb_u8(0x1f, 0x29, 0x37);
    /// Fill of the player body.
    pub const PLAYER: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
    /// Fill of every NPC body.
    pub const NPC: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
    /// Translucent marker over the mission target.
    pub const MISSION_MARKER: Color = Color::new(1.0, 0.0, 0.0, 0.5);
    /// Window fill while the lights are on.
    pub const WINDOW_LIT: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);
    /// Window fill while the lights are off.
    pub const WINDOW_DARK: Color = Color::from_rgb_u8(0x33, 0x33, 0x33);
    /// Health bar fill above half health.
    pub const HEALTH_HEALTHY: Color = Color::from_rgb_u8(0x22, 0xc5, 0x5e);
    /// Health bar fill between the critical and healthy thresholds.
    pub const HEALTH_WOUNDED: Color = Color::from_rgb_u8(0xea, 0xb3, 0x08);
    /// Health bar fill at or below the critical threshold.
    pub const HEALTH_CRITICAL: Color = Color::from_rgb_u8(0xef, 0x44, 0x44);
}

/// Discrete button presses gathered by the adapter during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Run button pressed.
    ToggleRunning,
    /// Drive button pressed.
    ToggleDriving,
    /// Lights button pressed.
    ToggleLights,
    /// Gas button pressed.
    Accelerate,
    /// Brake button pressed.
    Brake,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Size of the drawable area observed this frame.
    pub viewport: Viewport,
    /// Directional control sample for this frame.
    pub directional: DirectionalInput,
    /// Button presses observed since the previous frame, in press order.
    pub actions: Vec<ControlAction>,
}

impl FrameInput {
    /// Creates an input snapshot with no presses and an idle directional control.
    #[must_use]
    pub fn idle(viewport: Viewport) -> Self {
        Self {
            viewport,
            directional: DirectionalInput::idle(),
            actions: Vec::new(),
        }
    }
}

/// Filled rectangle drawn beneath the actors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectPresentation {
    /// Footprint of the rectangle in world units.
    pub rect: WorldRect,
    /// Fill color.
    pub color: Color,
}

impl RectPresentation {
    /// Creates a new rectangle descriptor.
    #[must_use]
    pub const fn new(rect: WorldRect, color: Color) -> Self {
        Self { rect, color }
    }
}

/// Building drawn with a grid of windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingPresentation {
    /// Body of the building.
    pub body: RectPresentation,
    /// Which window cells are drawn.
    pub windows: WindowPattern,
}

/// Circular actor drawn as a filled disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Centre of the actor in world units.
    pub center: Vec2,
    /// Radius of the actor in world units.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

impl ActorPresentation {
    /// Creates a new actor descriptor.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Scene description combining the city, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Bounds of the simulated area.
    pub viewport: Viewport,
    /// Road bands drawn first.
    pub roads: Vec<RectPresentation>,
    /// Buildings drawn over the roads.
    pub buildings: Vec<BuildingPresentation>,
    /// Whether windows are drawn lit.
    pub lights_on: bool,
    /// NPCs drawn over the buildings.
    pub npcs: Vec<ActorPresentation>,
    /// Player drawn over the NPCs.
    pub player: ActorPresentation,
    /// Marker over the mission target while the mission is pending.
    pub mission_marker: Option<ActorPresentation>,
    /// HUD state drawn last.
    pub hud: HudPresentation,
}

impl Scene {
    /// Fill used for every window under the current lighting.
    #[must_use]
    pub fn window_color(&self) -> Color {
        if self.lights_on {
            palette::WINDOW_LIT
        } else {
            palette::WINDOW_DARK
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Metro Dash scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure is invoked exactly once per
    /// displayed frame with the input captured by the adapter, and may mutate
    /// the scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The window must have a positive area.
    InvalidWindowSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowSize { width, height } => {
                write!(
                    f,
                    "window size must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

/// Validated initial window size requested from the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSize {
    width: f32,
    height: f32,
}

impl WindowSize {
    /// Creates a window size, rejecting empty or non-finite dimensions.
    pub fn new(width: f32, height: f32) -> std::result::Result<Self, RenderingError> {
        let valid = |value: f32| value.is_finite() && value >= 1.0;
        if !valid(width) || !valid(height) {
            return Err(RenderingError::InvalidWindowSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Viewport matching the window.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro_dash_core::Health;

    fn scene(lights_on: bool) -> Scene {
        Scene {
            viewport: Viewport::new(100.0, 100.0),
            roads: Vec::new(),
            buildings: Vec::new(),
            lights_on,
            npcs: Vec::new(),
            player: ActorPresentation::new(Vec2::splat(50.0), 20.0, palette::PLAYER),
            mission_marker: None,
            hud: HudPresentation::new(Health::full(), "Find the red building"),
        }
    }

    #[test]
    fn window_color_follows_lighting() {
        assert_eq!(scene(true).window_color(), palette::WINDOW_LIT);
        assert_eq!(scene(false).window_color(), palette::WINDOW_DARK);
    }

    #[test]
    fn rgb_conversion_normalises_channels() {
        let color = Color::from(RgbColor::from_rgb(255, 0, 51));
        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn window_size_rejects_empty_dimensions() {
        let error = WindowSize::new(0.0, 600.0).expect_err("zero width must be rejected");
        assert_eq!(
            error,
            RenderingError::InvalidWindowSize {
                width: 0.0,
                height: 600.0,
            }
        );
        assert!(WindowSize::new(f32::NAN, 600.0).is_err());
    }

    #[test]
    fn window_size_maps_to_viewport() {
        let size = WindowSize::new(1_280.0, 720.0).expect("valid size");
        assert_eq!(size.viewport(), Viewport::new(1_280.0, 720.0));
    }
}
