#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Metro Dash.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the crate depends on macroquad without its default `audio` feature.
//!
//! Scenes are drawn in screen space: the simulated viewport always matches the
//! window, and the window size is reported back through [`FrameInput`] every
//! frame. Touch input reaches the joystick through macroquad's mouse
//! emulation.

mod ui;

use self::ui::{draw_action_panel_ui, draw_mission_label, ActionPanelUiContext};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position,
    KeyCode, MouseButton,
};
use macroquad::math::Vec2 as MacroquadVec2;
use metro_dash_core::{DirectionalInput, JoystickTuning, Viewport};
use metro_dash_rendering::{
    ActorPresentation, BuildingPresentation, Color, ControlAction, FrameInput, HudPresentation,
    JoystickState, Presentation, RectPresentation, RenderingBackend, Scene, VirtualJoystick,
};
use std::{collections::VecDeque, time::Duration};

const HUD_MARGIN: f32 = 20.0;
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(200.0, 20.0);
const KNOB_RADIUS: f32 = 30.0;
const JOYSTICK_RIM: f32 = 10.0;
const ACTION_PANEL_SIZE: Vec2 = Vec2::new(160.0, 250.0);

/// Tracks UI-sourced presses so they can be merged with keyboard input on the next frame.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct ControlPanelInputState {
    latched: Vec<ControlAction>,
}

impl ControlPanelInputState {
    /// Records that a button requested `action`. Repeated presses of the same
    /// button before the next frame collapse into one.
    pub fn register(&mut self, action: ControlAction) {
        if !self.latched.contains(&action) {
            self.latched.push(action);
        }
    }

    /// Returns the latched presses in press order and clears the latch so each
    /// press fires once.
    pub fn take_actions(&mut self) -> Vec<ControlAction> {
        std::mem::take(&mut self.latched)
    }
}

/// Snapshot of keyboard state observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct KeyboardState {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// Held direction keys (WASD or arrows) as an unnormalised vector.
    direction: Vec2,
    /// `R` toggles running.
    toggle_running: bool,
    /// `C` toggles driving.
    toggle_driving: bool,
    /// `L` toggles the lights.
    toggle_lights: bool,
    /// `E` accelerates.
    accelerate: bool,
    /// `B` brakes.
    brake: bool,
}

impl KeyboardState {
    fn poll() -> Self {
        let held = |keys: [KeyCode; 2]| keys.into_iter().any(is_key_down);
        let mut direction = Vec2::ZERO;
        if held([KeyCode::A, KeyCode::Left]) {
            direction.x -= 1.0;
        }
        if held([KeyCode::D, KeyCode::Right]) {
            direction.x += 1.0;
        }
        if held([KeyCode::W, KeyCode::Up]) {
            direction.y -= 1.0;
        }
        if held([KeyCode::S, KeyCode::Down]) {
            direction.y += 1.0;
        }

        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            direction,
            toggle_running: is_key_pressed(KeyCode::R),
            toggle_driving: is_key_pressed(KeyCode::C),
            toggle_lights: is_key_pressed(KeyCode::L),
            accelerate: is_key_pressed(KeyCode::E),
            brake: is_key_pressed(KeyCode::B),
        }
    }

    fn directional(&self) -> DirectionalInput {
        if self.direction == Vec2::ZERO {
            DirectionalInput::idle()
        } else {
            DirectionalInput::toward(self.direction.y.atan2(self.direction.x))
        }
    }

    fn actions(&self) -> impl Iterator<Item = ControlAction> {
        [
            (self.toggle_running, ControlAction::ToggleRunning),
            (self.toggle_driving, ControlAction::ToggleDriving),
            (self.toggle_lights, ControlAction::ToggleLights),
            (self.accelerate, ControlAction::Accelerate),
            (self.brake, ControlAction::Brake),
        ]
        .into_iter()
        .filter_map(|(pressed, action)| pressed.then_some(action))
    }
}

/// Pointer observation for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PointerState {
    position: Vec2,
    pressed: bool,
    down: bool,
}

impl PointerState {
    fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            position: Vec2::new(x, y),
            pressed: is_mouse_button_pressed(MouseButton::Left),
            down: is_mouse_button_down(MouseButton::Left),
        }
    }
}

/// Drag state of the on-screen joystick.
///
/// A drag starts when the pointer is pressed inside the joystick base and
/// follows the pointer anywhere on screen until it is released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct JoystickDrag {
    engaged: bool,
}

impl JoystickDrag {
    fn update(
        &mut self,
        pointer: PointerState,
        layout: &HudLayout,
        joystick: &VirtualJoystick,
    ) -> JoystickState {
        if pointer.pressed && pointer.position.distance(layout.joystick_center) <= layout.joystick_radius
        {
            self.engaged = true;
        }
        if !pointer.down {
            self.engaged = false;
        }

        if self.engaged {
            joystick.deflect(pointer.position - layout.joystick_center)
        } else {
            joystick.released()
        }
    }
}

/// Screen-space placement of the on-screen controls.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HudLayout {
    health_bar_origin: Vec2,
    joystick_center: Vec2,
    joystick_radius: f32,
    action_panel_origin: Vec2,
}

impl HudLayout {
    fn for_screen(width: f32, height: f32, joystick: &VirtualJoystick) -> Self {
        let joystick_radius = joystick.travel() + JOYSTICK_RIM;
        let joystick_center = Vec2::new(
            HUD_MARGIN + joystick_radius,
            (height - HUD_MARGIN - joystick_radius).max(joystick_radius),
        );
        let action_panel_origin = Vec2::new(
            (width - HUD_MARGIN - ACTION_PANEL_SIZE.x).max(0.0),
            (height - HUD_MARGIN - ACTION_PANEL_SIZE.y).max(0.0),
        );

        Self {
            health_bar_origin: Vec2::splat(HUD_MARGIN),
            joystick_center,
            joystick_radius,
            action_panel_origin,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_size: (i32, i32),
    joystick: VirtualJoystick,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_size: (1_280, 720),
            joystick: VirtualJoystick::new(&JoystickTuning::default()),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Configures the on-screen joystick.
    #[must_use]
    pub fn with_joystick(mut self, joystick: VirtualJoystick) -> Self {
        self.joystick = joystick;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_size: (window_width, window_height),
            joystick,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();
            let mut drag = JoystickDrag::default();

            loop {
                let keyboard = KeyboardState::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let layout = HudLayout::for_screen(screen_width, screen_height, &joystick);

                let stick = drag.update(PointerState::poll(), &layout, &joystick);
                let frame_input = gather_frame_input(
                    Viewport::new(screen_width, screen_height),
                    stick,
                    &keyboard,
                    control_panel_input.take_actions(),
                );

                update_scene(frame_input, &mut scene);

                draw_roads(&scene.roads);
                draw_buildings(&scene.buildings, scene.window_color());
                for npc in &scene.npcs {
                    draw_actor(npc);
                }
                draw_actor(&scene.player);
                if let Some(marker) = &scene.mission_marker {
                    draw_actor(marker);
                }
                draw_health_bar(&scene.hud, &layout);
                draw_joystick(&layout, stick);

                let mut root_ui = macroquad::ui::root_ui();
                draw_mission_label(&mut root_ui, scene.hud.mission_text, screen_width);
                let pressed = draw_action_panel_ui(
                    &mut root_ui,
                    ActionPanelUiContext {
                        origin: to_macroquad_vec(layout.action_panel_origin),
                        size: to_macroquad_vec(ACTION_PANEL_SIZE),
                        hud: &scene.hud,
                    },
                );
                drop(root_ui);
                for action in pressed {
                    control_panel_input.register(action);
                }

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame)
                {
                    if show_fps {
                        tracing::info!(
                            fps = format_args!("{per_second:.2}"),
                            trailing_10s = format_args!("{trailing_ten_seconds:.2}"),
                            "frame rate"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(
    viewport: Viewport,
    stick: JoystickState,
    keyboard: &KeyboardState,
    ui_actions: Vec<ControlAction>,
) -> FrameInput {
    let directional = if stick.input.active {
        stick.input
    } else {
        keyboard.directional()
    };

    let mut actions = ui_actions;
    for action in keyboard.actions() {
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    FrameInput {
        viewport,
        directional,
        actions,
    }
}

fn draw_rect(rect: &RectPresentation) {
    let origin = rect.rect.origin();
    let size = rect.rect.size();
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        size.x,
        size.y,
        to_macroquad_color(rect.color),
    );
}

fn draw_roads(roads: &[RectPresentation]) {
    for road in roads {
        draw_rect(road);
    }
}

fn draw_buildings(buildings: &[BuildingPresentation], window_color: Color) {
    let window_color = to_macroquad_color(window_color);
    for building in buildings {
        draw_rect(&building.body);
        for window in building.windows.windows(building.body.rect) {
            let origin = window.origin();
            let size = window.size();
            macroquad::shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, window_color);
        }
    }
}

fn draw_actor(actor: &ActorPresentation) {
    macroquad::shapes::draw_circle(
        actor.center.x,
        actor.center.y,
        actor.radius,
        to_macroquad_color(actor.color),
    );
}

fn draw_health_bar(hud: &HudPresentation, layout: &HudLayout) {
    let origin = layout.health_bar_origin;
    let bar = hud.health_bar();
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        HEALTH_BAR_SIZE.x,
        HEALTH_BAR_SIZE.y,
        macroquad::color::Color::new(0.0, 0.0, 0.0, 0.5),
    );
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        HEALTH_BAR_SIZE.x * bar.fraction,
        HEALTH_BAR_SIZE.y,
        to_macroquad_color(bar.color),
    );
}

fn draw_joystick(layout: &HudLayout, stick: JoystickState) {
    let center = layout.joystick_center;
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        layout.joystick_radius,
        macroquad::color::Color::new(1.0, 1.0, 1.0, 0.2),
    );
    let knob = center + stick.knob;
    macroquad::shapes::draw_circle(
        knob.x,
        knob.y,
        KNOB_RADIUS,
        macroquad::color::Color::new(1.0, 1.0, 1.0, 0.5),
    );
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
