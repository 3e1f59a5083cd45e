//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! Every use of `macroquad::ui` lives here so the renderer itself only deals
//! in shapes.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use metro_dash_rendering::{ControlAction, HudPresentation};

/// Layout and state needed to draw the action buttons for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActionPanelUiContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// HUD state the button labels reflect.
    pub hud: &'a HudPresentation,
}

fn toggle_label(name: &str, active: bool) -> String {
    if active {
        format!("{name}: On")
    } else {
        format!("{name}: Off")
    }
}

/// Draws the action buttons and returns those pressed this frame, in panel order.
pub(crate) fn draw_action_panel_ui(
    ui: &mut Ui,
    context: ActionPanelUiContext<'_>,
) -> Vec<ControlAction> {
    let panel = Color::from_rgba(17, 24, 39, 200);
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    skin.window_style = ui
        .style_builder()
        .color(panel)
        .color_hovered(panel)
        .color_clicked(panel)
        .color_inactive(panel)
        .text_color(WHITE)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();

    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(55, 65, 81, 255))
        .color_hovered(Color::from_rgba(75, 85, 99, 255))
        .color_clicked(Color::from_rgba(31, 41, 55, 255))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();

    ui.push_skin(&skin);

    let hud = context.hud;
    let mut pressed = Vec::new();
    let _ = ui.window(hash!("metro_dash_actions"), context.origin, context.size, |ui| {
        if ui.button(None, toggle_label("Run", hud.running).as_str()) {
            pressed.push(ControlAction::ToggleRunning);
        }
        if ui.button(None, toggle_label("Drive", hud.driving).as_str()) {
            pressed.push(ControlAction::ToggleDriving);
        }
        if ui.button(None, toggle_label("Lights", hud.lights).as_str()) {
            pressed.push(ControlAction::ToggleLights);
        }
        if hud.throttle_visible() {
            ui.label(None, format!("Speed: {:.0}", hud.vehicle_speed).as_str());
            if ui.button(None, "Gas") {
                pressed.push(ControlAction::Accelerate);
            }
            if ui.button(None, "Brake") {
                pressed.push(ControlAction::Brake);
            }
        }
    });

    ui.pop_skin();
    pressed
}

/// Draws the mission line centred near the top of the screen.
pub(crate) fn draw_mission_label(ui: &mut Ui, text: &str, screen_width: f32) {
    let mut skin = ui.default_skin();
    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .font_size(24)
        .build();
    ui.push_skin(&skin);

    let approximate_width = text.chars().count() as f32 * 11.0;
    let x = ((screen_width - approximate_width) * 0.5).max(0.0);
    ui.label(Some(Vec2::new(x, 16.0)), text);

    ui.pop_skin();
}
