use crate::{palette, Color};
use metro_dash_core::{Event, Health, HealthTier, ModeToggle, Viewport};

/// Receives the world events that influence the heads-up display.
///
/// Every method defaults to a no-op so observers only override what they show.
pub trait HudObserver {
    /// Health changed to `health`.
    fn on_health_changed(&mut self, health: Health) {
        let _ = health;
    }

    /// The mission was completed and the HUD should show `status`.
    fn on_mission_completed(&mut self, status: &'static str) {
        let _ = status;
    }

    /// A mode toggle flipped.
    fn on_mode_changed(&mut self, toggle: ModeToggle, active: bool) {
        let _ = (toggle, active);
    }

    /// The vehicle throttle changed.
    fn on_vehicle_speed_changed(&mut self, speed: f32) {
        let _ = speed;
    }

    /// The simulated area was resized.
    fn on_viewport_resized(&mut self, viewport: Viewport) {
        let _ = viewport;
    }
}

/// Detached HUD used when nothing is displayed.
impl HudObserver for () {}

/// Forwards every HUD-relevant event to `observer` in emission order.
pub fn dispatch_events<H>(events: &[Event], observer: &mut H)
where
    H: HudObserver + ?Sized,
{
    for event in events {
        match event {
            Event::HealthChanged { health } => observer.on_health_changed(*health),
            Event::MissionCompleted { status } => observer.on_mission_completed(*status),
            Event::ModeChanged { toggle, active } => observer.on_mode_changed(*toggle, *active),
            Event::VehicleSpeedChanged { speed } => observer.on_vehicle_speed_changed(*speed),
            Event::ViewportResized { viewport } => observer.on_viewport_resized(*viewport),
            Event::TimeAdvanced { .. } => {}
        }
    }
}

/// Fill state of the health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Filled share of the bar in the range 0.0..=1.0.
    pub fraction: f32,
    /// Fill color derived from the health tier.
    pub color: Color,
}

/// Text and gauges drawn over the city.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Health shown by the bar.
    pub health: Health,
    /// Mission line shown at the top of the screen.
    pub mission_text: &'static str,
    /// Whether the Run button is highlighted.
    pub running: bool,
    /// Whether the Drive button is highlighted.
    pub driving: bool,
    /// Whether the Lights button is highlighted.
    pub lights: bool,
    /// Throttle shown next to the Gas and Brake buttons.
    pub vehicle_speed: f32,
}

impl HudPresentation {
    /// Creates a HUD with every toggle off.
    #[must_use]
    pub const fn new(health: Health, mission_text: &'static str) -> Self {
        Self {
            health,
            mission_text,
            running: false,
            driving: false,
            lights: false,
            vehicle_speed: 0.0,
        }
    }

    /// Current fill of the health bar.
    #[must_use]
    pub fn health_bar(&self) -> HealthBar {
        let color = match self.health.tier() {
            HealthTier::Healthy => palette::HEALTH_HEALTHY,
            HealthTier::Wounded => palette::HEALTH_WOUNDED,
            HealthTier::Critical => palette::HEALTH_CRITICAL,
        };
        HealthBar {
            fraction: self.health.fraction().clamp(0.0, 1.0),
            color,
        }
    }

    /// Whether the Gas and Brake buttons are shown.
    #[must_use]
    pub const fn throttle_visible(&self) -> bool {
        self.driving
    }
}

impl HudObserver for HudPresentation {
    fn on_health_changed(&mut self, health: Health) {
        self.health = health;
    }

    fn on_mission_completed(&mut self, status: &'static str) {
        self.mission_text = status;
    }

    fn on_mode_changed(&mut self, toggle: ModeToggle, active: bool) {
        match toggle {
            ModeToggle::Running => self.running = active,
            ModeToggle::Driving => self.driving = active,
            ModeToggle::Lights => self.lights = active,
        }
    }

    fn on_vehicle_speed_changed(&mut self, speed: f32) {
        self.vehicle_speed = speed;
    }
}
