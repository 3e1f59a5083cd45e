//! Per-frame pipeline connecting adapter input, the world and the scene.

use metro_dash_core::{Command, Event};
use metro_dash_rendering::{
    dispatch_events, palette, ActorPresentation, BuildingPresentation, ControlAction, FrameInput,
    HudObserver, HudPresentation, RectPresentation, Scene, WindowPattern,
};
use metro_dash_world::{self as world, query, World};

/// Radius of the marker drawn over the mission target.
const MISSION_MARKER_RADIUS: f32 = 10.0;

/// Owns the world and turns each frame of input into exactly one tick.
#[derive(Debug)]
pub(crate) struct FrameDriver<H> {
    world: World,
    hud: H,
    events: Vec<Event>,
}

impl<H> FrameDriver<H>
where
    H: HudObserver,
{
    /// Creates a driver that reports HUD changes to `hud`.
    pub(crate) fn new(world: World, hud: H) -> Self {
        Self {
            world,
            hud,
            events: Vec::new(),
        }
    }

    /// Read-only access to the simulated world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies the frame's input, advances one tick and returns the events it produced.
    pub(crate) fn advance(&mut self, input: FrameInput) -> &[Event] {
        self.events.clear();

        let FrameInput {
            viewport,
            directional,
            actions,
        } = input;

        let commands = std::iter::once(Command::ResizeViewport { viewport })
            .chain(actions.into_iter().map(command_for))
            .chain([
                Command::SetDirectionalInput { input: directional },
                Command::Tick,
            ]);
        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }

        dispatch_events(&self.events, &mut self.hud);
        &self.events
    }
}

impl FrameDriver<HudPresentation> {
    /// Creates a driver whose HUD starts from the world's current state.
    pub(crate) fn with_presentation(world: World) -> Self {
        let hud = hud_for(&world);
        Self::new(world, hud)
    }

    /// Builds the scene describing the current world state.
    pub(crate) fn scene(&self) -> Scene {
        let mut scene = Scene {
            viewport: query::viewport(&self.world),
            roads: Vec::new(),
            buildings: Vec::new(),
            lights_on: false,
            npcs: Vec::new(),
            player: ActorPresentation::new(glam::Vec2::ZERO, 0.0, palette::PLAYER),
            mission_marker: None,
            hud: self.hud.clone(),
        };
        populate_scene(&self.world, &self.hud, &mut scene);
        scene
    }

    /// Runs one frame and refreshes `scene` for drawing.
    pub(crate) fn frame(&mut self, input: FrameInput, scene: &mut Scene) {
        let _ = self.advance(input);
        populate_scene(&self.world, &self.hud, scene);
    }
}

fn command_for(action: ControlAction) -> Command {
    match action {
        ControlAction::ToggleRunning => Command::ToggleRunning,
        ControlAction::ToggleDriving => Command::ToggleDriving,
        ControlAction::ToggleLights => Command::ToggleLights,
        ControlAction::Accelerate => Command::Accelerate,
        ControlAction::Brake => Command::Brake,
    }
}

/// HUD reflecting the world's current health, mission and modes.
pub(crate) fn hud_for(world: &World) -> HudPresentation {
    let mission = query::mission(world);
    let modes = query::modes(world);
    let mut hud = HudPresentation::new(query::health(world), mission.description);
    if mission.completed {
        hud.mission_text = metro_dash_core::MISSION_COMPLETE_STATUS;
    }
    hud.running = modes.running;
    hud.driving = modes.driving;
    hud.lights = modes.lights;
    hud.vehicle_speed = modes.vehicle_speed;
    hud
}

/// Rewrites `scene` in place from the world and HUD state.
pub(crate) fn populate_scene(world: &World, hud: &HudPresentation, scene: &mut Scene) {
    scene.viewport = query::viewport(world);

    scene.roads.clear();
    scene.roads.extend(
        query::roads(world)
            .iter()
            .map(|road| RectPresentation::new(road.rect(), road.color().into())),
    );

    scene.buildings.clear();
    scene
        .buildings
        .extend(query::buildings(world).iter().map(|building| BuildingPresentation {
            body: RectPresentation::new(building.rect(), building.color().into()),
            windows: WindowPattern::for_building(building.id().get()),
        }));

    scene.lights_on = query::modes(world).lights;

    scene.npcs.clear();
    scene.npcs.extend(
        query::npc_snapshots(world)
            .into_iter()
            .map(|npc| ActorPresentation::new(npc.position, npc.radius, palette::NPC)),
    );

    let player = query::player(world);
    scene.player = ActorPresentation::new(player.position, player.radius, palette::PLAYER);

    let mission = query::mission(world);
    scene.mission_marker = (!mission.completed).then(|| {
        ActorPresentation::new(
            mission.target,
            MISSION_MARKER_RADIUS,
            palette::MISSION_MARKER,
        )
    });

    scene.hud.clone_from(hud);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use metro_dash_core::{
        DirectionalInput, GameTuning, Health, TuningRange, Viewport, MISSION_DESCRIPTION,
    };

    fn quiet_tuning() -> GameTuning {
        let mut tuning = GameTuning::default();
        tuning.population.count = 0;
        tuning
    }

    fn viewport() -> Viewport {
        Viewport::new(1_280.0, 720.0)
    }

    fn driver() -> FrameDriver<HudPresentation> {
        FrameDriver::with_presentation(World::new(viewport(), quiet_tuning(), 7))
    }

    #[test]
    fn every_frame_advances_exactly_one_tick() {
        let mut driver = driver();
        let mut scene = driver.scene();

        for _ in 0..3 {
            driver.frame(FrameInput::idle(viewport()), &mut scene);
        }

        assert_eq!(query::tick_index(driver.world()), 3);
    }

    #[test]
    fn initial_scene_mirrors_world() {
        let driver = driver();
        let scene = driver.scene();

        assert_eq!(scene.buildings.len(), 20);
        assert_eq!(scene.roads.len(), 10);
        assert!(scene.npcs.is_empty());
        assert_eq!(scene.player.center, viewport().center());
        assert_eq!(scene.hud.mission_text, MISSION_DESCRIPTION);
        assert_eq!(scene.hud.health, Health::full());
        let marker = scene.mission_marker.expect("mission pending");
        assert_eq!(marker.radius, MISSION_MARKER_RADIUS);
        assert_eq!(marker.center, query::mission(driver.world()).target);
    }

    #[test]
    fn button_presses_reach_world_and_hud_in_order() {
        let mut driver = driver();
        let mut scene = driver.scene();
        let input = FrameInput {
            viewport: viewport(),
            directional: DirectionalInput::idle(),
            actions: vec![
                ControlAction::ToggleDriving,
                ControlAction::Accelerate,
                ControlAction::Accelerate,
                ControlAction::ToggleLights,
            ],
        };

        driver.frame(input, &mut scene);

        let modes = query::modes(driver.world());
        assert!(modes.driving && modes.lights);
        assert_eq!(modes.vehicle_speed, 2.0);
        assert!(scene.hud.throttle_visible());
        assert_eq!(scene.hud.vehicle_speed, 2.0);
        assert!(scene.lights_on);
    }

    #[test]
    fn directional_input_moves_player_within_same_frame() {
        let mut driver = driver();
        let mut scene = driver.scene();
        let start = scene.player.center;
        let input = FrameInput {
            directional: DirectionalInput::toward(0.0),
            ..FrameInput::idle(viewport())
        };

        driver.frame(input, &mut scene);

        assert!((scene.player.center - (start + Vec2::new(3.0, 0.0))).length() < 1e-4);
    }

    #[test]
    fn window_resize_reaches_world_before_tick() {
        let mut driver = driver();
        let mut scene = driver.scene();
        let small = Viewport::new(400.0, 300.0);

        let events = driver.advance(FrameInput::idle(small)).to_vec();
        assert_eq!(
            events.first(),
            Some(&Event::ViewportResized { viewport: small })
        );

        populate_scene(driver.world(), &driver.hud, &mut scene);
        assert_eq!(scene.viewport, small);
        assert!(small.contains_circle(scene.player.center, scene.player.radius));
    }

    #[test]
    fn detached_hud_still_drives_world() {
        let world = World::new(viewport(), GameTuning::default(), 3);
        let mut driver = FrameDriver::new(world, ());

        for _ in 0..10 {
            let events = driver.advance(FrameInput::idle(viewport()));
            assert!(matches!(events.first(), Some(Event::TimeAdvanced { .. })));
        }

        assert_eq!(query::tick_index(driver.world()), 10);
    }

    #[test]
    fn completed_mission_hides_marker() {
        let mut tuning = quiet_tuning();
        tuning.city.building_width = TuningRange::new(1.0, 2.0);
        tuning.city.building_height = TuningRange::new(1.0, 2.0);
        let mut driver = FrameDriver::with_presentation(World::new(viewport(), tuning, 11));
        let target = query::mission(driver.world()).target;
        let mut scene = driver.scene();

        for _ in 0..2_000 {
            if query::mission(driver.world()).completed {
                break;
            }
            let offset = target - query::player(driver.world()).position;
            let input = FrameInput {
                directional: DirectionalInput::toward(offset.y.atan2(offset.x)),
                ..FrameInput::idle(viewport())
            };
            driver.frame(input, &mut scene);
        }

        assert!(query::mission(driver.world()).completed);
        assert!(scene.mission_marker.is_none());
        assert_eq!(scene.hud.mission_text, metro_dash_core::MISSION_COMPLETE_STATUS);
    }
}
