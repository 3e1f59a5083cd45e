#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Metro Dash.
//!
//! The [`World`] is the simulation context for a session. It is created once
//! from the viewport size, a tuning surface and a seed, and is then mutated
//! exclusively through [`apply`]. Every random draw, both for generation and
//! for per-tick wandering, comes from a single seeded generator so a session
//! replays identically for the same seed and command stream.

use glam::Vec2;
use metro_dash_core::{
    Building, BuildingId, Circle, Command, DirectionalInput, Event, GameTuning, Health,
    MissionSnapshot, PlayerSnapshot, Road, Viewport, MISSION_COMPLETE_STATUS,
    MISSION_DESCRIPTION, WELCOME_BANNER,
};
use metro_dash_system_city as city;
use metro_dash_system_contact::{self as contact, MissionProbe};
use metro_dash_system_controls::{Controls, Transition};
use metro_dash_system_population::Population;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Represents the authoritative Metro Dash world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: GameTuning,
    viewport: Viewport,
    buildings: Vec<Building>,
    roads: Vec<Road>,
    population: Population,
    player: Player,
    mission: Mission,
    health: Health,
    controls: Controls,
    input: DirectionalInput,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a new world, generating the city and NPC population.
    #[must_use]
    pub fn new(viewport: Viewport, tuning: GameTuning, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = city::generate(viewport, &tuning.city, &mut rng);
        let mission = Mission::new(
            layout.mission_target(),
            layout.target().map(Building::id),
            viewport,
        );
        let (buildings, roads, _) = layout.into_parts();
        let population = Population::spawn(viewport, &tuning.population, &mut rng);
        let controls = Controls::new(&tuning.player);
        let player = Player::new(viewport.center(), tuning.player.radius, controls.player_speed());

        info!(
            seed,
            buildings = buildings.len(),
            roads = roads.len(),
            npcs = population.len(),
            target = ?mission.target_building.map(|id| id.get()),
            "generated city"
        );

        Self {
            banner: WELCOME_BANNER,
            tuning,
            viewport,
            buildings,
            roads,
            population,
            player,
            mission,
            health: Health::full(),
            controls,
            input: DirectionalInput::idle(),
            rng,
            tick_index: 0,
        }
    }

    fn transition(&mut self, transition: Transition, out_events: &mut Vec<Event>) {
        self.controls.apply(transition, out_events);
        self.player.speed = self.controls.player_speed();
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        self.population.advance(self.viewport, &mut self.rng);

        if self.input.active {
            self.player.heading = self.input.heading;
            self.player.position += Vec2::from_angle(self.player.heading) * self.player.speed;
        }
        self.player.position = self
            .viewport
            .clamp_circle(self.player.position, self.player.radius);

        let report = contact::resolve(
            self.player.body(),
            self.population.iter().map(|npc| npc.body()),
            MissionProbe {
                target: self.mission.target,
                completed: self.mission.completed,
            },
            self.health,
            &self.tuning.contact,
        );

        if report.damaged_health != self.health {
            self.health = report.damaged_health;
            out_events.push(Event::HealthChanged {
                health: self.health,
            });
            if self.health.get() <= Health::MIN {
                warn!(tick = self.tick_index, "player health depleted");
            }
        }

        if report.mission_captured {
            self.mission.completed = true;
            info!(tick = self.tick_index, "mission completed");
            out_events.push(Event::MissionCompleted {
                status: MISSION_COMPLETE_STATUS,
            });
            if report.health != self.health {
                self.health = report.health;
                out_events.push(Event::HealthChanged {
                    health: self.health,
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetDirectionalInput { input } => {
            world.input = input;
            world.player.moving = input.active;
        }
        Command::Tick => world.step(out_events),
        Command::ToggleRunning => world.transition(Transition::ToggleRunning, out_events),
        Command::ToggleDriving => world.transition(Transition::ToggleDriving, out_events),
        Command::Accelerate => world.transition(Transition::Accelerate, out_events),
        Command::Brake => world.transition(Transition::Brake, out_events),
        Command::ToggleLights => world.transition(Transition::ToggleLights, out_events),
        Command::ResizeViewport { viewport } => {
            if viewport != world.viewport {
                debug!(
                    width = viewport.width(),
                    height = viewport.height(),
                    "viewport resized"
                );
                world.viewport = viewport;
                out_events.push(Event::ViewportResized { viewport });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use metro_dash_core::{
        Building, GameTuning, Health, MissionSnapshot, ModeSnapshot, NpcSnapshot, PlayerSnapshot,
        Road, Viewport,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning surface the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &GameTuning {
        &world.tuning
    }

    /// Viewport bounds currently in effect.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        world.viewport
    }

    /// Buildings in generation order.
    #[must_use]
    pub fn buildings(world: &World) -> &[Building] {
        &world.buildings
    }

    /// Road bands.
    #[must_use]
    pub fn roads(world: &World) -> &[Road] {
        &world.roads
    }

    /// Captures snapshots of every NPC in identifier order.
    #[must_use]
    pub fn npc_snapshots(world: &World) -> Vec<NpcSnapshot> {
        world.population.iter().map(|npc| npc.snapshot()).collect()
    }

    /// Captures a snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a snapshot of the mission.
    #[must_use]
    pub fn mission(world: &World) -> MissionSnapshot {
        world.mission.snapshot()
    }

    /// Current player health.
    #[must_use]
    pub fn health(world: &World) -> Health {
        world.health
    }

    /// Current mode toggles and throttle.
    #[must_use]
    pub fn modes(world: &World) -> ModeSnapshot {
        world.controls.snapshot()
    }

    /// Whether the throttle controls should be presented.
    #[must_use]
    pub fn throttle_visible(world: &World) -> bool {
        world.controls.throttle_visible()
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Player {
    position: Vec2,
    radius: f32,
    speed: f32,
    heading: f32,
    moving: bool,
}

impl Player {
    fn new(position: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            position,
            radius,
            speed,
            heading: 0.0,
            moving: false,
        }
    }

    fn body(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            radius: self.radius,
            speed: self.speed,
            heading: self.heading,
            moving: self.moving,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Mission {
    target: Vec2,
    description: &'static str,
    completed: bool,
    target_building: Option<BuildingId>,
}

impl Mission {
    /// Without a designated building the target falls back to the viewport centre.
    fn new(target: Option<Vec2>, target_building: Option<BuildingId>, viewport: Viewport) -> Self {
        Self {
            target: target.unwrap_or_else(|| viewport.center()),
            description: MISSION_DESCRIPTION,
            completed: false,
            target_building,
        }
    }

    fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            target: self.target,
            description: self.description,
            completed: self.completed,
            target_building: self.target_building,
        }
    }
}
