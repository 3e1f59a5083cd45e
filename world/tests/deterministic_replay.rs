use std::{
    collections::hash_map::DefaultHasher,
    f32::consts::{FRAC_PI_2, FRAC_PI_4, PI},
    hash::{Hash, Hasher},
};

use metro_dash_core::{Command, DirectionalInput, Event, GameTuning, Viewport};
use metro_dash_world::{self as world, query, World};

const SEED: u64 = 0x00c1_7ea5_d00d;

#[test]
fn deterministic_replay_produces_identical_fingerprints() {
    let first = replay(SEED, scripted_commands());
    let second = replay(SEED, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn different_seeds_diverge() {
    let first = replay(SEED, scripted_commands());
    let second = replay(SEED ^ 0xffff, scripted_commands());

    assert_ne!(first.fingerprint(), second.fingerprint());
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    let headings = [0.0, FRAC_PI_4, FRAC_PI_2, PI, -FRAC_PI_2];

    for (round, heading) in headings.into_iter().enumerate() {
        commands.push(Command::SetDirectionalInput {
            input: DirectionalInput::toward(heading),
        });
        if round == 1 {
            commands.push(Command::ToggleRunning);
        }
        if round == 3 {
            commands.push(Command::ToggleDriving);
            commands.extend([Command::Accelerate; 6]);
        }
        commands.extend([Command::Tick; 90]);
        commands.push(Command::SetDirectionalInput {
            input: DirectionalInput::idle(),
        });
        commands.extend([Command::Tick; 30]);
    }

    commands.push(Command::ToggleLights);
    commands.push(Command::ResizeViewport {
        viewport: Viewport::new(640.0, 480.0),
    });
    commands.extend([Command::Tick; 60]);
    commands
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(Viewport::new(1_280.0, 720.0), GameTuning::default(), seed);
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.extend(events.iter().map(EventRecord::from));
    }

    let player = query::player(&world);
    let npcs = query::npc_snapshots(&world)
        .into_iter()
        .map(|npc| {
            (
                npc.id.get(),
                npc.position.x.to_bits(),
                npc.position.y.to_bits(),
                npc.heading.to_bits(),
                npc.turn_countdown,
            )
        })
        .collect();

    ReplayOutcome {
        player: (player.position.x.to_bits(), player.position.y.to_bits()),
        health: query::health(&world).get().to_bits(),
        mission_completed: query::mission(&world).completed,
        npcs,
        events: log,
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    player: (u32, u32),
    health: u32,
    mission_completed: bool,
    npcs: Vec<(u32, u32, u32, u32, u32)>,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced(u64),
    HealthChanged(u32),
    MissionCompleted,
    ModeChanged(String, bool),
    VehicleSpeedChanged(u32),
    ViewportResized(u32, u32),
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimeAdvanced { tick } => Self::TimeAdvanced(*tick),
            Event::HealthChanged { health } => Self::HealthChanged(health.get().to_bits()),
            Event::MissionCompleted { .. } => Self::MissionCompleted,
            Event::ModeChanged { toggle, active } => Self::ModeChanged(format!("{toggle:?}"), *active),
            Event::VehicleSpeedChanged { speed } => Self::VehicleSpeedChanged(speed.to_bits()),
            Event::ViewportResized { viewport } => {
                Self::ViewportResized(viewport.width().to_bits(), viewport.height().to_bits())
            }
        }
    }
}
