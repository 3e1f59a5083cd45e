#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! NPC population generation and memoryless wandering.
//!
//! Each NPC walks in a straight line until its heading countdown expires, then
//! picks a fresh uniformly random heading. Positions are clamped to the
//! viewport after every step; NPCs do not bounce off edges and may hug a
//! boundary until their next heading happens to point inward. There is no
//! pathfinding and no avoidance between NPCs.

use std::f32::consts::TAU;

use glam::Vec2;
use metro_dash_core::{Circle, NpcId, NpcSnapshot, PopulationTuning, TuningRange, Viewport};
use rand::Rng;

/// Wandering actor that moves independently of every other actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Npc {
    id: NpcId,
    position: Vec2,
    radius: f32,
    speed: f32,
    heading: f32,
    turn_countdown: u32,
}

impl Npc {
    /// Creates an NPC with explicit state.
    #[must_use]
    pub const fn new(
        id: NpcId,
        position: Vec2,
        radius: f32,
        speed: f32,
        heading: f32,
        turn_countdown: u32,
    ) -> Self {
        Self {
            id,
            position,
            radius,
            speed,
            heading,
            turn_countdown,
        }
    }

    /// Identifier of the NPC.
    #[must_use]
    pub const fn id(&self) -> NpcId {
        self.id
    }

    /// Centre of the NPC.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current heading in radians.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Ticks remaining before the next heading change.
    #[must_use]
    pub const fn turn_countdown(&self) -> u32 {
        self.turn_countdown
    }

    /// Body of the NPC used for contact checks.
    #[must_use]
    pub const fn body(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Captures an immutable snapshot of the NPC.
    #[must_use]
    pub const fn snapshot(&self) -> NpcSnapshot {
        NpcSnapshot {
            id: self.id,
            position: self.position,
            radius: self.radius,
            speed: self.speed,
            heading: self.heading,
            turn_countdown: self.turn_countdown,
        }
    }

    /// Advances the NPC by one tick.
    pub fn wander<R>(&mut self, viewport: Viewport, turn_interval: TuningRange<u32>, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.turn_countdown = self.turn_countdown.saturating_sub(1);
        if self.turn_countdown == 0 {
            self.heading = random_heading(rng);
            self.turn_countdown = sample_countdown(turn_interval, rng);
        }

        let step = Vec2::from_angle(self.heading) * self.speed;
        self.position = viewport.clamp_circle(self.position + step, self.radius);
    }
}

/// Fixed-size set of NPCs generated once per session.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    npcs: Vec<Npc>,
    turn_interval: TuningRange<u32>,
}

impl Population {
    /// Spawns NPCs uniformly over the viewport with randomised motion.
    pub fn spawn<R>(viewport: Viewport, tuning: &PopulationTuning, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let horizontal = TuningRange::new(0.0, viewport.width());
        let vertical = TuningRange::new(0.0, viewport.height());

        let mut npcs = Vec::with_capacity(usize::try_from(tuning.count).unwrap_or(0));
        for index in 0..tuning.count {
            let position = Vec2::new(sample_f32(horizontal, rng), sample_f32(vertical, rng));
            npcs.push(Npc {
                id: NpcId::new(index),
                position,
                radius: tuning.radius,
                speed: sample_f32(tuning.speed, rng),
                heading: random_heading(rng),
                turn_countdown: sample_countdown(tuning.turn_interval, rng),
            });
        }

        Self {
            npcs,
            turn_interval: tuning.turn_interval,
        }
    }

    /// Wraps an explicit set of NPCs.
    #[must_use]
    pub fn from_npcs(npcs: Vec<Npc>, turn_interval: TuningRange<u32>) -> Self {
        Self {
            npcs,
            turn_interval,
        }
    }

    /// Advances every NPC by one tick in identifier order.
    pub fn advance<R>(&mut self, viewport: Viewport, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for npc in &mut self.npcs {
            npc.wander(viewport, self.turn_interval, rng);
        }
    }

    /// Iterator over the NPCs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    /// Number of NPCs in the population.
    #[must_use]
    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    /// Reports whether the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

fn random_heading<R>(rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    rng.gen_range(0.0..TAU)
}

fn sample_countdown<R>(range: TuningRange<u32>, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    let ticks = if range.is_empty() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    };
    ticks.max(1)
}

fn sample_f32<R>(range: TuningRange<f32>, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    if range.is_empty() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f32::consts::FRAC_PI_2;

    fn npc_at(position: Vec2, heading: f32, turn_countdown: u32) -> Npc {
        Npc {
            id: NpcId::new(0),
            position,
            radius: 15.0,
            speed: 1.5,
            heading,
            turn_countdown,
        }
    }

    #[test]
    fn heading_is_stable_while_countdown_runs() {
        let viewport = Viewport::new(500.0, 500.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut npc = npc_at(Vec2::splat(250.0), FRAC_PI_2, 5);

        npc.wander(viewport, TuningRange::new(60, 180), &mut rng);

        assert_eq!(npc.heading(), FRAC_PI_2);
        assert_eq!(npc.turn_countdown(), 4);
        assert!((npc.position() - Vec2::new(250.0, 251.5)).length() < 1e-4);
    }

    #[test]
    fn expiring_countdown_rerolls_heading_and_interval() {
        let viewport = Viewport::new(500.0, 500.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut npc = npc_at(Vec2::splat(250.0), 0.0, 1);

        npc.wander(viewport, TuningRange::new(60, 180), &mut rng);

        assert!((60..180).contains(&npc.turn_countdown()));
        assert!((0.0..TAU).contains(&npc.heading()));
    }

    #[test]
    fn degenerate_interval_still_yields_positive_countdown() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(sample_countdown(TuningRange::new(0, 0), &mut rng), 1);
    }

    #[test]
    fn npc_sticks_to_edge_instead_of_reflecting() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut npc = npc_at(Vec2::new(85.0, 50.0), 0.0, 50);

        for _ in 0..10 {
            npc.wander(viewport, TuningRange::new(60, 180), &mut rng);
        }

        assert_eq!(npc.position().x, 85.0);
        assert_eq!(npc.heading(), 0.0);
    }
}
