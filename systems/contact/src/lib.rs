#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Contact resolution between the player, NPCs and the mission target.
//!
//! The system is pure: it receives the post-move positions for a tick and the
//! current health, and reports the resulting health together with whether the
//! mission target was reached. Damage is additive per overlapping NPC, so a
//! player wedged between several NPCs loses health proportionally faster.

use glam::Vec2;
use metro_dash_core::{Circle, ContactTuning, Health};

/// Mission state relevant to a single contact pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissionProbe {
    /// Point the player must reach.
    pub target: Vec2,
    /// Whether the mission was already completed before this pass.
    pub completed: bool,
}

/// Result of resolving contacts for a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactReport {
    /// Number of NPCs overlapping the player.
    pub overlapping: usize,
    /// Health after contact damage, before any mission bonus.
    pub damaged_health: Health,
    /// Whether the player reached the mission target during this pass.
    pub mission_captured: bool,
    /// Health after contact damage and any mission bonus.
    pub health: Health,
}

/// Counts the NPC bodies overlapping the player body.
#[must_use]
pub fn count_overlaps<I>(player: Circle, npcs: I) -> usize
where
    I: IntoIterator<Item = Circle>,
{
    npcs.into_iter().filter(|npc| player.overlaps(npc)).count()
}

/// Reports whether `position` lies strictly inside the capture radius of `target`.
#[must_use]
pub fn within_capture_radius(position: Vec2, target: Vec2, capture_radius: f32) -> bool {
    position.distance(target) < capture_radius
}

/// Resolves contact damage and mission capture for one tick.
#[must_use]
pub fn resolve<I>(
    player: Circle,
    npcs: I,
    mission: MissionProbe,
    health: Health,
    tuning: &ContactTuning,
) -> ContactReport
where
    I: IntoIterator<Item = Circle>,
{
    let overlapping = count_overlaps(player, npcs);
    let damaged_health = health.damaged(tuning.damage_per_npc * overlapping as f32);

    let mission_captured = !mission.completed
        && within_capture_radius(player.center, mission.target, tuning.capture_radius);
    let health = if mission_captured {
        damaged_health.restored(tuning.mission_bonus)
    } else {
        damaged_health
    };

    ContactReport {
        overlapping,
        damaged_health,
        mission_captured,
        health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Circle {
        Circle::new(Vec2::new(x, y), 20.0)
    }

    fn npc_at(x: f32, y: f32) -> Circle {
        Circle::new(Vec2::new(x, y), 15.0)
    }

    fn distant_mission() -> MissionProbe {
        MissionProbe {
            target: Vec2::new(10_000.0, 10_000.0),
            completed: false,
        }
    }

    #[test]
    fn damage_is_additive_per_overlapping_npc() {
        let npcs = [npc_at(100.0, 100.0), npc_at(110.0, 100.0), npc_at(400.0, 400.0)];
        let report = resolve(
            player_at(100.0, 100.0),
            npcs,
            distant_mission(),
            Health::new(80.0),
            &ContactTuning::default(),
        );

        assert_eq!(report.overlapping, 2);
        assert_eq!(report.health.get(), 79.0);
        assert!(!report.mission_captured);
    }

    #[test]
    fn damage_floors_at_zero() {
        let npcs = [npc_at(100.0, 100.0), npc_at(101.0, 100.0)];
        let report = resolve(
            player_at(100.0, 100.0),
            npcs,
            distant_mission(),
            Health::new(0.5),
            &ContactTuning::default(),
        );

        assert_eq!(report.health.get(), 0.0);
    }

    #[test]
    fn capture_requires_strictly_smaller_distance() {
        assert!(within_capture_radius(
            Vec2::ZERO,
            Vec2::new(49.9, 0.0),
            50.0
        ));
        assert!(!within_capture_radius(
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            50.0
        ));
    }

    #[test]
    fn capture_restores_bonus_after_damage() {
        let mission = MissionProbe {
            target: Vec2::new(100.0, 100.0),
            completed: false,
        };
        let report = resolve(
            player_at(100.0, 100.0),
            [npc_at(100.0, 100.0)],
            mission,
            Health::new(40.0),
            &ContactTuning::default(),
        );

        assert!(report.mission_captured);
        assert_eq!(report.damaged_health.get(), 39.5);
        assert_eq!(report.health.get(), 69.5);
    }

    #[test]
    fn completed_missions_are_not_captured_again() {
        let mission = MissionProbe {
            target: Vec2::new(100.0, 100.0),
            completed: true,
        };
        let report = resolve(
            player_at(100.0, 100.0),
            std::iter::empty(),
            mission,
            Health::new(40.0),
            &ContactTuning::default(),
        );

        assert!(!report.mission_captured);
        assert_eq!(report.health.get(), 40.0);
    }
}
