use metro_dash_core::{PopulationTuning, Viewport};
use metro_dash_system_population::Population;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn spawn_respects_tuning() {
    let tuning = PopulationTuning::default();
    let viewport = Viewport::new(800.0, 600.0);
    let population = Population::spawn(viewport, &tuning, &mut ChaCha8Rng::seed_from_u64(9));

    assert_eq!(population.len(), 10);
    for (index, npc) in population.iter().enumerate() {
        let snapshot = npc.snapshot();
        assert_eq!(snapshot.id.get() as usize, index);
        assert_eq!(snapshot.radius, 15.0);
        assert!((1.0..2.0).contains(&snapshot.speed));
        assert!((60..180).contains(&snapshot.turn_countdown));
        assert!(snapshot.position.x >= 0.0 && snapshot.position.x < 800.0);
        assert!(snapshot.position.y >= 0.0 && snapshot.position.y < 600.0);
    }
}

#[test]
fn wandering_is_reproducible_for_a_seed() {
    let viewport = Viewport::new(640.0, 480.0);
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut population = Population::spawn(viewport, &PopulationTuning::default(), &mut rng);
        for _ in 0..500 {
            population.advance(viewport, &mut rng);
        }
        population
    };

    assert_eq!(run(17), run(17));
}

proptest! {
    #[test]
    fn npcs_stay_within_bounds(
        seed in any::<u64>(),
        width in 40.0f32..2_000.0,
        height in 40.0f32..2_000.0,
        ticks in 1usize..400,
    ) {
        let viewport = Viewport::new(width, height);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut population = Population::spawn(viewport, &PopulationTuning::default(), &mut rng);

        for _ in 0..ticks {
            population.advance(viewport, &mut rng);
            for npc in population.iter() {
                let body = npc.body();
                prop_assert!(body.center.x >= body.radius);
                prop_assert!(body.center.x <= width - body.radius);
                prop_assert!(body.center.y >= body.radius);
                prop_assert!(body.center.y <= height - body.radius);
            }
        }
    }

    #[test]
    fn heading_changes_only_when_countdown_expires(seed in any::<u64>(), ticks in 1usize..600) {
        let viewport = Viewport::new(1_000.0, 1_000.0);
        let tuning = PopulationTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut population = Population::spawn(viewport, &tuning, &mut rng);

        for _ in 0..ticks {
            let before: Vec<_> = population.iter().map(|npc| npc.snapshot()).collect();
            population.advance(viewport, &mut rng);

            for (previous, npc) in before.iter().zip(population.iter()) {
                let current = npc.snapshot();
                prop_assert!(current.turn_countdown >= 1);
                if previous.turn_countdown == 1 {
                    prop_assert!(
                        (tuning.turn_interval.min..tuning.turn_interval.max)
                            .contains(&current.turn_countdown)
                    );
                } else {
                    prop_assert_eq!(current.heading, previous.heading);
                    prop_assert_eq!(current.turn_countdown, previous.turn_countdown - 1);
                }
            }
        }
    }
}
