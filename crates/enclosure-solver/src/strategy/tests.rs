//! Behaviour shared by every strategy.

use super::*;
use crate::parallel::with_thread_count;
use enclosure_config::{AnnealingConfig, GeneticConfig, ThreadCount};
use enclosure_core::{Grid, WallSet};
use enclosure_test::{cherry_pocket, lake, open_grid, portal_escape, single_chokepoint};

fn strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(GreedyStrategy),
        Box::new(GeneticStrategy::new(GeneticConfig {
            population_size: 30,
            generations: 20,
            ..GeneticConfig::default()
        })),
        Box::new(SimulatedAnnealingStrategy::new(AnnealingConfig {
            iterations: 300,
            restarts: 2,
            ..AnnealingConfig::default()
        })),
        Box::new(ExhaustiveStrategy::new().with_node_limit(2_000)),
        Box::new(RingStrategy::new().with_window(10)),
        Box::new(RandomStrategy::new(200)),
    ]
}

#[test]
fn test_outcomes_agree_with_oracle() {
    for grid in [single_chokepoint(), cherry_pocket(), portal_escape(), lake()] {
        let problem = Problem::new(grid);
        for strategy in strategies() {
            let outcome = strategy.run(&problem, 42);

            assert_eq!(outcome.strategy, strategy.name());
            assert!(outcome.walls.len() <= problem.num_walls());
            assert!(outcome
                .walls
                .iter()
                .all(|cell| problem.candidates().contains(cell)));
            assert_eq!(
                outcome.score,
                problem.evaluate(&outcome.walls).score(),
                "{} reported a score the oracle disagrees with",
                strategy.name()
            );
        }
    }
}

#[test]
fn test_zero_budget_returns_empty_evaluation() {
    let problem = Problem::new(open_grid(5, 5, 0));
    for strategy in strategies() {
        let outcome = strategy.run(&problem, 0);
        assert!(outcome.walls.is_empty(), "{}", strategy.name());
        assert!(outcome.score.escaped);
        assert_eq!(outcome.total_score(), 0);
    }
}

#[test]
fn test_no_candidates() {
    // Every cell but the start is water.
    let mut builder = Grid::builder(3, 3).start(4).budget(2);
    for cell in [0, 1, 2, 3, 5, 6, 7, 8] {
        builder = builder.water(cell);
    }
    let problem = Problem::new(builder.build().unwrap());
    assert_eq!(problem.num_walls(), 0);

    for strategy in strategies() {
        let outcome = strategy.run(&problem, 0);
        assert!(outcome.walls.is_empty());
        assert!(outcome.is_enclosed());
        assert_eq!(outcome.total_score(), 1);
    }
}

#[test]
fn test_exhaustive_bounds_every_strategy() {
    let problem = Problem::new(single_chokepoint());
    let optimum = ExhaustiveStrategy::new().run(&problem, 0);
    assert!(optimum.proven_optimal);

    for strategy in strategies() {
        let outcome = strategy.run(&problem, 5);
        assert!(outcome.score <= optimum.score, "{}", strategy.name());
    }
}

#[test]
fn test_portal_exit_is_never_enclosed_alone() {
    let problem = Problem::new(portal_escape());
    let walls = WallSet::new(problem.grid(), [10]).unwrap();
    assert!(problem.evaluate(&walls).escaped);

    let greedy = GreedyStrategy.run(&problem, 0);
    assert_eq!(greedy.score, problem.evaluate(&greedy.walls).score());
}

#[test]
fn test_improvements_are_increasing() {
    let problem = Problem::new(lake());
    for strategy in strategies() {
        let outcome = strategy.run(&problem, 9);
        assert!(!outcome.improvements.is_empty(), "{}", strategy.name());
        assert!(outcome
            .improvements
            .windows(2)
            .all(|pair| pair[0].score < pair[1].score));
        assert_eq!(
            outcome.improvements.last().map(|i| i.score),
            Some(outcome.score)
        );
    }
}

#[test]
fn test_seeded_runs_ignore_thread_count() {
    let problem = Problem::new(lake());
    let seeded: Vec<Box<dyn Strategy>> = vec![
        Box::new(GeneticStrategy::new(GeneticConfig {
            population_size: 24,
            generations: 15,
            runs: 3,
            ..GeneticConfig::default()
        })),
        Box::new(SimulatedAnnealingStrategy::new(AnnealingConfig {
            iterations: 400,
            restarts: 3,
            ..AnnealingConfig::default()
        })),
        Box::new(RandomStrategy::new(150)),
    ];

    for strategy in seeded {
        let single = with_thread_count(ThreadCount::None, || strategy.run(&problem, 77));
        let several = with_thread_count(ThreadCount::Count(4), || strategy.run(&problem, 77));

        assert_eq!(single.score, several.score, "{}", strategy.name());
        assert_eq!(single.walls, several.walls, "{}", strategy.name());
        assert_eq!(single.iterations, several.iterations);
    }
}

#[test]
fn test_open_grid_has_no_single_wall_enclosure() {
    // A 3x3 open grid: the start touches the boundary on every side.
    let problem = Problem::new(open_grid(3, 3, 1));
    for strategy in strategies() {
        let outcome = strategy.run(&problem, 1);
        assert!(outcome.score.escaped, "{}", strategy.name());
        assert_eq!(outcome.total_score(), 0);
    }
}
