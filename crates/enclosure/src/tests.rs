use std::sync::Arc;

use enclosure_solver::{CountingListener, ExhaustiveStrategy, Strategy};
use enclosure_test::{cherry_pocket, single_chokepoint};

use super::*;

fn bounded() -> SearchConfig {
    SearchConfig::from_toml_str(
        r#"
        random_seed = 5

        [termination]
        iteration_limit = 2000
        "#,
    )
    .unwrap()
}

#[test]
fn test_solve_runs_default_strategies() {
    let listener = Arc::new(CountingListener::new());
    let mut events = SearchEvents::new();
    events.add_listener(listener.clone());

    let outcome = solve_with_events(single_chokepoint(), &bounded(), &events).unwrap();

    assert_eq!(listener.started_count(), 3);
    assert_eq!(listener.ended_count(), 3);
    // Greedy alone finds the chokepoint wall.
    assert!(outcome.is_enclosed());
    assert_eq!(outcome.score, evaluate(&single_chokepoint(), &outcome.walls).score());
}

#[test]
fn test_solve_keeps_best_strategy() {
    let config = SearchConfig::new()
        .with_random_seed(5)
        .with_strategy(StrategyConfig::Greedy(Default::default()))
        .with_strategy(StrategyConfig::Exhaustive(Default::default()));

    let outcome = solve(cherry_pocket(), &config).unwrap();
    let problem = Problem::new(cherry_pocket());
    let greedy = StrategyBuilder::solver(&config, &config.strategies[0])
        .unwrap()
        .run(&problem);
    let optimum = ExhaustiveStrategy::new().run(&problem, 5);

    assert!(optimum.proven_optimal);
    assert!(outcome.score >= greedy.score);
    assert_eq!(outcome.score, optimum.score);
}

#[test]
fn test_solve_rejects_invalid_config() {
    let config = SearchConfig::new().with_thread_count(ThreadCount::Count(0));

    let err = solve(single_chokepoint(), &config).unwrap_err();
    assert!(matches!(err, EnclosureError::Config(_)));
    assert!(err.to_string().contains("thread_count"));
}

#[test]
fn test_solve_with_zero_budget() {
    let grid = Grid::builder(3, 3).start(4).budget(0).build().unwrap();
    let config = bounded().with_strategy(StrategyConfig::Greedy(Default::default()));

    let outcome = solve(grid, &config).unwrap();
    assert!(outcome.walls.is_empty());
    assert!(outcome.score.escaped);
}
