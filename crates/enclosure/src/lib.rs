//! Enclosure - wall placement search on grid puzzles
//!
//! A grid holds grass, water, cherries and portals around a single start
//! cell. Placing up to `budget` walls on grass tries to cut the start off from
//! the border; the score is the size of the trapped region plus a bonus per
//! trapped cherry. This crate re-exports the building blocks and adds
//! [`solve`], which runs every configured strategy and keeps the best
//! placement.
//!
//! # Example
//!
//! ```
//! use enclosure::prelude::*;
//!
//! let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
//! let config = SearchConfig::new()
//!     .with_random_seed(1)
//!     .with_strategy(StrategyConfig::Exhaustive(Default::default()));
//!
//! let outcome = enclosure::solve(grid, &config).unwrap();
//! assert_eq!(outcome.walls.cells(), &[1, 3, 5, 7]);
//! assert_eq!(outcome.score.total_score, 1);
//! assert!(outcome.proven_optimal);
//! ```

use tracing::info;

pub use enclosure_benchmark as benchmark;
pub use enclosure_config as config;
pub use enclosure_core as model;
pub use enclosure_solver as solver;

pub use enclosure_config::{
    ConfigError, SearchConfig, StrategyConfig, TerminationConfig, ThreadCount,
};
pub use enclosure_core::{
    evaluate, CandidateSet, EnclosureError, EnclosureScore, Grid, GridBuilder, Result,
    ScoreResult, Terrain, WallSet,
};
pub use enclosure_solver::{Problem, SearchEvents, SearchOutcome, Solver, StrategyBuilder};

pub mod logging;

/// Runs every strategy in `config` on `grid` and returns the best outcome.
///
/// A configuration without strategies runs greedy, genetic and simulated
/// annealing. Ties keep the earlier strategy.
///
/// # Errors
///
/// Returns [`EnclosureError::Config`] if `config` fails validation.
pub fn solve(grid: Grid, config: &SearchConfig) -> Result<SearchOutcome> {
    solve_with_events(grid, config, &SearchEvents::new())
}

/// Like [`solve`], reporting progress to `events`.
pub fn solve_with_events(
    grid: Grid,
    config: &SearchConfig,
    events: &SearchEvents,
) -> Result<SearchOutcome> {
    let solvers = if config.strategies.is_empty() {
        let mut config = config.clone();
        config.strategies = StrategyBuilder::default_strategies();
        StrategyBuilder::solvers(&config, events)
    } else {
        StrategyBuilder::solvers(config, events)
    }
    .map_err(|err| EnclosureError::Config(err.to_string()))?;

    let problem = Problem::new(grid);
    let mut best: Option<SearchOutcome> = None;
    for solver in &solvers {
        let outcome = solver.run(&problem);
        if best.as_ref().map_or(true, |b| outcome.score > b.score) {
            best = Some(outcome);
        }
    }

    let outcome =
        best.ok_or_else(|| EnclosureError::Config("no strategies configured".into()))?;
    info!(
        event = "solve_end",
        strategy = outcome.strategy,
        score = outcome.score.total_score,
        escaped = outcome.score.escaped,
        strategies = solvers.len(),
    );
    Ok(outcome)
}

pub mod prelude {
    pub use super::{
        EnclosureScore, Grid, Problem, SearchConfig, SearchOutcome, Solver, StrategyConfig,
        TerminationConfig, ThreadCount, WallSet,
    };
    pub use enclosure_solver::{
        ExhaustiveStrategy, GeneticStrategy, GreedyStrategy, RandomStrategy, RingStrategy,
        SimulatedAnnealingStrategy, Strategy,
    };
}

#[cfg(test)]
mod tests;
