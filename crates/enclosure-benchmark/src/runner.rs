//! Benchmark runner.

use std::cmp::Ordering;

use tracing::info;

use enclosure_config::{ConfigError, SearchConfig};
use enclosure_solver::{Problem, SearchEvents, Solver, StrategyBuilder};

use crate::config::BenchmarkConfig;
use crate::result::{compare_runs, BenchmarkResult, BenchmarkRun};

/// Runs a list of solvers against the same problem.
///
/// Each solver gets the configured warmup runs (discarded) and measurement
/// runs. Results come back in registration order; [`BenchmarkSummary::ranking`]
/// orders them.
///
/// # Example
///
/// ```
/// use enclosure_benchmark::{Benchmark, BenchmarkConfig};
/// use enclosure_core::Grid;
/// use enclosure_solver::{ExhaustiveStrategy, GreedyStrategy, Problem, Solver};
///
/// let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
/// let config = BenchmarkConfig::new("3x3").with_warmup_count(0).with_run_count(1);
///
/// let summary = Benchmark::new(config, "open 3x3", Problem::new(grid))
///     .with_solver(Solver::new(GreedyStrategy))
///     .with_solver(Solver::new(ExhaustiveStrategy::new()))
///     .run();
///
/// let winner = summary.ranking()[0];
/// assert_eq!(winner.best_score().unwrap().total_score, 1);
/// ```
#[derive(Debug)]
pub struct Benchmark {
    config: BenchmarkConfig,
    problem_name: String,
    problem: Problem,
    solvers: Vec<Solver>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig, problem_name: impl Into<String>, problem: Problem) -> Self {
        Self {
            config,
            problem_name: problem_name.into(),
            problem,
            solvers: Vec::new(),
        }
    }

    /// Registers every strategy of a search configuration, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `search` fails validation.
    pub fn from_search_config(
        config: BenchmarkConfig,
        problem_name: impl Into<String>,
        problem: Problem,
        search: &SearchConfig,
    ) -> Result<Self, ConfigError> {
        let mut benchmark = Self::new(config, problem_name, problem);
        benchmark.solvers = StrategyBuilder::solvers(search, &SearchEvents::new())?;
        Ok(benchmark)
    }

    /// Registers a solver; registration order breaks ranking ties.
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solvers.push(solver);
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn solver_count(&self) -> usize {
        self.solvers.len()
    }

    /// Runs the benchmark and returns aggregated results.
    ///
    /// Executes warmup runs first (not measured), then measurement runs.
    pub fn run(&self) -> BenchmarkSummary {
        let results = self
            .solvers
            .iter()
            .map(|solver| self.run_solver(solver))
            .collect();
        let summary = BenchmarkSummary {
            name: self.config.name().to_string(),
            problem_name: self.problem_name.clone(),
            results,
        };
        if let Some(winner) = summary.winner() {
            info!(
                event = "benchmark_end",
                benchmark = self.config.name(),
                winner = %winner.strategy_name,
                best_score = winner.best_score().map_or(0, |s| s.total_score),
            );
        }
        summary
    }

    fn run_solver(&self, solver: &Solver) -> BenchmarkResult {
        for _ in 0..self.config.warmup_count() {
            solver.run(&self.problem);
        }

        let mut result =
            BenchmarkResult::new(self.config.name(), solver.name(), &self.problem_name);
        for run_index in 0..self.config.run_count() {
            let outcome = match self.config.random_seed() {
                Some(seed) => {
                    solver.run_with_seed(&self.problem, seed.wrapping_add(run_index as u64))
                }
                None => solver.run(&self.problem),
            };
            info!(
                event = "benchmark_run",
                benchmark = self.config.name(),
                strategy = solver.name(),
                run = run_index,
                score = outcome.score.total_score,
                duration_ms = outcome.elapsed.as_millis() as u64,
            );
            result.add_run(BenchmarkRun::from_outcome(run_index, outcome));
        }
        result
    }
}

/// Results of every registered solver.
#[derive(Debug, Clone)]
pub struct BenchmarkSummary {
    pub name: String,
    pub problem_name: String,
    /// Per-solver results, in registration order.
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkSummary {
    /// Returns results best first.
    ///
    /// Ranked by best run score descending, then that run's solve time
    /// ascending, then registration order. Results without runs come last.
    pub fn ranking(&self) -> Vec<&BenchmarkResult> {
        let mut ranked: Vec<&BenchmarkResult> = self.results.iter().collect();
        // Stable: equal results keep registration order.
        ranked.sort_by(|a, b| match (a.best_run(), b.best_run()) {
            (Some(a), Some(b)) => compare_runs(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        ranked
    }

    /// Returns the top-ranked result.
    pub fn winner(&self) -> Option<&BenchmarkResult> {
        self.ranking().into_iter().next()
    }
}
