//! Solver: one configured strategy run.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use enclosure_config::ThreadCount;

use crate::event::{ImprovementListener, SearchEvents};
use crate::outcome::SearchOutcome;
use crate::parallel::with_thread_count;
use crate::problem::Problem;
use crate::scope::SearchScope;
use crate::strategy::Strategy;
use crate::termination::{ExternalTermination, OrTermination, Termination};

/// Runs a strategy with termination, seeding, parallelism and listeners.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::termination::IterationCountTermination;
/// use enclosure_solver::{GreedyStrategy, Problem, Solver};
///
/// let grid = Grid::builder(5, 5)
///     .start(12)
///     .water(7)
///     .water(11)
///     .water(17)
///     .budget(3)
///     .build()
///     .unwrap();
///
/// let solver = Solver::new(GreedyStrategy)
///     .with_termination(IterationCountTermination::new(1_000))
///     .with_random_seed(7);
/// let outcome = solver.run(&Problem::new(grid));
/// assert_eq!(outcome.walls.cells(), &[13]);
/// assert_eq!(outcome.seed, 7);
/// ```
pub struct Solver {
    strategy: Box<dyn Strategy>,
    termination: OrTermination<Vec<Box<dyn Termination>>>,
    random_seed: Option<u64>,
    thread_count: ThreadCount,
    events: SearchEvents,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("strategy", &self.strategy)
            .field("termination", &self.termination)
            .field("random_seed", &self.random_seed)
            .field("thread_count", &self.thread_count)
            .finish()
    }
}

impl Solver {
    /// Creates a solver for `strategy` with no termination.
    pub fn new(strategy: impl Strategy + 'static) -> Self {
        Self::from_boxed(Box::new(strategy))
    }

    pub fn from_boxed(strategy: Box<dyn Strategy>) -> Self {
        let terminate_early_flag = Arc::new(AtomicBool::new(false));
        Self {
            strategy,
            termination: OrTermination(vec![Box::new(ExternalTermination::new(
                terminate_early_flag.clone(),
            ))]),
            random_seed: None,
            thread_count: ThreadCount::Auto,
            events: SearchEvents::new(),
            terminate_early_flag,
            solving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds a termination condition; the run stops when any of them fires.
    pub fn with_termination(mut self, termination: impl Termination + 'static) -> Self {
        self.termination.0.push(Box::new(termination));
        self
    }

    /// Fixes the run seed. Unseeded runs draw one from the thread RNG.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_events(mut self, events: SearchEvents) -> Self {
        self.events = events;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn ImprovementListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    /// Requests early termination of a running search.
    ///
    /// Thread-safe. Returns false if nothing is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Returns true while [`run`](Self::run) is executing.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Runs the strategy on `problem`.
    ///
    /// Always returns a well-formed outcome, even if a termination fires
    /// before the strategy offers anything.
    pub fn run(&self, problem: &Problem) -> SearchOutcome {
        let seed = self.random_seed.unwrap_or_else(|| rand::rng().random());
        self.run_with_seed(problem, seed)
    }

    /// Runs the strategy on `problem` with an explicit seed, ignoring the
    /// configured one.
    pub fn run_with_seed(&self, problem: &Problem, seed: u64) -> SearchOutcome {
        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.solving.store(true, Ordering::SeqCst);

        let name = self.strategy.name();
        info!(
            event = "strategy_start",
            strategy = name,
            seed,
            candidates = problem.candidates().len(),
            budget = problem.grid().budget(),
            num_walls = problem.num_walls(),
        );
        self.events.fire_strategy_started(name);

        let outcome = with_thread_count(self.thread_count, || {
            let scope = SearchScope::new(problem, name, seed)
                .with_termination(&self.termination)
                .with_events(&self.events);
            self.strategy.solve(&scope);
            scope.into_outcome()
        });

        self.solving.store(false, Ordering::SeqCst);
        info!(
            event = "strategy_end",
            strategy = name,
            duration_ms = outcome.elapsed.as_millis() as u64,
            iterations = outcome.iterations,
            score = outcome.score.total_score,
            escaped = outcome.score.escaped,
            proven_optimal = outcome.proven_optimal,
        );
        self.events.fire_strategy_ended(name, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CountingListener;
    use crate::strategy::{GreedyStrategy, RandomStrategy};
    use crate::termination::IterationCountTermination;
    use enclosure_test::{lake, single_chokepoint};

    #[test]
    fn test_solver_runs_strategy() {
        let problem = Problem::new(single_chokepoint());
        let solver = Solver::new(GreedyStrategy).with_random_seed(3);

        assert_eq!(solver.name(), "greedy");
        assert!(!solver.is_solving());

        let outcome = solver.run(&problem);
        assert_eq!(outcome.strategy, "greedy");
        assert_eq!(outcome.seed, 3);
        assert!(outcome.is_enclosed());
        assert!(!solver.is_solving());
    }

    #[test]
    fn test_solver_applies_termination() {
        let problem = Problem::new(lake());
        let solver = Solver::new(RandomStrategy::new(10_000).with_batch_size(10))
            .with_termination(IterationCountTermination::new(25));

        let outcome = solver.run(&problem);
        assert_eq!(outcome.iterations, 30);
    }

    #[test]
    fn test_solver_fires_lifecycle_events() {
        let problem = Problem::new(single_chokepoint());
        let listener = Arc::new(CountingListener::new());
        let solver = Solver::new(GreedyStrategy).with_listener(listener.clone());

        solver.run(&problem);
        assert_eq!(listener.started_count(), 1);
        assert_eq!(listener.ended_count(), 1);
        assert!(listener.improvement_count() >= 1);
    }

    #[test]
    fn test_seeded_solver_is_reproducible() {
        let problem = Problem::new(lake());
        let solver = Solver::new(RandomStrategy::new(200))
            .with_random_seed(12)
            .with_thread_count(ThreadCount::Count(2));

        let first = solver.run(&problem);
        let second = solver.run(&problem);
        assert_eq!(first.walls, second.walls);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn test_terminate_early_when_idle() {
        let solver = Solver::new(GreedyStrategy);
        assert!(!solver.terminate_early());
    }
}
