//! Per-run search bookkeeping.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use enclosure_core::{CandidateSet, EnclosureScore, Grid, WallSet};

use crate::event::SearchEvents;
use crate::outcome::{Improvement, SearchOutcome};
use crate::problem::Problem;
use crate::termination::Termination;

#[derive(Debug)]
struct Best {
    walls: WallSet,
    score: EnclosureScore,
}

/// Shared state of one strategy run.
///
/// A scope is `Sync`: concurrent restarts and islands of the same run share it
/// by reference and only meet at [`offer`](Self::offer). Everything else they
/// need (grid, candidates, random streams) is read-only or derived per worker.
///
/// # Example
///
/// ```
/// use enclosure_core::{Grid, WallSet};
/// use enclosure_solver::{Problem, SearchScope};
///
/// let problem = Problem::new(Grid::builder(3, 3).start(4).budget(4).build().unwrap());
/// let scope = SearchScope::new(&problem, "manual", 7);
///
/// let walls = problem.candidates().wall_set(&[1, 3, 4, 6]);
/// let score = problem.evaluate(&walls).score();
/// assert!(scope.offer(&walls, score));
///
/// let outcome = scope.into_outcome();
/// assert_eq!(outcome.total_score(), 1);
/// ```
pub struct SearchScope<'a> {
    problem: &'a Problem,
    strategy: &'static str,
    seed: u64,
    start: Instant,
    iterations: AtomicU64,
    last_improvement: AtomicU64,
    has_best: AtomicBool,
    best_total: AtomicU32,
    exhausted: AtomicBool,
    best: Mutex<Option<Best>>,
    improvements: Mutex<Vec<Improvement>>,
    termination: Option<&'a dyn Termination>,
    events: Option<&'a SearchEvents>,
}

impl<'a> SearchScope<'a> {
    pub fn new(problem: &'a Problem, strategy: &'static str, seed: u64) -> Self {
        Self {
            problem,
            strategy,
            seed,
            start: Instant::now(),
            iterations: AtomicU64::new(0),
            last_improvement: AtomicU64::new(0),
            has_best: AtomicBool::new(false),
            best_total: AtomicU32::new(0),
            exhausted: AtomicBool::new(false),
            best: Mutex::new(None),
            improvements: Mutex::new(Vec::new()),
            termination: None,
            events: None,
        }
    }

    /// Stops the run when `termination` fires.
    pub fn with_termination(mut self, termination: &'a dyn Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Reports new bests to `events`.
    pub fn with_events(mut self, events: &'a SearchEvents) -> Self {
        self.events = Some(events);
        self
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    pub fn grid(&self) -> &'a Grid {
        self.problem.grid()
    }

    pub fn candidates(&self) -> &'a CandidateSet {
        self.problem.candidates()
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns an independent random stream derived from the run seed.
    ///
    /// Workers of one run use distinct stream numbers, so results do not
    /// depend on thread scheduling.
    pub fn rng(&self, stream: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(stream);
        rng
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::Relaxed)
    }

    /// Counts one unit of strategy work and returns the new total.
    pub fn increment_iterations(&self) -> u64 {
        self.add_iterations(1)
    }

    /// Counts `n` units of strategy work and returns the new total.
    pub fn add_iterations(&self, n: u64) -> u64 {
        self.iterations.fetch_add(n, Ordering::Relaxed) + n
    }

    /// Returns the iterations counted since the last new best.
    pub fn iterations_since_improvement(&self) -> u64 {
        self.iterations()
            .saturating_sub(self.last_improvement.load(Ordering::Relaxed))
    }

    /// Returns true once anything has been offered.
    pub fn has_best(&self) -> bool {
        self.has_best.load(Ordering::Acquire)
    }

    /// Returns the best total score so far, zero before the first offer.
    pub fn best_total(&self) -> u32 {
        self.best_total.load(Ordering::Acquire)
    }

    pub fn best_score(&self) -> Option<EnclosureScore> {
        self.lock_best().as_ref().map(|best| best.score)
    }

    pub fn best_walls(&self) -> Option<WallSet> {
        self.lock_best().as_ref().map(|best| best.walls.clone())
    }

    /// Proposes a placement as the run's best.
    ///
    /// Returns true if `score` strictly beats the current best (the first
    /// offer always does). An equal score replaces the kept walls only when
    /// they sort first, so concurrent workers settle on the same answer
    /// whatever order they finish in.
    pub fn offer(&self, walls: &WallSet, score: EnclosureScore) -> bool {
        let mut best = self.lock_best();
        let improved = match best.as_ref() {
            None => true,
            Some(current) => score > current.score,
        };
        if !improved {
            let ties_lower = best.as_ref().is_some_and(|current| {
                score == current.score && walls.cells() < current.walls.cells()
            });
            if ties_lower {
                *best = Some(Best {
                    walls: walls.clone(),
                    score,
                });
            }
            return false;
        }

        *best = Some(Best {
            walls: walls.clone(),
            score,
        });
        self.best_total.store(score.total_score, Ordering::Release);
        self.has_best.store(true, Ordering::Release);
        let iteration = self.iterations();
        self.last_improvement.store(iteration, Ordering::Relaxed);
        // Pushed under the best lock so the history stays in score order.
        self.improvements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Improvement {
                elapsed: self.elapsed(),
                iteration,
                score,
            });
        drop(best);

        trace!(
            event = "offer_accepted",
            strategy = self.strategy,
            iteration,
            score = score.total_score,
        );
        if let Some(events) = self.events {
            events.fire_improvement(self.strategy, &score, iteration);
        }
        true
    }

    /// Records that the strategy covered its whole search space.
    pub fn mark_exhausted(&self) {
        self.exhausted.store(true, Ordering::Release);
    }

    /// Returns true if the configured termination has fired.
    pub fn is_terminated(&self) -> bool {
        self.termination
            .is_some_and(|termination| termination.is_terminated(self))
    }

    /// Finishes the run.
    ///
    /// If nothing was offered the empty wall set is evaluated, so the outcome
    /// is always well-formed.
    pub fn into_outcome(self) -> SearchOutcome {
        let elapsed = self.elapsed();
        let iterations = self.iterations();
        let proven_optimal = self.exhausted.load(Ordering::Acquire);
        let best = self.best.into_inner().unwrap_or_else(PoisonError::into_inner);
        let improvements = self
            .improvements
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        let (walls, score) = match best {
            Some(best) => (best.walls, best.score),
            None => {
                let walls = WallSet::empty();
                let score = self.problem.evaluate(&walls).score();
                (walls, score)
            }
        };

        SearchOutcome {
            strategy: self.strategy,
            walls,
            score,
            iterations,
            elapsed,
            improvements,
            proven_optimal,
            seed: self.seed,
        }
    }

    fn lock_best(&self) -> std::sync::MutexGuard<'_, Option<Best>> {
        self.best.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SearchScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScope")
            .field("strategy", &self.strategy)
            .field("seed", &self.seed)
            .field("iterations", &self.iterations())
            .field("best_total", &self.best_total())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosure_core::Grid;

    fn problem() -> Problem {
        Problem::new(Grid::builder(5, 5).start(12).budget(4).build().unwrap())
    }

    #[test]
    fn test_first_offer_is_accepted() {
        let problem = problem();
        let scope = SearchScope::new(&problem, "test", 1);
        assert!(!scope.has_best());

        let walls = WallSet::empty();
        let score = problem.evaluate(&walls).score();
        assert!(scope.offer(&walls, score));
        assert!(scope.has_best());
        assert_eq!(scope.best_total(), 0);
    }

    #[test]
    fn test_only_strict_improvements_are_reported() {
        let problem = problem();
        let scope = SearchScope::new(&problem, "test", 1);
        let ring = WallSet::new(problem.grid(), [7, 11, 13, 17]).unwrap();
        let score = problem.evaluate(&ring).score();

        assert!(scope.offer(&ring, score));
        assert!(!scope.offer(&ring, score));
        assert!(!scope.offer(&WallSet::empty(), problem.evaluate(&WallSet::empty()).score()));

        let outcome = scope.into_outcome();
        assert_eq!(outcome.walls, ring);
        assert_eq!(outcome.improvements.len(), 1);
        assert_eq!(outcome.total_score(), 1);
    }

    #[test]
    fn test_equal_score_keeps_smallest_walls() {
        let problem = problem();
        let scope = SearchScope::new(&problem, "test", 1);
        let a = WallSet::new(problem.grid(), [3]).unwrap();
        let b = WallSet::new(problem.grid(), [1]).unwrap();
        let score = problem.evaluate(&a).score();

        scope.offer(&a, score);
        scope.offer(&b, score);
        assert_eq!(scope.best_walls(), Some(b));
    }

    #[test]
    fn test_empty_scope_evaluates_empty_walls() {
        let problem = problem();
        let outcome = SearchScope::new(&problem, "test", 1).into_outcome();
        assert!(outcome.walls.is_empty());
        assert!(outcome.score.escaped);
        assert!(!outcome.proven_optimal);
    }

    #[test]
    fn test_iteration_tracking() {
        let problem = problem();
        let scope = SearchScope::new(&problem, "test", 1);
        scope.add_iterations(5);
        scope.offer(&WallSet::empty(), EnclosureScore::default());
        scope.increment_iterations();
        scope.increment_iterations();

        assert_eq!(scope.iterations(), 7);
        assert_eq!(scope.iterations_since_improvement(), 2);
    }

    #[test]
    fn test_rng_streams_are_reproducible() {
        use rand::Rng;

        let problem = problem();
        let scope = SearchScope::new(&problem, "test", 42);
        let a: u64 = scope.rng(3).random();
        let b: u64 = scope.rng(3).random();
        let c: u64 = scope.rng(4).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
