//! Greedy wall-by-wall construction.

use tracing::trace;

use enclosure_core::{EnclosureScore, ReachabilityOracle, WallSet};

use super::Strategy;
use crate::parallel::score_batch;
use crate::scope::SearchScope;

/// Places one wall at a time, always the one that helps most right now.
///
/// Each step scores every remaining candidate added to the current walls.
/// An enclosing candidate wins (highest total score first); otherwise the
/// one leaving the smallest reachable area. Ties go to the earlier
/// candidate. The search stops once the agent is enclosed, the budget is
/// spent, or no candidate shrinks the reachable area.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::{GreedyStrategy, Problem, Strategy};
///
/// // Water on three sides: the only way out is cell 13.
/// let grid = Grid::builder(5, 5)
///     .start(12)
///     .water(7)
///     .water(11)
///     .water(17)
///     .budget(3)
///     .build()
///     .unwrap();
/// let outcome = GreedyStrategy::new().run(&Problem::new(grid), 0);
/// assert_eq!(outcome.walls.cells(), &[13]);
/// assert_eq!(outcome.total_score(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Returns true if `candidate` is a better greedy step than `best`.
fn is_better_step(candidate: &EnclosureScore, best: &EnclosureScore) -> bool {
    match (candidate.escaped, best.escaped) {
        (false, true) => true,
        (true, false) => false,
        (false, false) => candidate.total_score > best.total_score,
        (true, true) => candidate.area < best.area,
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        let grid = scope.grid();
        let candidates = scope.candidates();
        let mut oracle = ReachabilityOracle::new(grid);

        let mut pool: Vec<usize> = (0..candidates.len()).collect();
        let mut current: Vec<usize> = Vec::new();
        let mut score = oracle.score(grid, &WallSet::empty());
        scope.increment_iterations();
        scope.offer(&WallSet::empty(), score);

        while current.len() < grid.budget() && score.escaped && !pool.is_empty() {
            if scope.is_terminated() {
                break;
            }

            let trials = score_batch(grid, &pool, |&p| candidates.wall_set_with(&current, p));
            scope.add_iterations(trials.len() as u64);

            let mut chosen = 0;
            for (index, trial) in trials.iter().enumerate().skip(1) {
                if is_better_step(trial, &trials[chosen]) {
                    chosen = index;
                }
            }
            let step = trials[chosen];
            if step.escaped && step.area >= score.area {
                trace!(event = "greedy_stalled", walls = current.len());
                break;
            }

            current.push(pool.remove(chosen));
            score = step;
            scope.offer(&candidates.wall_set(&current), score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use enclosure_test::{cherry_pocket, open_grid, single_chokepoint};

    #[test]
    fn test_picks_single_chokepoint_first() {
        let problem = Problem::new(single_chokepoint());
        let outcome = GreedyStrategy::new().run(&problem, 0);

        assert_eq!(outcome.walls.cells(), &[13]);
        assert!(outcome.is_enclosed());
        assert_eq!(outcome.total_score(), 1);
    }

    #[test]
    fn test_zero_budget_returns_empty_evaluation() {
        let problem = Problem::new(open_grid(5, 5, 0));
        let outcome = GreedyStrategy::new().run(&problem, 0);

        assert!(outcome.walls.is_empty());
        assert!(outcome.score.escaped);
        assert_eq!(outcome.total_score(), 0);
    }

    #[test]
    fn test_stops_when_budget_spent() {
        let problem = Problem::new(open_grid(7, 7, 2));
        let outcome = GreedyStrategy::new().run(&problem, 0);

        assert_eq!(outcome.walls.len(), 2);
        assert!(outcome.score.escaped);
        assert_eq!(outcome.score, problem.evaluate(&outcome.walls).score());
    }

    #[test]
    fn test_result_matches_oracle() {
        let problem = Problem::new(cherry_pocket());
        let outcome = GreedyStrategy::new().run(&problem, 0);

        let result = problem.evaluate(&outcome.walls);
        assert_eq!(outcome.score, result.score());
        assert!(outcome.walls.len() <= problem.grid().budget());
    }

    #[test]
    fn test_counts_oracle_calls() {
        let problem = Problem::new(single_chokepoint());
        let outcome = GreedyStrategy::new().run(&problem, 0);

        // Empty placement plus one sweep over every candidate.
        assert_eq!(outcome.iterations, 1 + problem.candidates().len() as u64);
    }

    #[test]
    fn test_is_better_step() {
        let enclosed_small = EnclosureScore::from_counts(false, 2, 0);
        let enclosed_big = EnclosureScore::from_counts(false, 5, 0);
        let escaped_small = EnclosureScore::from_counts(true, 10, 0);
        let escaped_big = EnclosureScore::from_counts(true, 20, 0);

        assert!(is_better_step(&enclosed_small, &escaped_small));
        assert!(is_better_step(&enclosed_big, &enclosed_small));
        assert!(is_better_step(&escaped_small, &escaped_big));
        assert!(!is_better_step(&escaped_small, &escaped_small));
    }
}
