//! Budgeted depth-first search over wall subsets.

use tracing::debug;

use enclosure_config::ExhaustiveConfig;
use enclosure_core::ReachabilityOracle;

use super::Strategy;
use crate::scope::SearchScope;

/// Enumerates wall subsets of up to `num_walls` candidates, depth first.
///
/// Subsets are grown in increasing candidate order. A node only branches on
/// candidates the agent can still reach: a wall outside the reachable region
/// changes nothing, so every score is still covered. Enclosed nodes are not
/// expanded since more walls can only shrink the enclosure.
///
/// If the search completes without hitting its node limit or termination the
/// outcome is marked proven optimal.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::{ExhaustiveStrategy, Problem, Strategy};
///
/// let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
/// let outcome = ExhaustiveStrategy::new().run(&Problem::new(grid), 0);
/// assert_eq!(outcome.walls.cells(), &[1, 3, 5, 7]);
/// assert!(outcome.proven_optimal);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveStrategy {
    node_limit: Option<u64>,
}

impl ExhaustiveStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExhaustiveConfig) -> Self {
        Self {
            node_limit: config.node_limit,
        }
    }

    /// Stops after expanding `node_limit` nodes.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    fn limit_reached(&self, scope: &SearchScope<'_>) -> bool {
        match self.node_limit {
            Some(limit) => scope.iterations() >= limit,
            None => false,
        }
    }
}

impl Strategy for ExhaustiveStrategy {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        let grid = scope.grid();
        let candidates = scope.candidates();
        let k = scope.problem().num_walls();
        let mut oracle = ReachabilityOracle::new(grid);

        let mut stack: Vec<Vec<usize>> = vec![Vec::new()];
        let mut best = None;
        let mut aborted = false;

        while let Some(node) = stack.pop() {
            if self.limit_reached(scope) || scope.is_terminated() {
                aborted = true;
                break;
            }
            scope.increment_iterations();

            let walls = candidates.wall_set(&node);
            let score = oracle.score(grid, &walls);
            if best.map_or(true, |best| score > best) {
                best = Some(score);
                scope.offer(&walls, score);
            }
            if score.is_enclosed() || node.len() >= k {
                continue;
            }

            let next = node.last().map_or(0, |&last| last + 1);
            let mut children: Vec<usize> = oracle
                .visited()
                .iter()
                .filter_map(|&cell| candidates.position_of(cell))
                .filter(|&position| position >= next)
                .collect();
            children.sort_unstable();
            // Reversed so the smallest child is expanded first.
            for &position in children.iter().rev() {
                let mut child = Vec::with_capacity(node.len() + 1);
                child.extend_from_slice(&node);
                child.push(position);
                stack.push(child);
            }
        }

        if !aborted {
            scope.mark_exhausted();
        }
        debug!(
            event = "exhaustive_end",
            nodes = scope.iterations(),
            complete = !aborted,
            pending = stack.len(),
        );
    }
}
