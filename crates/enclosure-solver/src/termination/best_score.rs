//! Target score termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the best total score reaches a target.
///
/// Typically the puzzle's published optimum: nothing can beat it, so the
/// remaining time would be wasted.
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target: u32,
}

impl BestScoreTermination {
    pub fn new(target: u32) -> Self {
        Self { target }
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

impl Termination for BestScoreTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.has_best() && scope.best_total() >= self.target
    }
}
