//! Iteration count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of strategy iterations.
///
/// What counts as an iteration depends on the strategy: oracle calls for
/// greedy, generations for genetic search, nodes for exhaustive search.
#[derive(Debug, Clone)]
pub struct IterationCountTermination {
    limit: u64,
}

impl IterationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for IterationCountTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.iterations() >= self.limit
    }
}
