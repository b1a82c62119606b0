//! Termination based on lack of improvement.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates if no new best is found for a number of iterations.
///
/// Useful to stop a stochastic strategy once it has plateaued.
#[derive(Debug, Clone)]
pub struct UnimprovedIterationCountTermination {
    limit: u64,
}

impl UnimprovedIterationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedIterationCountTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.has_best() && scope.iterations_since_improvement() >= self.limit
    }
}
