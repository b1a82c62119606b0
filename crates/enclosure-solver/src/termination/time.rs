//! Wall-clock deadline.

use std::time::Duration;

use super::Termination;
use crate::scope::SearchScope;

/// Stops a run once its elapsed time reaches `limit`.
///
/// Checked at iteration boundaries only, so a run overshoots by at most one
/// batch of oracle calls.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::termination::{Termination, TimeTermination};
/// use enclosure_solver::{Problem, SearchScope};
///
/// let problem = Problem::new(Grid::builder(3, 3).start(4).build().unwrap());
/// let scope = SearchScope::new(&problem, "manual", 0);
///
/// assert!(TimeTermination::millis(0).is_terminated(&scope));
/// assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self, scope: &SearchScope<'_>) -> Duration {
        self.limit.saturating_sub(scope.elapsed())
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        self.remaining(scope).is_zero()
    }
}
