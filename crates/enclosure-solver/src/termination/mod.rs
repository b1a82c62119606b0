//! Termination conditions for strategy runs.
//!
//! Strategies poll [`SearchScope::is_terminated`] at iteration, generation
//! or node boundaries, never in the middle of an oracle call.

mod best_score;
mod composite;
mod external;
mod iteration_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use enclosure_config::TerminationConfig;

use crate::scope::SearchScope;

pub use best_score::BestScoreTermination;
pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use iteration_count::IterationCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedIterationCountTermination;

/// Trait for determining when to stop searching.
///
/// Implementations read the shared scope only, so one termination can serve
/// concurrent workers and consecutive runs.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the run should stop.
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool;
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        (**self).is_terminated(scope)
    }
}

/// Builds a termination that fires when any configured limit is reached.
///
/// An unbounded configuration yields an empty [`OrTermination`], which never
/// fires.
pub fn from_config(config: &TerminationConfig) -> OrTermination<Vec<Box<dyn Termination>>> {
    let mut terminations: Vec<Box<dyn Termination>> = Vec::new();
    if let Some(limit) = config.time_limit() {
        terminations.push(Box::new(TimeTermination::new(limit)));
    }
    if let Some(limit) = config.iteration_limit {
        terminations.push(Box::new(IterationCountTermination::new(limit)));
    }
    if let Some(limit) = config.unimproved_iteration_limit {
        terminations.push(Box::new(UnimprovedIterationCountTermination::new(limit)));
    }
    if let Some(target) = config.best_score_limit {
        terminations.push(Box::new(BestScoreTermination::new(target)));
    }
    OrTermination(terminations)
}
