//! Strategy results.

use std::time::Duration;

use enclosure_core::{EnclosureScore, WallSet};

/// Record of a new best score during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    /// Time since the run started.
    pub elapsed: Duration,
    /// Iteration count when the improvement was found.
    pub iteration: u64,
    pub score: EnclosureScore,
}

/// What a strategy run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Name of the strategy that produced this outcome.
    pub strategy: &'static str,
    /// Best wall placement found.
    pub walls: WallSet,
    /// Score of `walls`.
    pub score: EnclosureScore,
    /// Strategy-specific work count (evaluations, generations, nodes, ...).
    pub iterations: u64,
    pub elapsed: Duration,
    /// Every new best, in the order found.
    pub improvements: Vec<Improvement>,
    /// True if the strategy explored its whole space, so `score` is optimal.
    pub proven_optimal: bool,
    /// Seed the run's random streams were derived from.
    pub seed: u64,
}

impl SearchOutcome {
    /// Returns the total score of the best placement.
    pub fn total_score(&self) -> u32 {
        self.score.total_score
    }

    /// Returns true if the best placement traps the agent.
    pub fn is_enclosed(&self) -> bool {
        self.score.is_enclosed()
    }
}
