//! Search strategies.
//!
//! Every strategy consumes a [`Problem`] through a [`SearchScope`], scores
//! placements with the reachability oracle only, and reports candidates for
//! the run's best through [`SearchScope::offer`].
//!
//! | strategy            | one iteration is       |
//! |---------------------|------------------------|
//! | greedy              | an oracle call         |
//! | genetic             | a generation           |
//! | simulated annealing | a neighbour evaluation |
//! | exhaustive          | an expanded node       |
//! | ring                | a combination          |
//! | random              | a sample               |

mod annealing;
mod chokepoint;
mod exhaustive;
mod genetic;
mod greedy;
mod random;
mod ring;

use std::fmt::Debug;

use crate::outcome::SearchOutcome;
use crate::problem::Problem;
use crate::scope::SearchScope;

pub use annealing::{SimulatedAnnealingAcceptor, SimulatedAnnealingStrategy};
pub use chokepoint::{ChokepointAnalyzer, RankedCell};
pub use exhaustive::ExhaustiveStrategy;
pub use genetic::GeneticStrategy;
pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use ring::RingStrategy;

/// An optimization strategy over wall placements.
pub trait Strategy: Send + Sync + Debug {
    /// Returns the strategy type name used in logs and results.
    fn name(&self) -> &'static str;

    /// Searches until done or until `scope` terminates.
    fn solve(&self, scope: &SearchScope<'_>);

    /// Runs the strategy alone, without termination or listeners.
    fn run(&self, problem: &Problem, seed: u64) -> SearchOutcome {
        let scope = SearchScope::new(problem, self.name(), seed);
        self.solve(&scope);
        scope.into_outcome()
    }
}

#[cfg(test)]
mod tests;
