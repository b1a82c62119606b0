//! Enclosure Search Strategies
//!
//! This crate provides the search side of the enclosure puzzle:
//! - Problem and per-run SearchScope
//! - Strategies (greedy, genetic, simulated annealing, exhaustive, ring, random)
//! - Chokepoint ranking used to seed other strategies
//! - Termination conditions
//! - Event system for monitoring
//! - Configuration wiring (builder module)
//!
//! Every strategy scores placements through the reachability oracle of
//! `enclosure-core` only, so outcomes of different strategies compare
//! directly.

pub mod builder;
pub mod event;
pub mod genes;
pub mod outcome;
pub mod parallel;
pub mod problem;
pub mod scope;
pub mod solver;
pub mod strategy;
pub mod termination;

pub use builder::StrategyBuilder;
pub use event::{
    ChannelListener, CountingListener, ImprovementEvent, ImprovementListener, LoggingListener,
    SearchEvents,
};
pub use outcome::{Improvement, SearchOutcome};
pub use problem::Problem;
pub use scope::SearchScope;
pub use solver::Solver;
pub use strategy::{
    ChokepointAnalyzer, ExhaustiveStrategy, GeneticStrategy, GreedyStrategy, RandomStrategy,
    RankedCell, RingStrategy, SimulatedAnnealingAcceptor, SimulatedAnnealingStrategy, Strategy,
};
pub use termination::{
    AndTermination, BestScoreTermination, ExternalTermination, IterationCountTermination,
    OrTermination, Termination, TimeTermination, UnimprovedIterationCountTermination,
};
