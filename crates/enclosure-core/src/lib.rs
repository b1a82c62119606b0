//! Enclosure Core - grid model and scoring for enclosure search
//!
//! This crate provides the fundamental pieces every search strategy builds on:
//! - [`Grid`]: the immutable puzzle description
//! - [`CandidateSet`]: the cells eligible to hold a wall
//! - [`WallSet`]: a trial wall placement overlaid on a grid
//! - [`ReachabilityOracle`]: the scoring primitive
//! - Score types for representing enclosure quality

pub mod candidates;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod score;
pub mod wall_set;

pub use candidates::CandidateSet;
pub use error::{EnclosureError, Result};
pub use grid::{CellId, ChannelId, Grid, GridBuilder, Terrain};
pub use oracle::{escape_path, evaluate, ReachabilityOracle};
pub use score::{EnclosureScore, ScoreResult, CHERRY_BONUS};
pub use wall_set::WallSet;

#[cfg(test)]
mod wall_set_tests;
