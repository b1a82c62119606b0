//! Shared test fixtures for enclosure crates.
//!
//! - [`ascii`] - builds grids from ASCII rows
//! - [`grids`] - named puzzles with known answers
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! enclosure-test = { workspace = true }
//! ```
//!
//! Then build the grids you need:
//!
//! ```
//! use enclosure_test::grid_from_rows;
//!
//! let grid = grid_from_rows(&[
//!     "...",
//!     ".H.",
//!     "...",
//! ], 4);
//! assert_eq!(grid.start(), 4);
//! ```

pub mod ascii;
pub mod grids;

pub use ascii::{grid_from_rows, parse_rows};
pub use grids::{cherry_pocket, lake, open_grid, portal_escape, single_chokepoint};
