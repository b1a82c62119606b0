//! Benchmarking framework for enclosure search strategies.
//!
//! This module provides types and utilities for running several strategies
//! against the same puzzle and collecting statistics.
//!
//! # Overview
//!
//! The benchmarking framework allows you to:
//! - Run multiple solvers against the same problem
//! - Execute warmup runs before measurement
//! - Rank strategies by score, then solve time, then registration order
//! - Aggregate best, worst and average scores and timings
//!
//! # Example
//!
//! ```
//! use enclosure_benchmark::BenchmarkConfig;
//!
//! let config = BenchmarkConfig::new("Lake Benchmark")
//!     .with_warmup_count(2)
//!     .with_run_count(5)
//!     .with_random_seed(42);
//!
//! assert_eq!(config.name(), "Lake Benchmark");
//! assert_eq!(config.warmup_count(), 2);
//! assert_eq!(config.run_count(), 5);
//! assert_eq!(config.random_seed(), Some(42));
//! ```

mod config;
mod result;
mod runner;

pub use config::BenchmarkConfig;
pub use result::{BenchmarkResult, BenchmarkRun};
pub use runner::{Benchmark, BenchmarkSummary};
