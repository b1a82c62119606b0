//! Event system for search monitoring.
//!
//! Strategies never print. Progress is reported to registered listeners: a
//! new best from any worker, and the start and end of each strategy run.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use enclosure_core::EnclosureScore;
//! use enclosure_solver::event::{ImprovementListener, SearchEvents};
//!
//! #[derive(Debug)]
//! struct Printer;
//! impl ImprovementListener for Printer {
//!     fn on_improvement(&self, strategy: &str, score: &EnclosureScore, iteration: u64) {
//!         println!("{strategy}: {score} at {iteration}");
//!     }
//! }
//!
//! let mut events = SearchEvents::new();
//! events.add_listener(Arc::new(Printer));
//! assert_eq!(events.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use enclosure_core::EnclosureScore;

use crate::outcome::SearchOutcome;

/// Listener for search progress.
///
/// Called from worker threads, possibly concurrently.
pub trait ImprovementListener: Send + Sync + Debug {
    /// Called when a strategy finds a new best.
    ///
    /// # Arguments
    ///
    /// * `strategy` - Name of the strategy
    /// * `score` - The new best score
    /// * `iteration` - Strategy iteration count at the time
    fn on_improvement(&self, strategy: &str, score: &EnclosureScore, iteration: u64);

    /// Called when a strategy run starts.
    fn on_strategy_started(&self, _strategy: &str) {}

    /// Called when a strategy run ends.
    fn on_strategy_ended(&self, _strategy: &str, _outcome: &SearchOutcome) {}
}

/// Central event broadcaster.
///
/// Listener methods are called synchronously in registration order.
#[derive(Clone, Default)]
pub struct SearchEvents {
    listeners: Vec<Arc<dyn ImprovementListener>>,
}

impl SearchEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ImprovementListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn fire_improvement(&self, strategy: &str, score: &EnclosureScore, iteration: u64) {
        for listener in &self.listeners {
            listener.on_improvement(strategy, score, iteration);
        }
    }

    pub fn fire_strategy_started(&self, strategy: &str) {
        for listener in &self.listeners {
            listener.on_strategy_started(strategy);
        }
    }

    pub fn fire_strategy_ended(&self, strategy: &str, outcome: &SearchOutcome) {
        for listener in &self.listeners {
            listener.on_strategy_ended(strategy, outcome);
        }
    }
}

impl Debug for SearchEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEvents")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl LoggingListener {
    pub fn new() -> Self {
        Self
    }
}

impl ImprovementListener for LoggingListener {
    fn on_improvement(&self, strategy: &str, score: &EnclosureScore, iteration: u64) {
        debug!(
            event = "new_best",
            strategy,
            iteration,
            score = score.total_score,
            escaped = score.escaped,
            area = score.area,
        );
    }

    fn on_strategy_ended(&self, strategy: &str, outcome: &SearchOutcome) {
        info!(
            event = "strategy_result",
            strategy,
            score = outcome.score.total_score,
            walls = %outcome.walls,
            improvements = outcome.improvements.len(),
            proven_optimal = outcome.proven_optimal,
        );
    }
}

/// Counts event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingListener {
    improvement_count: AtomicUsize,
    started_count: AtomicUsize,
    ended_count: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn improvement_count(&self) -> usize {
        self.improvement_count.load(Ordering::SeqCst)
    }

    pub fn started_count(&self) -> usize {
        self.started_count.load(Ordering::SeqCst)
    }

    pub fn ended_count(&self) -> usize {
        self.ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.improvement_count.store(0, Ordering::SeqCst);
        self.started_count.store(0, Ordering::SeqCst);
        self.ended_count.store(0, Ordering::SeqCst);
    }
}

impl ImprovementListener for CountingListener {
    fn on_improvement(&self, _strategy: &str, _score: &EnclosureScore, _iteration: u64) {
        self.improvement_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_strategy_started(&self, _strategy: &str) {
        self.started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_strategy_ended(&self, _strategy: &str, _outcome: &SearchOutcome) {
        self.ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A new best, as sent by [`ChannelListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementEvent {
    pub strategy: String,
    pub score: EnclosureScore,
    pub iteration: u64,
}

/// Forwards improvements to a tokio channel.
///
/// Lets an async consumer follow a search running on blocking threads. Sends
/// after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: UnboundedSender<ImprovementEvent>,
}

impl ChannelListener {
    pub fn new(sender: UnboundedSender<ImprovementEvent>) -> Self {
        Self { sender }
    }
}

impl ImprovementListener for ChannelListener {
    fn on_improvement(&self, strategy: &str, score: &EnclosureScore, iteration: u64) {
        let _ = self.sender.send(ImprovementEvent {
            strategy: strategy.to_string(),
            score: *score,
            iteration,
        });
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
