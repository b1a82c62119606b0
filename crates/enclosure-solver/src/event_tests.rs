//! Tests for the event system.

use super::*;
use crate::problem::Problem;
use crate::scope::SearchScope;
use enclosure_core::{Grid, WallSet};

fn problem() -> Problem {
    Problem::new(Grid::builder(3, 3).start(4).budget(4).build().unwrap())
}

#[test]
fn test_events_new() {
    let events = SearchEvents::new();
    assert_eq!(events.listener_count(), 0);
    assert!(!events.has_listeners());
}

#[test]
fn test_counting_listener_sees_scope_improvements() {
    let problem = problem();
    let listener = Arc::new(CountingListener::new());
    let mut events = SearchEvents::new();
    events.add_listener(listener.clone());

    let scope = SearchScope::new(&problem, "test", 0).with_events(&events);
    let open = WallSet::empty();
    let boxed = WallSet::new(problem.grid(), [1, 3, 5, 7]).unwrap();

    scope.offer(&open, problem.evaluate(&open).score());
    scope.offer(&boxed, problem.evaluate(&boxed).score());
    // Not an improvement.
    scope.offer(&open, problem.evaluate(&open).score());

    assert_eq!(listener.improvement_count(), 2);

    let outcome = scope.into_outcome();
    events.fire_strategy_started("test");
    events.fire_strategy_ended("test", &outcome);
    assert_eq!(listener.started_count(), 1);
    assert_eq!(listener.ended_count(), 1);

    listener.reset();
    assert_eq!(listener.improvement_count(), 0);
}

#[test]
fn test_channel_listener_forwards_improvements() {
    let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
    let mut events = SearchEvents::new();
    events.add_listener(Arc::new(ChannelListener::new(sender)));

    let score = EnclosureScore::from_counts(false, 4, 1);
    events.fire_improvement("genetic", &score, 12);

    let event = receiver.try_recv().unwrap();
    assert_eq!(event.strategy, "genetic");
    assert_eq!(event.score.total_score, 7);
    assert_eq!(event.iteration, 12);
}

#[test]
fn test_channel_listener_ignores_closed_receiver() {
    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
    drop(receiver);
    let listener = ChannelListener::new(sender);
    listener.on_improvement("greedy", &EnclosureScore::default(), 0);
}

#[test]
fn test_clear_listeners() {
    let mut events = SearchEvents::new();
    events.add_listener(Arc::new(LoggingListener::new()));
    events.add_listener(Arc::new(CountingListener::new()));
    assert_eq!(events.listener_count(), 2);

    events.clear_listeners();
    assert!(!events.has_listeners());
}
