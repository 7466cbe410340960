mod common;

use std::rc::Rc;

use action_list::{ActionError, Parallel, Sequence, Shared, StartState};
use common::{Probe, calls, journal};

#[test]
fn start_starts_every_child() {
    let log = journal();
    let parallel = Parallel::new();
    for label in ["A", "B", "C"] {
        parallel
            .add_action(Box::new(Probe::new(label, 1.0, &log)))
            .unwrap();
    }
    assert!(calls(&log, "start").is_empty());

    parallel.start().unwrap();

    let mut started = calls(&log, "start");
    started.sort();
    assert_eq!(started, ["A", "B", "C"]);
}

#[test]
fn late_addition_starts_once() {
    let log = journal();
    let parallel = Parallel::new();
    parallel
        .add_action(Box::new(Probe::new("early", 2.0, &log)))
        .unwrap();
    parallel.start().unwrap();
    parallel
        .add_action(Box::new(Probe::new("late", 2.0, &log)))
        .unwrap();

    assert_eq!(calls(&log, "start"), ["early", "late"]);

    parallel.update(1.0).unwrap();
    parallel.update(1.0).unwrap();
    assert!(parallel.is_over());
    assert_eq!(calls(&log, "start").len(), 2);
    assert_eq!(calls(&log, "end").len(), 2);
}

#[test]
fn two_durations_scenario() {
    let log = journal();
    let y = Shared::new(Probe::new("Y", 5.0, &log));
    let parallel = Parallel::new();
    parallel
        .add_action(Box::new(Probe::new("X", 1.0, &log)))
        .unwrap();
    parallel.add_action(Box::new(y.clone())).unwrap();
    parallel.start().unwrap();

    parallel.update(1.0).unwrap();
    assert_eq!(calls(&log, "end"), ["X"]);
    assert_eq!(parallel.len(), 1);
    assert_eq!(y.borrow().elapsed(), 1.0);
    assert!(!parallel.is_over());

    parallel.update(4.0).unwrap();
    assert_eq!(y.borrow().elapsed(), 5.0);
    assert_eq!(calls(&log, "end"), ["X", "Y"]);
    assert!(parallel.is_over());
}

#[test]
fn ended_child_is_never_updated_in_the_same_pass() {
    let log = journal();
    let parallel = Parallel::new();
    parallel
        .add_action(Box::new(Probe::new("A", 0.0, &log)))
        .unwrap();
    parallel
        .add_action(Box::new(Probe::new("B", 3.0, &log)))
        .unwrap();
    parallel.start().unwrap();

    parallel.update(1.0).unwrap();

    assert_eq!(calls(&log, "end"), ["A"]);
    assert_eq!(calls(&log, "update"), ["B"]);
}

#[test]
fn end_can_add_a_sibling() {
    let log = journal();
    let parallel = Parallel::new();
    let handle = parallel.handle();
    let follow_up = Rc::clone(&log);

    parallel
        .add_action(Box::new(Probe::new("A", 1.0, &log).on_end(move || {
            handle.add_action(Box::new(Probe::new("S", 1.0, &follow_up)))
        })))
        .unwrap();
    parallel.start().unwrap();

    // A finishes and is ended in this pass; S starts on arrival but only
    // receives dt from the next pass.
    parallel.update(1.0).unwrap();
    assert_eq!(calls(&log, "start"), ["A", "S"]);
    assert_eq!(calls(&log, "update"), ["A"]);
    assert!(!parallel.is_over());

    parallel.update(1.0).unwrap();
    assert_eq!(calls(&log, "update"), ["A", "S"]);
    assert_eq!(calls(&log, "end"), ["A", "S"]);
    assert!(parallel.is_over());
}

#[test]
fn child_failure_propagates_without_losing_siblings() {
    let log = journal();
    let parallel = Parallel::new();
    parallel
        .add_action(Box::new(
            Probe::new("A", 0.0, &log).on_end(|| Err(ActionError::failed("jammed"))),
        ))
        .unwrap();
    parallel
        .add_action(Box::new(Probe::new("B", 2.0, &log)))
        .unwrap();
    parallel.start().unwrap();

    let err = parallel.update(1.0).unwrap_err();
    assert_eq!(err.to_string(), "jammed");
    assert_eq!(parallel.len(), 1);

    parallel.update(1.0).unwrap();
    assert!(!parallel.is_over());
    parallel.update(1.0).unwrap();
    assert!(parallel.is_over());
}

#[test]
fn parallel_runs_as_a_sequence_child() {
    let log = journal();
    let parallel = Parallel::new();
    let handle = parallel.handle();
    parallel
        .add_action(Box::new(Probe::new("A", 1.0, &log)))
        .unwrap();

    let sequence = Sequence::new();
    sequence.add_action(Box::new(parallel)).unwrap();
    assert_eq!(calls(&log, "start"), ["A"]);

    sequence.update(1.0).unwrap();
    assert!(sequence.is_over());
    assert_eq!(calls(&log, "end"), ["A"]);

    // The set was dropped with the sequence's queue.
    assert!(!handle.is_attached());
}

#[test]
fn start_state_tracks_the_initial_pass() {
    let parallel = Parallel::new();
    assert_eq!(parallel.start_state(), StartState::NotStarted);
    parallel.start().unwrap();
    assert_eq!(parallel.start_state(), StartState::Started);
}

#[test]
fn sequence_runs_as_a_parallel_child() {
    let log = journal();
    let sequence = Sequence::new();
    sequence
        .add_action(Box::new(Probe::new("S1", 1.0, &log)))
        .unwrap();
    sequence
        .add_action(Box::new(Probe::new("S2", 1.0, &log)))
        .unwrap();

    let parallel = Parallel::new();
    parallel.add_action(Box::new(sequence)).unwrap();
    parallel.start().unwrap();
    assert_eq!(calls(&log, "start"), ["S1"]);

    parallel.update(1.0).unwrap();
    assert_eq!(calls(&log, "start"), ["S1", "S2"]);
    assert_eq!(calls(&log, "end"), ["S1"]);
    assert!(!parallel.is_over());

    parallel.update(1.0).unwrap();
    assert_eq!(calls(&log, "end"), ["S1", "S2"]);
    assert!(parallel.is_over());
}
