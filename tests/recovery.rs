//! Restart recovery: a new process picks up exactly where the stored record
//! left off.

mod common;

use std::sync::Arc;

use common::{Harness, ManualWake, RecordingEffects, BrokenStore};
use countdown_daemon::{
    state::{TimerState, TimerStatus, DEFAULT_DURATION},
    storage::{FileStore, MemoryStore, StateStore},
    timer::{observer_channel, restore, Outcome, TimerContext},
    utils::time::Hms,
};
use tempfile::TempDir;

#[test]
fn test_first_run_persists_default_baseline() {
    let h = Harness::new();

    assert_eq!(h.engine.state(), &TimerState::new());
    assert_eq!(h.persisted(), TimerState::new());
    assert_eq!(h.persisted().remaining(), DEFAULT_DURATION);
    assert!(!h.armed());
}

#[test]
fn test_running_record_rearms_and_ticks_from_stored_remaining() {
    let mut h = Harness::with_store(MemoryStore::with_state(TimerState::running(Hms::new(0, 0, 42))));

    assert!(h.armed());
    assert_eq!(h.wake.arm_calls(), 1);
    assert_eq!(h.engine.state().remaining_seconds(), 42);

    assert_eq!(h.engine.on_tick(), Outcome::Applied);
    assert_eq!(h.engine.state().remaining_seconds(), 41);
    assert_eq!(h.persisted().remaining_seconds(), 41);
}

#[test]
fn test_stopped_record_stays_passive() {
    let mut h = Harness::with_store(MemoryStore::with_state(TimerState::stopped(Hms::new(0, 3, 0))));

    assert!(!h.armed());
    assert_eq!(h.wake.arm_calls(), 0);
    assert_eq!(h.engine.on_tick(), Outcome::Ignored);
    assert_eq!(h.engine.state().remaining(), Hms::new(0, 3, 0));
}

#[test]
fn test_running_record_at_zero_finishes_on_next_tick() {
    let mut h = Harness::with_store(MemoryStore::with_state(TimerState::running(Hms::zero())));

    assert!(h.armed());
    assert_eq!(h.engine.on_tick(), Outcome::Finished);
    assert_eq!(h.engine.state().status(), TimerStatus::Stopped);
    assert!(!h.armed());
    assert_eq!(h.effects.notifications(), 1);
}

#[test]
fn test_unreadable_store_falls_back_to_default() {
    let store = Arc::new(BrokenStore::default());
    let wake = Arc::new(ManualWake::default());
    let engine = restore(TimerContext {
        store: store.clone(),
        wake: wake.clone(),
        effects: Arc::new(RecordingEffects::default()),
        observers: observer_channel(),
    });

    assert_eq!(engine.state(), &TimerState::new());
    assert_eq!(store.save_attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_restart_mid_countdown_with_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timer.json");

    // first process: start and tick a few times, then vanish without stopping
    {
        let store = Arc::new(FileStore::new(&path));
        let mut engine = restore(TimerContext {
            store,
            wake: Arc::new(ManualWake::default()),
            effects: Arc::new(RecordingEffects::default()),
            observers: observer_channel(),
        });
        engine.start(Some(Hms::new(0, 0, 10)));
        for _ in 0..4 {
            engine.on_tick();
        }
    }

    // second process
    let wake = Arc::new(ManualWake::default());
    let mut engine = restore(TimerContext {
        store: Arc::new(FileStore::new(&path)),
        wake: wake.clone(),
        effects: Arc::new(RecordingEffects::default()),
        observers: observer_channel(),
    });
    assert!(engine.state().is_running());
    assert_eq!(engine.state().remaining_seconds(), 6);
    assert_eq!(engine.state().default_duration(), Hms::new(0, 0, 10));
    assert_eq!(wake.arm_calls(), 1);

    for _ in 0..5 {
        assert_eq!(engine.on_tick(), Outcome::Applied);
    }
    assert_eq!(engine.on_tick(), Outcome::Finished);

    let stored = FileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(stored.status(), TimerStatus::Stopped);
    assert_eq!(stored.remaining_seconds(), 0);
}

#[test]
fn test_corrupt_file_is_replaced_with_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timer.json");
    std::fs::write(&path, "not json at all").unwrap();

    let engine = restore(TimerContext {
        store: Arc::new(FileStore::new(&path)),
        wake: Arc::new(ManualWake::default()),
        effects: Arc::new(RecordingEffects::default()),
        observers: observer_channel(),
    });

    assert_eq!(engine.state(), &TimerState::new());
    assert_eq!(FileStore::new(&path).load().unwrap(), Some(TimerState::new()));
}
