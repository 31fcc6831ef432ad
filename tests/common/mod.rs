//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use countdown_daemon::{
    error::{EffectError, EffectResult, StoreError, StoreResult},
    services::{Badge, Effects, WakeSource},
    state::TimerState,
    storage::{MemoryStore, StateStore},
    timer::{observer_channel, restore, ObserverMessage, ObserverSender, TimerContext, TimerEngine},
};
use tokio::sync::broadcast;

/// A side effect the engine asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCall {
    Badge(Badge),
    Notify { title: String, message: String },
    Alarm,
}

/// Records every effect request; can be told to fail dispatch
#[derive(Debug, Default)]
pub struct RecordingEffects {
    calls: Mutex<Vec<EffectCall>>,
    fail: AtomicBool,
}

impl RecordingEffects {
    pub fn failing() -> Self {
        let effects = Self::default();
        effects.fail.store(true, Ordering::SeqCst);
        effects
    }

    pub fn calls(&self) -> Vec<EffectCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn notifications(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, EffectCall::Notify { .. }))
            .count()
    }

    pub fn alarms(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, EffectCall::Alarm))
            .count()
    }

    pub fn badges(&self) -> Vec<Badge> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EffectCall::Badge(badge) => Some(badge),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: EffectCall) -> EffectResult {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(EffectError::Unavailable("test effects failing".into()))
        } else {
            Ok(())
        }
    }
}

impl Effects for RecordingEffects {
    fn set_badge(&self, badge: Badge) -> EffectResult {
        self.record(EffectCall::Badge(badge))
    }

    fn notify(&self, title: &str, message: &str) -> EffectResult {
        self.record(EffectCall::Notify {
            title: title.to_string(),
            message: message.to_string(),
        })
    }

    fn play_alarm(&self) -> EffectResult {
        self.record(EffectCall::Alarm)
    }
}

/// Wake source that only tracks which schedules are armed; ticks are
/// driven by calling `on_tick` directly
#[derive(Debug, Default)]
pub struct ManualWake {
    armed: Mutex<HashSet<String>>,
    arms: AtomicUsize,
}

impl ManualWake {
    pub fn arm_calls(&self) -> usize {
        self.arms.load(Ordering::SeqCst)
    }
}

impl WakeSource for ManualWake {
    fn arm(&self, name: &str) {
        self.arms.fetch_add(1, Ordering::SeqCst);
        self.armed.lock().unwrap().insert(name.to_string());
    }

    fn disarm(&self, name: &str) {
        self.armed.lock().unwrap().remove(name);
    }

    fn is_armed(&self, name: &str) -> bool {
        self.armed.lock().unwrap().contains(name)
    }
}

/// Store whose every operation fails
#[derive(Debug, Default)]
pub struct BrokenStore {
    pub save_attempts: AtomicUsize,
}

impl StateStore for BrokenStore {
    fn name(&self) -> &str {
        "BrokenStore"
    }

    fn load(&self) -> StoreResult<Option<TimerState>> {
        Err(StoreError::Unavailable("disk on fire".into()))
    }

    fn save(&self, _state: &TimerState) -> StoreResult<()> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("disk on fire".into()))
    }
}

/// Entry in the persist/notify journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Journal {
    Save,
    Message(&'static str),
}

/// Store that journals saves interleaved with observer messages seen so far
pub struct JournalStore {
    rx: Mutex<broadcast::Receiver<ObserverMessage>>,
    entries: Mutex<Vec<Journal>>,
}

impl JournalStore {
    pub fn new(observers: &ObserverSender) -> Self {
        Self {
            rx: Mutex::new(observers.subscribe()),
            entries: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) {
        let mut rx = self.rx.lock().unwrap();
        let mut entries = self.entries.lock().unwrap();
        while let Ok(message) = rx.try_recv() {
            entries.push(Journal::Message(message.kind()));
        }
    }

    /// Journal so far, including messages published after the last save
    pub fn entries(&self) -> Vec<Journal> {
        self.drain();
        self.entries.lock().unwrap().clone()
    }
}

impl StateStore for JournalStore {
    fn name(&self) -> &str {
        "JournalStore"
    }

    fn load(&self) -> StoreResult<Option<TimerState>> {
        Ok(None)
    }

    fn save(&self, _state: &TimerState) -> StoreResult<()> {
        self.drain();
        self.entries.lock().unwrap().push(Journal::Save);
        Ok(())
    }
}

/// Engine wired to test doubles
pub struct Harness {
    pub engine: TimerEngine,
    pub store: Arc<MemoryStore>,
    pub wake: Arc<ManualWake>,
    pub effects: Arc<RecordingEffects>,
    pub observers: ObserverSender,
}

impl Harness {
    /// Fresh process with nothing persisted
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Process starting up against an existing store
    pub fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let wake = Arc::new(ManualWake::default());
        let effects = Arc::new(RecordingEffects::default());
        let observers = observer_channel();
        let engine = restore(TimerContext {
            store: store.clone(),
            wake: wake.clone(),
            effects: effects.clone(),
            observers: observers.clone(),
        });
        Self {
            engine,
            store,
            wake,
            effects,
            observers,
        }
    }

    pub fn armed(&self) -> bool {
        self.wake.is_armed(countdown_daemon::services::TIMER_SCHEDULE)
    }

    pub fn persisted(&self) -> TimerState {
        self.store.stored().expect("state should be persisted")
    }
}
