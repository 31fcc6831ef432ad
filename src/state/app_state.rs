//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::{
    services::{Badge, WakeEvent},
    timer::{restore, ObserverMessage, ObserverSender, Outcome, TimerContext, TimerEngine},
    utils::time::Hms,
};
use super::TimerSnapshot;

/// Main application state: the single owner of the countdown engine
#[derive(Debug)]
pub struct AppState {
    /// Countdown engine; commands and ticks take turns through this lock
    pub timer: Mutex<TimerEngine>,
    /// Channel observers subscribe to for tick and state pushes
    pub observer_tx: ObserverSender,
    /// Current badge surface
    pub badge_rx: watch::Receiver<Badge>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create an AppState around an already built engine
    pub fn new(engine: TimerEngine, badge_rx: watch::Receiver<Badge>, port: u16, host: String) -> Self {
        let observer_tx = engine.observers().clone();
        Self {
            timer: Mutex::new(engine),
            observer_tx,
            badge_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Recover the persisted countdown and wrap it
    pub fn restore(ctx: TimerContext, badge_rx: watch::Receiver<Badge>, port: u16, host: String) -> Self {
        Self::new(restore(ctx), badge_rx, port, host)
    }

    fn timer(&self) -> MutexGuard<'_, TimerEngine> {
        // Engine operations never leave the state half-updated, so a
        // poisoned lock is still safe to use
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a user command against the engine and record it as the last action
    fn command<T>(&self, action: &str, op: impl FnOnce(&mut TimerEngine) -> T) -> T {
        let result = op(&mut *self.timer());

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        result
    }

    pub fn start(&self, duration: Option<Hms>) -> Outcome {
        self.command("start", |timer| timer.start(duration))
    }

    pub fn stop(&self) -> Outcome {
        self.command("stop", |timer| timer.stop())
    }

    pub fn reset(&self) -> Outcome {
        self.command("reset", |timer| timer.reset())
    }

    pub fn set_time(&self, duration: Hms) -> Outcome {
        self.command("setTime", |timer| timer.set_time(duration))
    }

    pub fn toggle_alarm(&self, enabled: bool) -> Outcome {
        self.command("toggleAlarm", |timer| timer.toggle_alarm_setting(enabled))
    }

    pub fn clear_badge(&self) {
        self.command("clearBadge", |timer| timer.clear_badge())
    }

    pub fn test_alarm_sound(&self) -> bool {
        self.command("testAlarm", |timer| timer.test_alarm_sound())
    }

    /// Apply a firing delivered by the wake source, dropping stale ones
    pub fn on_wake(&self, event: &WakeEvent) -> Outcome {
        let outcome = self.timer().on_wake(event);
        debug!("Firing handled: {:?}", outcome);
        outcome
    }

    /// Drive one tick directly
    pub fn on_tick(&self) -> Outcome {
        let outcome = self.timer().on_tick();
        debug!("Tick handled: {:?}", outcome);
        outcome
    }

    /// Get current timer snapshot
    pub fn get_timer_state(&self) -> TimerSnapshot {
        self.timer().snapshot()
    }

    /// Get what the badge surface currently shows
    pub fn get_badge(&self) -> Badge {
        self.badge_rx.borrow().clone()
    }

    /// Attach a new observer
    pub fn subscribe(&self) -> broadcast::Receiver<ObserverMessage> {
        self.observer_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
