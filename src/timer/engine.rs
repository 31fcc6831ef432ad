//! Countdown state machine.
//!
//! The engine owns the canonical [`TimerState`] and is driven from two
//! places only: user commands and wake-source firings (`on_tick`). It has
//! no thread of its own and never blocks.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! Running --on_tick (reaches zero)--> Stopped   (finished)
//! any     --reset--> Stopped
//! ```
//!
//! `Running` always has the [`TIMER_SCHEDULE`] armed and `Stopped` never
//! does. Every state change ends by persisting the state and then pushing
//! it to observers, so anything an observer has seen is already durable.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::EffectResult,
    services::{Badge, Effects, WakeEvent, WakeSource, TIMER_SCHEDULE},
    state::{TimerSnapshot, TimerState, TimerStatus},
    storage::StateStore,
    utils::time::Hms,
};
use super::observer::{publish, ObserverMessage, ObserverSender};

pub const FINISHED_TITLE: &str = "Time's up!";
pub const FINISHED_MESSAGE: &str = "Countdown timer has finished.";

/// Countdowns at or above this many seconds do not update the badge
const BADGE_THRESHOLD_SECS: u64 = 3600;

/// Collaborators the engine talks to
#[derive(Clone)]
pub struct TimerContext {
    pub store: Arc<dyn StateStore>,
    pub wake: Arc<dyn WakeSource>,
    pub effects: Arc<dyn Effects>,
    pub observers: ObserverSender,
}

/// What an operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// State changed and was persisted
    Applied,
    /// The countdown reached zero and the finished effects were requested
    Finished,
    /// Invalid in the current state; nothing changed
    Rejected,
    /// Nothing to do (e.g. a tick arriving after stop)
    Ignored,
}

pub struct TimerEngine {
    state: TimerState,
    ctx: TimerContext,
}

impl TimerEngine {
    /// Wrap an existing state. Does not touch the wake source; use
    /// [`restore`](super::recovery::restore) at process start.
    pub fn new(state: TimerState, ctx: TimerContext) -> Self {
        Self { state, ctx }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    pub fn observers(&self) -> &ObserverSender {
        &self.ctx.observers
    }

    /// Start counting down, optionally from a new duration.
    ///
    /// Starting at zero runs the finish sequence right away instead of
    /// leaving a running timer with nothing to count.
    pub fn start(&mut self, duration: Option<Hms>) -> Outcome {
        if self.state.is_running() {
            warn!("Rejecting start: timer already running");
            return Outcome::Rejected;
        }

        if let Some(duration) = duration {
            self.state.apply_duration(duration);
        }

        self.request("clear badge", self.ctx.effects.set_badge(Badge::cleared()));

        if self.state.remaining_seconds() == 0 {
            info!("Started with nothing remaining");
            self.finish();
            return Outcome::Finished;
        }

        self.state.set_status(TimerStatus::Running);
        self.ctx.wake.arm(TIMER_SCHEDULE);
        info!("Timer started with {} remaining", self.state.display_time());
        self.commit();
        Outcome::Applied
    }

    /// Pause; the remaining time is kept as is
    pub fn stop(&mut self) -> Outcome {
        self.ctx.wake.disarm(TIMER_SCHEDULE);
        if !self.state.is_running() {
            debug!("Stop requested while already stopped");
            return Outcome::Ignored;
        }

        self.state.set_status(TimerStatus::Stopped);
        info!("Timer stopped with {} remaining", self.state.display_time());
        self.commit();
        Outcome::Applied
    }

    /// Stop and restore the default duration
    pub fn reset(&mut self) -> Outcome {
        self.state.restore_default();
        self.state.set_status(TimerStatus::Stopped);
        self.request("clear badge", self.ctx.effects.set_badge(Badge::cleared()));
        self.ctx.wake.disarm(TIMER_SCHEDULE);
        info!("Timer reset to {}", self.state.display_time());
        self.commit();
        Outcome::Applied
    }

    /// Set a new duration without starting. Only valid while stopped.
    pub fn set_time(&mut self, duration: Hms) -> Outcome {
        if self.state.is_running() {
            warn!("Rejecting setTime while running");
            return Outcome::Rejected;
        }

        self.state.apply_duration(duration);
        debug!("Time set to {}", self.state.display_time());
        self.commit();
        Outcome::Applied
    }

    pub fn toggle_alarm_setting(&mut self, enabled: bool) -> Outcome {
        self.state.set_sound_alarm(enabled);
        debug!("Alarm sound {}", if enabled { "enabled" } else { "disabled" });
        self.commit();
        Outcome::Applied
    }

    /// Handle a firing delivered by the wake source. Firings from an
    /// earlier arming of the schedule are dropped, so a stop followed by a
    /// start never inherits a tick queued before the stop.
    pub fn on_wake(&mut self, event: &WakeEvent) -> Outcome {
        if !self.ctx.wake.is_current(event) {
            debug!("Dropping stale firing of {} (generation {})", event.schedule, event.generation);
            return Outcome::Ignored;
        }
        self.on_tick()
    }

    /// Handle one wake-source firing
    pub fn on_tick(&mut self) -> Outcome {
        if !self.state.is_running() {
            debug!("Ignoring tick while stopped");
            return Outcome::Ignored;
        }

        let next = self.state.remaining_seconds().saturating_sub(1);
        if next == 0 {
            self.finish();
            return Outcome::Finished;
        }

        self.state.set_remaining_seconds(next);
        if next < BADGE_THRESHOLD_SECS {
            let badge = Badge::countdown(&self.state.remaining());
            self.request("countdown badge", self.ctx.effects.set_badge(badge));
        }

        self.persist();
        publish(
            &self.ctx.observers,
            ObserverMessage::Tick {
                display_time: self.state.display_time(),
            },
        );
        Outcome::Applied
    }

    pub fn clear_badge(&self) {
        self.request("clear badge", self.ctx.effects.set_badge(Badge::cleared()));
    }

    /// Play the alarm without touching the countdown. Follows the sound
    /// setting, like the real alarm does. Always acknowledged.
    pub fn test_alarm_sound(&self) -> bool {
        if self.state.sound_alarm() {
            self.request("test alarm sound", self.ctx.effects.play_alarm());
        } else {
            debug!("Test alarm skipped, sound disabled");
        }
        true
    }

    fn finish(&mut self) {
        self.state.set_status(TimerStatus::Stopped);
        self.state.set_remaining_seconds(0);
        self.ctx.wake.disarm(TIMER_SCHEDULE);
        info!("Countdown finished");

        self.request("alert badge", self.ctx.effects.set_badge(Badge::alert()));
        self.request(
            "finished notification",
            self.ctx.effects.notify(FINISHED_TITLE, FINISHED_MESSAGE),
        );
        if self.state.sound_alarm() {
            self.request("alarm sound", self.ctx.effects.play_alarm());
        }

        self.commit();
    }

    /// Persist, then push the full state to observers
    fn commit(&self) {
        self.persist();
        publish(
            &self.ctx.observers,
            ObserverMessage::StateUpdate {
                state: self.state.snapshot(),
            },
        );
    }

    fn persist(&self) {
        if let Err(e) = self.ctx.store.save(&self.state) {
            warn!(store = self.ctx.store.name(), "Failed to persist timer state: {}", e);
        }
    }

    fn request(&self, what: &str, result: EffectResult) {
        if let Err(e) = result {
            warn!("Failed to request {}: {}", what, e);
        }
    }
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("store", &self.ctx.store.name())
            .finish()
    }
}
