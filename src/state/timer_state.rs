//! Timer state structure and management

use serde::{Deserialize, Serialize};

use crate::utils::time::{from_seconds, to_display, DisplayTime, Hms};

/// Duration restored on first run, before the user ever picks one
pub const DEFAULT_DURATION: Hms = Hms {
    hours: 0,
    minutes: 5,
    seconds: 0,
};

/// Run status of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Stopped,
    Running,
}

/// User settings that live alongside the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_alarm: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound_alarm: true }
    }
}

/// Canonical timer state, persisted wholesale after every change
///
/// `remaining` is always kept normalized, so the display projection can be
/// derived from it at any time and is never stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    status: TimerStatus,
    #[serde(rename = "time")]
    remaining: Hms,
    #[serde(rename = "defaultTime")]
    default_duration: Hms,
    #[serde(default)]
    settings: Settings,
}

impl TimerState {
    /// Create the first-run state: stopped at the built-in default duration
    pub fn new() -> Self {
        Self {
            status: TimerStatus::Stopped,
            remaining: DEFAULT_DURATION,
            default_duration: DEFAULT_DURATION,
            settings: Settings::default(),
        }
    }

    /// Create a running state with the given remaining time
    pub fn running(remaining: Hms) -> Self {
        let mut state = Self::new();
        state.remaining = remaining.normalized();
        state.status = TimerStatus::Running;
        state
    }

    /// Create a stopped state with the given remaining time
    pub fn stopped(remaining: Hms) -> Self {
        let mut state = Self::new();
        state.remaining = remaining.normalized();
        state
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn remaining(&self) -> Hms {
        self.remaining
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining.total_seconds()
    }

    pub fn default_duration(&self) -> Hms {
        self.default_duration
    }

    pub fn sound_alarm(&self) -> bool {
        self.settings.sound_alarm
    }

    pub(crate) fn set_status(&mut self, status: TimerStatus) {
        self.status = status;
    }

    /// Apply a user-supplied duration to both the countdown and the default
    pub(crate) fn apply_duration(&mut self, duration: Hms) {
        let duration = duration.normalized();
        self.remaining = duration;
        self.default_duration = duration;
    }

    /// Per-tick update; leaves the default untouched
    pub(crate) fn set_remaining_seconds(&mut self, seconds: u64) {
        self.remaining = from_seconds(seconds);
    }

    pub(crate) fn restore_default(&mut self) {
        self.remaining = self.default_duration;
    }

    pub(crate) fn set_sound_alarm(&mut self, enabled: bool) {
        self.settings.sound_alarm = enabled;
    }

    /// Re-split loaded durations in case the record was written by hand or
    /// by an older client
    pub fn normalized(mut self) -> Self {
        self.remaining = self.remaining.normalized();
        self.default_duration = self.default_duration.normalized();
        self
    }

    pub fn display_time(&self) -> DisplayTime {
        to_display(&self.remaining)
    }

    /// Read-only copy handed to observers and `getState` callers
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status,
            time: self.remaining,
            display_time: to_display(&self.remaining),
            default_time: self.default_duration,
            default_display_time: to_display(&self.default_duration),
            settings: self.settings.clone(),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the timer with display projections filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub time: Hms,
    pub display_time: DisplayTime,
    pub default_time: Hms,
    pub default_display_time: DisplayTime,
    pub settings: Settings,
}
