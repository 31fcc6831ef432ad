//! Time-value conversions between structured durations, seconds and display strings

use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// A duration split into hours, minutes and seconds.
///
/// Values built with [`from_seconds`] are normalized (`minutes < 60`,
/// `seconds < 60`). Values coming from a client may not be; pass them
/// through [`Hms::normalized`] before storing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hms {
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
}

impl Hms {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Total number of seconds represented by this value
    pub fn total_seconds(&self) -> u64 {
        to_seconds(self)
    }

    /// Re-split the total so minutes and seconds are below 60
    pub fn normalized(&self) -> Self {
        from_seconds(to_seconds(self))
    }
}

/// Zero-padded projection of an [`Hms`] for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl std::fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Convert a structured duration to total seconds, saturating at `u64::MAX`
pub fn to_seconds(time: &Hms) -> u64 {
    time.hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(time.minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(time.seconds)
}

/// Split total seconds into hours, minutes and seconds
pub fn from_seconds(total_seconds: u64) -> Hms {
    Hms {
        hours: total_seconds / SECONDS_PER_HOUR,
        minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        seconds: total_seconds % SECONDS_PER_MINUTE,
    }
}

/// Zero-pad each component to at least two digits
pub fn to_display(time: &Hms) -> DisplayTime {
    DisplayTime {
        hours: format!("{:02}", time.hours),
        minutes: format!("{:02}", time.minutes),
        seconds: format!("{:02}", time.seconds),
    }
}

/// Short "M:SS" form used on the badge while under an hour
pub fn badge_text(time: &Hms) -> String {
    format!("{}:{:02}", time.minutes, time.seconds)
}
