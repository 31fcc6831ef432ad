//! Command surface shared by every route
//!
//! Commands use the tagged message form a UI sends, e.g.
//! `{"action": "start", "time": {"hours": 0, "minutes": 1, "seconds": 0}}`.

use serde::{Deserialize, Serialize};

use crate::{
    state::{AppState, TimerSnapshot},
    timer::Outcome,
    utils::time::Hms,
};
use super::responses::{AckResponse, ApiResponse};

/// A request from a UI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action")]
pub enum Command {
    #[serde(rename = "getState")]
    GetState,
    #[serde(rename = "start")]
    Start {
        #[serde(default)]
        time: Option<Hms>,
    },
    #[serde(rename = "stop")]
    Stop,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "setTime")]
    SetTime { time: Hms },
    #[serde(rename = "toggleAlarm", alias = "toggleAlarmSetting")]
    ToggleAlarm { enabled: bool },
    #[serde(rename = "clearBadge")]
    ClearBadge,
    #[serde(rename = "testAlarm", alias = "testAlarmSound")]
    TestAlarm,
}

/// Reply to a command
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    State { state: TimerSnapshot },
    Ack(AckResponse),
    Done(ApiResponse),
}

/// Run a command against the timer
pub fn execute(state: &AppState, command: Command) -> CommandReply {
    let (outcome, message) = match command {
        Command::GetState => {
            return CommandReply::State {
                state: state.get_timer_state(),
            }
        }
        Command::TestAlarm => {
            return CommandReply::Ack(AckResponse {
                success: state.test_alarm_sound(),
            })
        }
        Command::Start { time } => {
            let outcome = state.start(time);
            let message = match outcome {
                Outcome::Finished => "Timer started at zero and finished",
                Outcome::Rejected => "Timer is already running",
                _ => "Timer started",
            };
            (outcome, message)
        }
        Command::Stop => {
            let outcome = state.stop();
            let message = match outcome {
                Outcome::Ignored => "Timer was not running",
                _ => "Timer stopped",
            };
            (outcome, message)
        }
        Command::Reset => (state.reset(), "Timer reset to default"),
        Command::SetTime { time } => {
            let outcome = state.set_time(time);
            let message = match outcome {
                Outcome::Rejected => "Cannot set time while the timer is running",
                _ => "Time set",
            };
            (outcome, message)
        }
        Command::ToggleAlarm { enabled } => (
            state.toggle_alarm(enabled),
            if enabled { "Alarm sound enabled" } else { "Alarm sound disabled" },
        ),
        Command::ClearBadge => {
            state.clear_badge();
            (Outcome::Applied, "Badge cleared")
        }
    };

    CommandReply::Done(ApiResponse::new(
        outcome,
        message.to_string(),
        state.get_timer_state(),
    ))
}
