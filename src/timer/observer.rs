//! Push messages for attached observers

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::{state::TimerSnapshot, utils::time::DisplayTime};

/// Buffered messages per observer before a slow one starts lagging
pub const OBSERVER_CAPACITY: usize = 64;

/// Message pushed to whatever UI is currently attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObserverMessage {
    /// Sent on every ordinary per-second decrement
    #[serde(rename = "tick")]
    Tick {
        #[serde(rename = "displayTime")]
        display_time: DisplayTime,
    },
    /// Sent after any command-driven change and when a countdown finishes
    #[serde(rename = "stateUpdate")]
    StateUpdate { state: TimerSnapshot },
}

impl ObserverMessage {
    /// Event name used on the SSE stream
    pub fn kind(&self) -> &'static str {
        match self {
            ObserverMessage::Tick { .. } => "tick",
            ObserverMessage::StateUpdate { .. } => "stateUpdate",
        }
    }
}

pub type ObserverSender = broadcast::Sender<ObserverMessage>;

pub fn observer_channel() -> ObserverSender {
    let (tx, _) = broadcast::channel(OBSERVER_CAPACITY);
    tx
}

/// Best-effort publish. Having nobody listening is the normal case.
pub fn publish(tx: &ObserverSender, message: ObserverMessage) {
    if tx.send(message).is_err() {
        trace!("No observers attached");
    }
}
