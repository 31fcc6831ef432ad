//! Countdown timer core
//! 
//! The state machine, its restart recovery, and the observer messages it
//! publishes.

pub mod engine;
pub mod observer;
pub mod recovery;

// Re-export main types
pub use engine::{Outcome, TimerContext, TimerEngine, FINISHED_MESSAGE, FINISHED_TITLE};
pub use observer::{observer_channel, ObserverMessage, ObserverSender};
pub use recovery::restore;
