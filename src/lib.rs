//! Countdown Daemon - a resumable countdown timer
//! 
//! This library provides a countdown state machine that persists its state
//! after every change, recovers it when the process restarts, and is driven
//! by an external periodic wake source. Observers attach over HTTP.

pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod timer;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState};
pub use timer::{Outcome, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
