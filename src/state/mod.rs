//! State management module
//! 
//! This module contains the canonical timer state and the application state
//! that owns the countdown engine.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Settings, TimerSnapshot, TimerState, TimerStatus, DEFAULT_DURATION};
