//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod signals;
pub mod time;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time::{badge_text, from_seconds, to_display, to_seconds, DisplayTime, Hms};
