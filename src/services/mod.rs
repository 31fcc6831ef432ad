//! External collaborators of the timer
//! 
//! This module contains the wake source that drives ticks and the sink for
//! badge, notification and alarm side effects.

pub mod effects;
pub mod system;
pub mod wake;

// Re-export main types
pub use effects::{Badge, CommandEffects, Effects, EffectsConfig};
pub use system::check_program_available;
pub use wake::{IntervalWakeSource, WakeEvent, WakeSource, TIMER_SCHEDULE};
