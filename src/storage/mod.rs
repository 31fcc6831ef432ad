//! Persistence gateway for the timer state
//!
//! The timer treats storage as an opaque load/save interface holding a
//! single named record. Backends:
//!
//! - [`FileStore`]: JSON file written with a temp-file + rename pattern
//! - [`MemoryStore`]: in-memory, for ephemeral runs and tests

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::{error::StoreResult, state::TimerState};

/// Pluggable storage for the canonical timer state.
///
/// Writes replace the whole record; there are no partial updates.
pub trait StateStore: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Load the stored state, or `None` on first run
    fn load(&self) -> StoreResult<Option<TimerState>>;

    /// Overwrite the stored state
    fn save(&self, state: &TimerState) -> StoreResult<()>;
}
