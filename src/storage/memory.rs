//! In-memory state store

use std::{fmt, sync::RwLock};

use crate::{
    error::{StoreError, StoreResult},
    state::TimerState,
};
use super::StateStore;

/// Keeps the record in memory; lost when the process exits
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<TimerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a record, as if written by an
    /// earlier process
    pub fn with_state(state: TimerState) -> Self {
        Self {
            record: RwLock::new(Some(state)),
        }
    }

    /// Peek at the stored record without going through the trait
    pub fn stored(&self) -> Option<TimerState> {
        self.record.read().ok().and_then(|record| record.clone())
    }
}

impl StateStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn load(&self) -> StoreResult<Option<TimerState>> {
        let guard = self
            .record
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &TimerState) -> StoreResult<()> {
        let mut guard = self
            .record
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        *guard = Some(state.clone());
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("has_record", &self.stored().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::Hms;

    #[test]
    fn test_empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_record() {
        let store = MemoryStore::with_state(TimerState::new());
        let running = TimerState::running(Hms::new(0, 0, 42));
        store.save(&running).unwrap();
        assert_eq!(store.load().unwrap(), Some(running));
    }
}
