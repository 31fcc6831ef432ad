//! Error types for the persistence gateway and side-effect dispatch
//!
//! None of these are fatal to the timer: the engine logs them and carries on
//! with its in-memory state.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`StateStore`](crate::storage::StateStore)
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored record could not be encoded or decoded
    #[error("Malformed timer state record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend cannot be used right now
    #[error("State store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised when a side effect could not be dispatched
#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Effect surface unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type EffectResult = Result<(), EffectError>;
