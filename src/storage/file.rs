//! JSON file state store
//!
//! The file holds one JSON object with the timer record under the
//! `timerState` key. Saves go to `{path}.tmp` first, are
//! synced, then renamed over the real file, so a crash mid-write leaves
//! either the old record or the new one.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{StoreError, StoreResult},
    state::TimerState,
};
use super::StateStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(rename = "timerState", default, skip_serializing_if = "Option::is_none")]
    timer_state: Option<TimerState>,
}

/// File-backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("timer-state"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn load(&self) -> StoreResult<Option<TimerState>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file yet");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let file: StateFile = serde_json::from_str(&content)?;
        Ok(file.timer_state.map(TimerState::normalized))
    }

    fn save(&self, state: &TimerState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let file = StateFile {
            timer_state: Some(state.clone()),
        };

        let tmp_path = self.temp_path();
        {
            let handle = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
            let mut writer = BufWriter::new(handle);
            serde_json::to_writer_pretty(&mut writer, &file)?;
            writer.flush().map_err(|e| StoreError::io(&tmp_path, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| StoreError::io(&tmp_path, e))?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), status = ?state.status(), "saved timer state");
        Ok(())
    }
}
