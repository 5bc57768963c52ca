//! Bounded changelog of refresh status events.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StoreError, write_json};

/// Maximum number of events retained on disk.
const MAX_EVENTS: usize = 30;

/// One full-refresh outcome, as recorded on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub timestamp: String,
    pub version: String,
    pub station: String,
    pub departures_found: usize,
    pub status: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChangelogFile {
    version: String,
    log: Vec<StatusEvent>,
}

/// JSON changelog of refresh outcomes, bounded to the most recent
/// [`MAX_EVENTS`] entries.
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    version: String,
}

impl Changelog {
    pub fn new(path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// Append an event, dropping the oldest entries past the bound.
    pub fn append(&self, event: StatusEvent) -> Result<(), StoreError> {
        let mut file = self.load_file();
        file.version = self.version.clone();
        file.log.push(event);

        if file.log.len() > MAX_EVENTS {
            let excess = file.log.len() - MAX_EVENTS;
            file.log.drain(..excess);
        }

        write_json(&self.path, &file)
    }

    /// Events currently on disk, oldest first.
    pub fn events(&self) -> Vec<StatusEvent> {
        self.load_file().log
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> ChangelogFile {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return ChangelogFile::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }
}
