//! Runtime configuration.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::MinutePolicy;

/// Default interval between full timetable re-fetches: 6 hours.
const DEFAULT_FULL_REFRESH_SECS: u64 = 6 * 60 * 60;

/// Default interval between countdown updates of published boards.
const DEFAULT_LIVE_REFRESH_SECS: u64 = 60;

/// Configuration for the board server, loadable from a JSON file.
///
/// Every field has a default, so a partial file only needs to name what
/// it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Station id → display name. Ids are the path segments of the
    /// timetable site's station pages.
    pub stations: BTreeMap<String, String>,

    /// Seconds between full timetable re-fetches.
    pub full_refresh_secs: u64,

    /// Seconds between countdown/order updates of published boards.
    pub live_refresh_secs: u64,

    /// How minutes-remaining is reported in published attributes.
    pub minute_policy: MinutePolicy,

    /// Path of the last-known-views cache file.
    pub cache_path: PathBuf,

    /// Path of the status-event changelog file.
    pub changelog_path: PathBuf,

    /// Address the JSON API listens on.
    pub listen_addr: SocketAddr,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stations: BTreeMap::new(),
            full_refresh_secs: DEFAULT_FULL_REFRESH_SECS,
            live_refresh_secs: DEFAULT_LIVE_REFRESH_SECS,
            minute_policy: MinutePolicy::default(),
            cache_path: PathBuf::from("tursib_cache.json"),
            changelog_path: PathBuf::from("tursib_changelog.json"),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl BoardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Returns the full-refresh cadence as a Duration.
    pub fn full_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.full_refresh_secs)
    }

    /// Returns the live-refresh cadence as a Duration.
    pub fn live_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.live_refresh_secs)
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}
