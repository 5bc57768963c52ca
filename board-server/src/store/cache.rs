//! Disk cache of the last published attributes per station.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{StoreError, write_json};

/// Keyed-overwrite JSON cache file: station id → last published
/// attributes. Written after each successful full refresh so the last
/// known board survives restarts for inspection.
#[derive(Debug, Clone)]
pub struct ViewCache {
    path: PathBuf,
}

impl ViewCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Current cache contents. A missing or unreadable file reads as
    /// empty; the cache is best-effort by design.
    pub fn load(&self) -> HashMap<String, Value> {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    /// Overwrite one station's cached attributes.
    pub fn save(&self, station_id: &str, attributes: &Value) -> Result<(), StoreError> {
        let mut cache = self.load();
        cache.insert(station_id.to_string(), attributes.clone());
        write_json(&self.path, &cache)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
