//! Published station state.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// One published entity: the primary state value plus its attribute set.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedState {
    pub state: String,
    pub attributes: Value,
}

/// Thread-safe keyed store of published station views.
///
/// Reads and writes are whole-entry operations, so a reader never observes
/// a partially updated view even when the two refresh cycles overlap.
/// Cloning the store clones a handle to the same underlying map.
#[derive(Clone, Default)]
pub struct StateStore {
    inner: Arc<RwLock<HashMap<String, PublishedState>>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the published state for a station, if any.
    pub async fn read(&self, station_id: &str) -> Option<PublishedState> {
        let guard = self.inner.read().await;
        guard.get(station_id).cloned()
    }

    /// Publish a station's state, replacing any previous entry wholesale.
    pub async fn write(&self, station_id: impl Into<String>, state: PublishedState) {
        let mut guard = self.inner.write().await;
        guard.insert(station_id.into(), state);
    }

    /// Number of stations currently published.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}
