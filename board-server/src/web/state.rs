//! Application state for the web layer.

use std::sync::Arc;

use crate::config::BoardConfig;
use crate::store::StateStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Published station views.
    pub store: StateStore,

    /// Server configuration (the station roster).
    pub config: Arc<BoardConfig>,
}

impl AppState {
    pub fn new(store: StateStore, config: Arc<BoardConfig>) -> Self {
        Self { store, config }
    }
}
