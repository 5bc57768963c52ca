//! Persistence collaborators: published state, view cache, changelog.
//!
//! The state store is the boundary between the two refresh cycles; the
//! cache and changelog files only record what was published. File write
//! failures are reported as [`StoreError`] for the caller to log — they
//! are never allowed to abort a refresh cycle.

mod cache;
mod changelog;
mod state;

pub use cache::ViewCache;
pub use changelog::{Changelog, StatusEvent};
pub use state::{PublishedState, StateStore};

use std::path::Path;

/// Errors from the file-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write a value as pretty JSON, creating parent directories if needed.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
