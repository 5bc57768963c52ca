//! Refresh cycle error taxonomy.

use crate::domain::DayKind;
use crate::tursib::FetchError;

/// Why a station's refresh did not produce an updated view.
///
/// Every variant is caught at the per-station boundary and converted into
/// a [`StationReport`](super::StationReport); none aborts the cycle or
/// affects sibling stations.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The timetable page could not be fetched.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The page was fetched but carried no usable departure data.
    #[error("no usable timetable data")]
    NoData,

    /// The page parsed but today's program has no departures.
    #[error("no departures in the {0} program")]
    EmptyProgram(DayKind),

    /// The stored view could not be decoded for a live refresh.
    #[error("stored state unreadable: {0}")]
    StateRead(String),
}
