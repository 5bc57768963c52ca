//! Timetable fetch error types.

/// Errors raised while fetching a station's timetable page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}
