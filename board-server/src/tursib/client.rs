//! Tursib station page HTTP client.

use crate::domain::Timetable;
use crate::refresh::TimetableSource;

use super::error::FetchError;
use super::parse::parse_timetable;

/// Default base URL for the public timetable site.
const DEFAULT_BASE_URL: &str = "https://tursib.ro";

/// Default request timeout in seconds.
///
/// This is the only timeout in the system; a failed fetch simply waits
/// for the next scheduled refresh, there is no retry.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the timetable page client.
#[derive(Debug, Clone)]
pub struct TursibConfig {
    /// Base URL of the timetable site.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TursibConfig {
    /// Create a config with the production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TursibConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for station timetable pages.
#[derive(Debug, Clone)]
pub struct TursibClient {
    http: reqwest::Client,
    base_url: String,
}

impl TursibClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TursibConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the raw markup of a station's timetable page.
    pub async fn fetch_markup(&self, station_id: &str) -> Result<String, FetchError> {
        let url = format!("{}/s/{}?arrivals=on", self.base_url, station_id);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

impl TimetableSource for TursibClient {
    async fn fetch_timetable(&self, station_id: &str) -> Result<Option<Timetable>, FetchError> {
        let markup = self.fetch_markup(station_id).await?;
        Ok(parse_timetable(&markup))
    }
}
