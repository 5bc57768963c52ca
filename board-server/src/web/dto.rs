//! Response shapes for the JSON API.

use serde::Serialize;
use serde_json::Value;

/// Roster entry in `GET /stations`.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    pub id: String,
    pub name: String,

    /// Current published state value; absent before the first full
    /// refresh reaches this station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Response for `GET /stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationSummary>,
}

/// Full published board in `GET /station/:id`.
#[derive(Debug, Serialize)]
pub struct StationResponse {
    pub id: String,
    pub state: String,
    pub attributes: Value,
}
