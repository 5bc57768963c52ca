//! The published per-station view.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Countdown, DayKind};

use super::occurrence::Departure;

/// State value published when a station has no resolvable departures.
pub const NO_DATA_STATE: &str = "n/a";

/// Summary of the next three departures.
///
/// Flattened into the published attributes as `next_k` / `line_k` /
/// `destination_k` / `minutes_to_next_k`. Keys beyond the number of
/// available departures are omitted entirely rather than padded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopThree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_to_next_1: Option<Countdown>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_to_next_2: Option<Countdown>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_to_next_3: Option<Countdown>,
}

impl TopThree {
    /// Summarize the first three departures of an ordered board.
    pub fn from_departures(departures: &[Departure]) -> Self {
        let mut top = TopThree::default();

        if let Some(d) = departures.first() {
            top.next_1 = Some(d.departure.clone());
            top.line_1 = Some(d.line.clone());
            top.destination_1 = Some(d.destination.clone());
            top.minutes_to_next_1 = Some(d.minutes);
        }
        if let Some(d) = departures.get(1) {
            top.next_2 = Some(d.departure.clone());
            top.line_2 = Some(d.line.clone());
            top.destination_2 = Some(d.destination.clone());
            top.minutes_to_next_2 = Some(d.minutes);
        }
        if let Some(d) = departures.get(2) {
            top.next_3 = Some(d.departure.clone());
            top.line_3 = Some(d.line.clone());
            top.destination_3 = Some(d.destination.clone());
            top.minutes_to_next_3 = Some(d.minutes);
        }

        top
    }
}

/// The full published attribute set for one station.
///
/// Created wholesale by a full refresh. The live cycle rewrites only the
/// departures, the summary, `last_update` and the derived state value;
/// `version`, `station` and `program` pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationView {
    pub version: String,
    pub station: String,
    pub program: DayKind,
    pub departures: Vec<Departure>,
    pub last_update: String,
    #[serde(flatten)]
    pub summary: TopThree,
}

impl StationView {
    /// Build a view from an already-ordered departure list.
    pub fn new(
        version: impl Into<String>,
        station: impl Into<String>,
        program: DayKind,
        departures: Vec<Departure>,
        now: NaiveDateTime,
    ) -> Self {
        let summary = TopThree::from_departures(&departures);
        Self {
            version: version.into(),
            station: station.into(),
            program,
            departures,
            last_update: format_moment(now),
            summary,
        }
    }

    /// The primary published value: the next departure's wall-clock time,
    /// or the no-data marker for an empty board.
    pub fn state(&self) -> &str {
        self.departures
            .first()
            .map(|d| d.departure.as_str())
            .unwrap_or(NO_DATA_STATE)
    }
}

/// Timestamp format used for `last_update` and changelog entries.
pub(crate) fn format_moment(moment: NaiveDateTime) -> String {
    moment.format("%Y-%m-%dT%H:%M:%S").to_string()
}
