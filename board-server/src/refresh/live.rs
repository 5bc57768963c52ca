//! The fine live-refresh cycle.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;

use crate::board::{StationView, TopThree, format_moment, resolve_departures};
use crate::config::BoardConfig;
use crate::domain::TimetableEntry;
use crate::store::{PublishedState, StateStore};

use super::{RefreshError, RefreshOutcome, StationReport};

/// Re-times and re-orders already published boards.
///
/// Works purely from the previously published data: entries are never
/// added or removed here, and `version`, `station` and `program` pass
/// through untouched. Entries only appear or disappear on the next full
/// refresh. Stations with nothing usable published yet are skipped
/// without error.
pub struct LiveRefresh {
    store: StateStore,
    config: Arc<BoardConfig>,
}

impl LiveRefresh {
    pub fn new(store: StateStore, config: Arc<BoardConfig>) -> Self {
        Self { store, config }
    }

    /// Run one pass over every configured station.
    pub async fn run(&self, now: NaiveDateTime) -> Vec<StationReport> {
        let mut reports = Vec::with_capacity(self.config.stations.len());

        for (station_id, station) in &self.config.stations {
            let outcome = match self.refresh_station(station_id, now).await {
                Ok(Some(departures)) => RefreshOutcome::Updated { departures },
                Ok(None) => RefreshOutcome::NotReady,
                Err(err) => {
                    warn!(%station, error = %err, "live refresh failed");
                    RefreshOutcome::Failed(err)
                }
            };

            reports.push(StationReport {
                station_id: station_id.clone(),
                station: station.clone(),
                outcome,
            });
        }

        reports
    }

    /// Refresh one station. `Ok(None)` means there was nothing usable to
    /// refresh (not yet published, or an empty board) — a skip, not an
    /// error.
    async fn refresh_station(
        &self,
        station_id: &str,
        now: NaiveDateTime,
    ) -> Result<Option<usize>, RefreshError> {
        let Some(published) = self.store.read(station_id).await else {
            return Ok(None);
        };

        // The departures field must be a non-empty list before anything
        // else is worth decoding.
        match published.attributes.get("departures") {
            Some(Value::Array(items)) if !items.is_empty() => {}
            _ => return Ok(None),
        }

        let mut view: StationView = serde_json::from_value(published.attributes)
            .map_err(|err| RefreshError::StateRead(err.to_string()))?;

        // Re-resolve from the published entries only, discarding the
        // previous countdowns.
        let entries: Vec<TimetableEntry> = view
            .departures
            .iter()
            .map(|d| TimetableEntry::new(d.line.clone(), d.destination.clone(), d.departure.clone()))
            .collect();

        let departures = resolve_departures(&entries, now, self.config.minute_policy);
        let count = departures.len();

        view.summary = TopThree::from_departures(&departures);
        view.departures = departures;
        view.last_update = format_moment(now);

        let state = view.state().to_string();
        let attributes = serde_json::to_value(&view).expect("station view serializes to JSON");

        self.store
            .write(station_id, PublishedState { state, attributes })
            .await;

        Ok(Some(count))
    }
}
