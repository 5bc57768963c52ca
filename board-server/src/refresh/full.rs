//! The coarse full-refresh cycle.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::board::{StationView, format_moment, resolve_departures};
use crate::config::BoardConfig;
use crate::domain::{DayKind, Timetable};
use crate::store::{Changelog, PublishedState, StateStore, StatusEvent, ViewCache};
use crate::tursib::FetchError;

use super::{RefreshError, RefreshOutcome, StationReport};

/// Source of parsed timetables.
///
/// This is the seam between the refresh engine and the fetch/parse
/// collaborator, so the orchestrator can be tested with mock data.
/// `Ok(None)` means the page was fetched but carried no usable departure
/// data for any program.
pub trait TimetableSource {
    fn fetch_timetable(
        &self,
        station_id: &str,
    ) -> impl Future<Output = Result<Option<Timetable>, FetchError>> + Send;
}

/// Rebuilds station views from freshly fetched timetables.
///
/// One pass walks every configured station sequentially: fetch, select
/// today's day-type program, resolve and order the departures, publish
/// the new view and persist it. Each station runs inside its own failure
/// boundary; a failed station keeps its previously published view.
pub struct FullRefresh<S> {
    source: S,
    store: StateStore,
    cache: ViewCache,
    changelog: Changelog,
    config: Arc<BoardConfig>,
    version: String,
}

impl<S: TimetableSource> FullRefresh<S> {
    pub fn new(
        source: S,
        store: StateStore,
        cache: ViewCache,
        changelog: Changelog,
        config: Arc<BoardConfig>,
    ) -> Self {
        Self {
            source,
            store,
            cache,
            changelog,
            config,
            version: crate::VERSION.to_string(),
        }
    }

    /// Run one full pass over every configured station.
    pub async fn run(&self, now: NaiveDateTime) -> Vec<StationReport> {
        let mut reports = Vec::with_capacity(self.config.stations.len());

        for (station_id, station) in &self.config.stations {
            let outcome = match self.refresh_station(station_id, station, now).await {
                Ok(departures) => {
                    info!(%station, departures, "published fresh departure board");
                    RefreshOutcome::Updated { departures }
                }
                Err(err) => {
                    warn!(%station, error = %err, "full refresh failed");
                    self.log_event(station, 0, err.to_string(), now);
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

    async fn refresh_station(
        &self,
        station_id: &str,
        station: &str,
        now: NaiveDateTime,
    ) -> Result<usize, RefreshError> {
        let timetable = self
            .source
            .fetch_timetable(station_id)
            .await?
            .ok_or(RefreshError::NoData)?;

        // Recomputed on every pass: a pass can cross a day boundary.
        let program = DayKind::for_date(now.date());
        let entries = timetable.for_day(program);
        if entries.is_empty() {
            return Err(RefreshError::EmptyProgram(program));
        }

        let departures = resolve_departures(entries, now, self.config.minute_policy);
        let count = departures.len();
        let view = StationView::new(self.version.clone(), station, program, departures, now);

        // A plain struct with string keys cannot fail to serialize.
        let attributes = serde_json::to_value(&view).expect("station view serializes to JSON");

        self.store
            .write(
                station_id,
                PublishedState {
                    state: view.state().to_string(),
                    attributes: attributes.clone(),
                },
            )
            .await;

        // Persistence is best-effort; failures must not fail the refresh.
        if let Err(err) = self.cache.save(station_id, &attributes) {
            warn!(%station, error = %err, "cache write failed");
        }
        self.log_event(station, count, "OK", now);

        Ok(count)
    }

    fn log_event(
        &self,
        station: &str,
        departures_found: usize,
        status: impl Into<String>,
        now: NaiveDateTime,
    ) {
        let event = StatusEvent {
            timestamp: format_moment(now),
            version: self.version.clone(),
            station: station.to_string(),
            departures_found,
            status: status.into(),
        };

        if let Err(err) = self.changelog.append(event) {
            warn!(%station, error = %err, "changelog write failed");
        }
    }
}
