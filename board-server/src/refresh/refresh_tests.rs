//! Orchestrator tests over a mock timetable source.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use tempfile::{TempDir, tempdir};

use crate::config::BoardConfig;
use crate::domain::{MinutePolicy, Timetable, TimetableEntry};
use crate::store::{Changelog, PublishedState, StateStore, ViewCache};
use crate::tursib::FetchError;

use super::{FullRefresh, LiveRefresh, RefreshError, RefreshOutcome, TimetableSource};

/// Mock timetable source for testing.
#[derive(Default)]
struct MockSource {
    timetables: HashMap<String, Timetable>,
    no_data: HashSet<String>,
    failing: HashSet<String>,
}

impl MockSource {
    fn new() -> Self {
        Self::default()
    }

    fn with_weekday(mut self, station_id: &str, entries: Vec<TimetableEntry>) -> Self {
        self.timetables.insert(
            station_id.to_string(),
            Timetable {
                weekday: entries,
                ..Timetable::default()
            },
        );
        self
    }

    fn with_timetable(mut self, station_id: &str, timetable: Timetable) -> Self {
        self.timetables.insert(station_id.to_string(), timetable);
        self
    }

    fn with_no_data(mut self, station_id: &str) -> Self {
        self.no_data.insert(station_id.to_string());
        self
    }

    fn with_failure(mut self, station_id: &str) -> Self {
        self.failing.insert(station_id.to_string());
        self
    }
}

impl TimetableSource for MockSource {
    async fn fetch_timetable(&self, station_id: &str) -> Result<Option<Timetable>, FetchError> {
        if self.failing.contains(station_id) {
            return Err(FetchError::Status {
                status: 500,
                url: format!("mock://{station_id}"),
            });
        }
        if self.no_data.contains(station_id) {
            return Ok(None);
        }
        Ok(self.timetables.get(station_id).cloned())
    }
}

/// 2025-11-03 is a Monday.
fn monday_at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 3)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn entry(line: &str, destination: &str, departure: &str) -> TimetableEntry {
    TimetableEntry::new(line, destination, departure)
}

fn test_config(station_ids: &[(&str, &str)]) -> Arc<BoardConfig> {
    let mut config = BoardConfig::default();
    for (id, name) in station_ids {
        config.stations.insert(id.to_string(), name.to_string());
    }
    Arc::new(config)
}

fn full_refresh(
    source: MockSource,
    store: StateStore,
    config: Arc<BoardConfig>,
    dir: &TempDir,
) -> FullRefresh<MockSource> {
    FullRefresh::new(
        source,
        store,
        ViewCache::new(dir.path().join("cache.json")),
        Changelog::new(dir.path().join("changelog.json"), "test"),
        config,
    )
}

#[tokio::test]
async fn full_refresh_publishes_and_persists() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);
    let source = MockSource::new().with_weekday(
        "42",
        vec![entry("11", "Cedonia", "08:00"), entry("5", "Valea Aurie", "07:45")],
    );
    let full = full_refresh(source, store.clone(), config, &dir);

    let reports = full.run(monday_at(7, 30)).await;

    assert_eq!(reports.len(), 1);
    assert!(matches!(
        reports[0].outcome,
        RefreshOutcome::Updated { departures: 2 }
    ));

    let published = store.read("42").await.unwrap();
    assert_eq!(published.state, "07:45");

    let attributes = published.attributes.as_object().unwrap();
    assert_eq!(attributes["station"], json!("Gara"));
    assert_eq!(attributes["program"], json!("Weekday"));
    assert_eq!(attributes["next_1"], json!("07:45"));
    assert_eq!(attributes["line_1"], json!("5"));
    assert_eq!(attributes["minutes_to_next_1"], json!(15));
    assert_eq!(attributes["next_2"], json!("08:00"));
    assert!(!attributes.contains_key("next_3"));

    // The view also landed in the cache file and the changelog.
    let cache = ViewCache::new(dir.path().join("cache.json"));
    assert!(cache.load().contains_key("42"));

    let changelog = Changelog::new(dir.path().join("changelog.json"), "test");
    let events = changelog.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, "OK");
    assert_eq!(events[0].departures_found, 2);
}

#[tokio::test]
async fn fetch_failure_is_isolated_per_station() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara"), ("57", "Piata Mare")]);
    let source = MockSource::new()
        .with_failure("42")
        .with_weekday("57", vec![entry("1", "Center", "08:00")]);
    let full = full_refresh(source, store.clone(), config, &dir);

    let reports = full.run(monday_at(7, 30)).await;

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[0].outcome,
        RefreshOutcome::Failed(RefreshError::Fetch(_))
    ));
    assert!(reports[1].outcome.is_updated());

    // The failing station published nothing; the healthy one did.
    assert!(store.read("42").await.is_none());
    assert!(store.read("57").await.is_some());

    // The failure became a non-OK changelog event.
    let changelog = Changelog::new(dir.path().join("changelog.json"), "test");
    let events = changelog.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].station, "Gara");
    assert!(events[0].status.contains("fetch failed"));
    assert_eq!(events[0].departures_found, 0);
}

#[tokio::test]
async fn failure_leaves_previous_view_untouched() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);

    let source = MockSource::new().with_weekday("42", vec![entry("11", "Cedonia", "08:00")]);
    let full = full_refresh(source, store.clone(), config.clone(), &dir);
    full.run(monday_at(7, 30)).await;
    let before = store.read("42").await.unwrap();

    // Next pass fails: the previously published view must survive as-is.
    let full = full_refresh(
        MockSource::new().with_failure("42"),
        store.clone(),
        config,
        &dir,
    );
    let reports = full.run(monday_at(8, 30)).await;

    assert!(matches!(reports[0].outcome, RefreshOutcome::Failed(_)));
    assert_eq!(store.read("42").await.unwrap(), before);
}

#[tokio::test]
async fn no_data_and_empty_program_are_failures_without_overwrite() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara"), ("57", "Piata Mare")]);

    // 42 parses to nothing; 57 has only a Saturday program on a Monday.
    let source = MockSource::new().with_no_data("42").with_timetable(
        "57",
        Timetable {
            saturday: vec![entry("1", "Center", "09:00")],
            ..Timetable::default()
        },
    );
    let full = full_refresh(source, store.clone(), config, &dir);

    let reports = full.run(monday_at(7, 30)).await;

    assert!(matches!(
        reports[0].outcome,
        RefreshOutcome::Failed(RefreshError::NoData)
    ));
    assert!(matches!(
        reports[1].outcome,
        RefreshOutcome::Failed(RefreshError::EmptyProgram(_))
    ));
    assert!(store.read("42").await.is_none());
    assert!(store.read("57").await.is_none());
}

#[tokio::test]
async fn full_refresh_selects_program_for_the_day() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);
    let source = MockSource::new().with_timetable(
        "42",
        Timetable {
            weekday: vec![entry("1", "Center", "08:00")],
            saturday: vec![entry("1", "Center", "10:00")],
            sunday: vec![],
        },
    );
    let full = full_refresh(source, store.clone(), config, &dir);

    // 2025-11-08 is a Saturday.
    let saturday = NaiveDate::from_ymd_opt(2025, 11, 8)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap();
    full.run(saturday).await;

    let published = store.read("42").await.unwrap();
    assert_eq!(published.state, "10:00");
    assert_eq!(published.attributes["program"], json!("Saturday"));
}

#[tokio::test]
async fn live_refresh_skips_unpublished_and_empty_boards() {
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara"), ("57", "Piata Mare")]);

    // 57 is published but with an empty departure list.
    store
        .write(
            "57",
            PublishedState {
                state: "n/a".to_string(),
                attributes: json!({"departures": []}),
            },
        )
        .await;

    let live = LiveRefresh::new(store.clone(), config);
    let reports = live.run(monday_at(7, 30)).await;

    assert!(matches!(reports[0].outcome, RefreshOutcome::NotReady));
    assert!(matches!(reports[1].outcome, RefreshOutcome::NotReady));
}

#[tokio::test]
async fn live_refresh_reorders_and_retimes_published_entries() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);
    let source = MockSource::new().with_weekday(
        "42",
        vec![entry("11", "Cedonia", "07:45"), entry("5", "Valea Aurie", "08:10")],
    );
    let full = full_refresh(source, store.clone(), config.clone(), &dir);
    full.run(monday_at(7, 30)).await;

    // By 08:00 the 07:45 departure has passed: it rolls to tomorrow and
    // the 08:10 one moves to the front.
    let live = LiveRefresh::new(store.clone(), config);
    let reports = live.run(monday_at(8, 0)).await;

    assert!(matches!(
        reports[0].outcome,
        RefreshOutcome::Updated { departures: 2 }
    ));

    let published = store.read("42").await.unwrap();
    assert_eq!(published.state, "08:10");

    let attributes = published.attributes.as_object().unwrap();
    assert_eq!(attributes["next_1"], json!("08:10"));
    assert_eq!(attributes["minutes_to_next_1"], json!(10));
    assert_eq!(attributes["next_2"], json!("07:45"));
    assert_eq!(
        attributes["minutes_to_next_2"],
        json!(23 * 60 + 45),
        "passed departure counts down to tomorrow's occurrence"
    );
    assert_eq!(attributes["last_update"], json!("2025-11-03T08:00:00"));

    // Membership is unchanged: live refresh never adds or removes.
    assert_eq!(attributes["departures"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn live_refresh_preserves_identity_fields() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);
    let source = MockSource::new().with_weekday("42", vec![entry("11", "Cedonia", "09:00")]);
    let full = full_refresh(source, store.clone(), config.clone(), &dir);
    full.run(monday_at(7, 30)).await;

    let before = store.read("42").await.unwrap();

    let live = LiveRefresh::new(store.clone(), config);
    live.run(monday_at(7, 45)).await;

    let after = store.read("42").await.unwrap();
    assert_eq!(after.attributes["version"], before.attributes["version"]);
    assert_eq!(after.attributes["station"], before.attributes["station"]);
    assert_eq!(after.attributes["program"], before.attributes["program"]);
    assert_ne!(
        after.attributes["last_update"],
        before.attributes["last_update"]
    );
}

#[tokio::test]
async fn live_refresh_is_idempotent_at_a_fixed_instant() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara")]);
    let source = MockSource::new().with_weekday(
        "42",
        vec![
            entry("11", "Cedonia", "07:45"),
            entry("5", "Valea Aurie", "08:10"),
            entry("1", "Center", "07:45"),
        ],
    );
    let full = full_refresh(source, store.clone(), config.clone(), &dir);
    full.run(monday_at(7, 30)).await;

    let live = LiveRefresh::new(store.clone(), config);
    let now = monday_at(8, 0);

    live.run(now).await;
    let first = store.read("42").await.unwrap();

    live.run(now).await;
    let second = store.read("42").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn live_refresh_reports_malformed_state_and_continues() {
    let store = StateStore::new();
    let config = test_config(&[("42", "Gara"), ("57", "Piata Mare")]);

    // 42 has a departures list whose items don't decode as departures.
    store
        .write(
            "42",
            PublishedState {
                state: "07:50".to_string(),
                attributes: json!({"departures": [1, 2, 3]}),
            },
        )
        .await;

    // 57 is healthy.
    store
        .write(
            "57",
            PublishedState {
                state: "08:00".to_string(),
                attributes: json!({
                    "version": "test",
                    "station": "Piata Mare",
                    "program": "Weekday",
                    "departures": [
                        {"line": "1", "destination": "Center", "departure": "08:00", "minutes": 30}
                    ],
                    "last_update": "2025-11-03T07:30:00"
                }),
            },
        )
        .await;

    let live = LiveRefresh::new(store.clone(), config);
    let reports = live.run(monday_at(7, 40)).await;

    assert!(matches!(
        reports[0].outcome,
        RefreshOutcome::Failed(RefreshError::StateRead(_))
    ));
    assert!(reports[1].outcome.is_updated());

    // The malformed entry is left as it was; the healthy one advanced.
    let broken = store.read("42").await.unwrap();
    assert_eq!(broken.attributes, json!({"departures": [1, 2, 3]}));

    let healthy = store.read("57").await.unwrap();
    assert_eq!(healthy.attributes["minutes_to_next_1"], json!(20));
}

#[tokio::test]
async fn live_refresh_with_ceiling_policy_reports_imminent_as_now() {
    let dir = tempdir().unwrap();
    let store = StateStore::new();
    let mut config = BoardConfig::default();
    config.stations.insert("42".to_string(), "Gara".to_string());
    config.minute_policy = MinutePolicy::CeilingNow;
    let config = Arc::new(config);

    let source = MockSource::new().with_weekday("42", vec![entry("11", "Cedonia", "08:00")]);
    let full = full_refresh(source, store.clone(), config.clone(), &dir);
    full.run(monday_at(7, 30)).await;

    // 45 seconds before departure: the marker, never a zero.
    let live = LiveRefresh::new(store.clone(), config);
    let now = NaiveDate::from_ymd_opt(2025, 11, 3)
        .unwrap()
        .and_hms_opt(7, 59, 15)
        .unwrap();
    live.run(now).await;

    let published = store.read("42").await.unwrap();
    assert_eq!(published.attributes["minutes_to_next_1"], json!("now"));
}
