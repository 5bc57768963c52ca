//! Occurrence resolution and ordering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Countdown, MinutePolicy, TimetableEntry, WallTime};

/// A published departure: a timetable entry annotated with its live
/// countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    pub line: String,
    pub destination: String,
    pub departure: String,
    pub minutes: Countdown,
}

/// Resolve entries against `now` and order them by next occurrence.
///
/// Each entry's departure time is resolved to its next concrete moment at
/// or after `now` (rolling over to tomorrow once passed), and the
/// remaining duration becomes the countdown under the given policy.
/// Entries whose time fails to parse are dropped without affecting the
/// rest of the batch. The sort is stable, so entries sharing a resolved
/// moment keep their input order.
pub fn resolve_departures(
    entries: &[TimetableEntry],
    now: NaiveDateTime,
    policy: MinutePolicy,
) -> Vec<Departure> {
    let mut resolved: Vec<(NaiveDateTime, Departure)> = entries
        .iter()
        .filter_map(|entry| {
            let time = WallTime::parse(&entry.departure).ok()?;
            let scheduled = time.next_occurrence(now);
            let secs = scheduled.signed_duration_since(now).num_seconds();

            Some((
                scheduled,
                Departure {
                    line: entry.line.clone(),
                    destination: entry.destination.clone(),
                    departure: entry.departure.clone(),
                    minutes: Countdown::from_seconds(secs, policy),
                },
            ))
        })
        .collect();

    resolved.sort_by_key(|(scheduled, _)| *scheduled);
    resolved
        .into_iter()
        .map(|(_, departure)| departure)
        .collect()
}
