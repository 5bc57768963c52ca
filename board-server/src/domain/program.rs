//! Day-type program selection.
//!
//! Station timetables are split into three daily schedules. Which one is
//! in effect only depends on the day of week, and the selection is
//! recomputed on every full refresh rather than cached, since a refresh
//! may cross a day boundary.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One of the three daily schedules a station timetable is split into.
///
/// Serializes as its published label (`"Weekday"`, `"Saturday"`,
/// `"Sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    Weekday,
    Saturday,
    Sunday,
}

impl DayKind {
    /// Select the program in effect on a given date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayKind::Saturday,
            Weekday::Sun => DayKind::Sunday,
            _ => DayKind::Weekday,
        }
    }

    /// The label published with a station view.
    pub fn label(&self) -> &'static str {
        match self {
            DayKind::Weekday => "Weekday",
            DayKind::Saturday => "Saturday",
            DayKind::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
