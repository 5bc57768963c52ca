//! Timetable data as produced by the station page parser.

use serde::{Deserialize, Serialize};

use super::DayKind;

/// One scheduled departure row from a timetable page.
///
/// `departure` stays a free-form string here; it is only validated when
/// the entry is resolved against a reference moment, and entries that fail
/// to parse are dropped there rather than rejected up front. Duplicate
/// rows (same line and time) are legal and kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub line: String,
    pub destination: String,
    pub departure: String,
}

impl TimetableEntry {
    pub fn new(
        line: impl Into<String>,
        destination: impl Into<String>,
        departure: impl Into<String>,
    ) -> Self {
        Self {
            line: line.into(),
            destination: destination.into(),
            departure: departure.into(),
        }
    }
}

/// A station's full timetable, split by day-type program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub weekday: Vec<TimetableEntry>,
    pub saturday: Vec<TimetableEntry>,
    pub sunday: Vec<TimetableEntry>,
}

impl Timetable {
    /// The entries of one day-type program.
    pub fn for_day(&self, day: DayKind) -> &[TimetableEntry] {
        match day {
            DayKind::Weekday => &self.weekday,
            DayKind::Saturday => &self.saturday,
            DayKind::Sunday => &self.sunday,
        }
    }

    /// True when every program is empty.
    pub fn is_empty(&self) -> bool {
        self.weekday.is_empty() && self.saturday.is_empty() && self.sunday.is_empty()
    }
}
