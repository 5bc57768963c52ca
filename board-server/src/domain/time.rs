//! Wall-clock time handling for timetable entries.
//!
//! Timetable pages publish departures as bare "HH:MM" strings with no date
//! attached. This module resolves such a time to its next concrete
//! occurrence relative to a reference moment, handling the roll over to
//! tomorrow once the time has passed today, and turns the remaining
//! duration into the published countdown under one of two reporting
//! policies.

use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A validated wall-clock departure time.
///
/// # Examples
///
/// ```
/// use board_server::domain::WallTime;
///
/// let t = WallTime::parse("07:05").unwrap();
/// assert_eq!(t.to_string(), "07:05");
///
/// assert!(WallTime::parse("7:05").is_err());
/// assert!(WallTime::parse("25:99").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Parse a time from strict "HH:MM" format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Resolve the next concrete moment at or after `now` with this time
    /// of day.
    ///
    /// A time that has already passed today resolves to tomorrow; a time
    /// exactly equal to `now` counts as not yet passed and stays today.
    /// The result is always within `[now, now + 24h]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use board_server::domain::WallTime;
    /// use chrono::NaiveDate;
    ///
    /// let now = NaiveDate::from_ymd_opt(2025, 11, 3)
    ///     .unwrap()
    ///     .and_hms_opt(23, 58, 0)
    ///     .unwrap();
    ///
    /// // 00:05 has passed today, so it resolves to tomorrow.
    /// let t = WallTime::parse("00:05").unwrap();
    /// assert_eq!(
    ///     t.next_occurrence(now).date(),
    ///     NaiveDate::from_ymd_opt(2025, 11, 4).unwrap()
    /// );
    /// ```
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        let candidate = now.date().and_time(self.0);
        if candidate < now {
            candidate + Duration::days(1)
        } else {
            candidate
        }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// How remaining time until a departure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinutePolicy {
    /// Whole minutes, rounded down. A departure under a minute away
    /// reads 0.
    #[default]
    Truncate,

    /// Whole minutes, rounded up, with departures under a minute away
    /// reported as the "now" marker. Never reads 0.
    CeilingNow,
}

/// Minutes remaining until a departure, or the imminent-departure marker.
///
/// Serializes as a JSON number, or the string `"now"` for the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Departure is under a minute away. Only produced by
    /// [`MinutePolicy::CeilingNow`].
    Now,

    /// Whole minutes remaining.
    Minutes(i64),
}

impl Countdown {
    /// Compute the countdown for a non-negative remaining duration.
    pub fn from_seconds(secs: i64, policy: MinutePolicy) -> Self {
        debug_assert!(secs >= 0);
        match policy {
            MinutePolicy::Truncate => Countdown::Minutes(secs / 60),
            MinutePolicy::CeilingNow if secs < 60 => Countdown::Now,
            MinutePolicy::CeilingNow => Countdown::Minutes((secs + 59) / 60),
        }
    }
}

impl Serialize for Countdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Countdown::Now => serializer.serialize_str("now"),
            Countdown::Minutes(m) => serializer.serialize_i64(*m),
        }
    }
}

impl<'de> Deserialize<'de> for Countdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Minutes(i64),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Minutes(m) => Ok(Countdown::Minutes(m)),
            Repr::Marker(s) if s == "now" => Ok(Countdown::Now),
            Repr::Marker(s) => Err(D::Error::custom(format!("unknown countdown marker: {s}"))),
        }
    }
}
