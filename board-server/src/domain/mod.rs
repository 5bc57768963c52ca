//! Domain types for the departure board.
//!
//! This module contains the validated core model: wall-clock departure
//! times, day-type program selection, and the timetable shapes produced by
//! the page parser. Types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod entry;
mod program;
mod time;

pub use entry::{Timetable, TimetableEntry};
pub use program::DayKind;
pub use time::{Countdown, MinutePolicy, TimeError, WallTime};
