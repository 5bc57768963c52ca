//! Departure board construction.
//!
//! Turns timetable entries into an ordered, countdown-annotated board
//! relative to a reference moment, and derives the published per-station
//! view. Everything here is pure: callers supply the moment, so both
//! refresh cycles and the tests drive the same code.

mod occurrence;
mod view;

pub use occurrence::{Departure, resolve_departures};
pub use view::{NO_DATA_STATE, StationView, TopThree};

pub(crate) use view::format_moment;
