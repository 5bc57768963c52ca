//! Tursib timetable page collaborator.
//!
//! Fetches a station's public timetable page and extracts the per-program
//! departure lists. Key characteristics of the source:
//! - times are bare "HH:MM" strings with no date attached
//! - one page carries all three day-type programs
//! - there is no API; the schedule is scraped from the page markup
//!
//! The refresh engine never talks to this module directly; it consumes
//! the [`TimetableSource`](crate::refresh::TimetableSource) seam, which
//! [`TursibClient`] implements as fetch + parse.

mod client;
mod error;
mod parse;

pub use client::{TursibClient, TursibConfig};
pub use error::FetchError;
pub use parse::parse_timetable;
