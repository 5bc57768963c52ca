//! Station departure board server.
//!
//! Periodically fetches a public transit station's timetable page and
//! maintains a continuously refreshed, sorted view of upcoming departures
//! with live minute countdowns, rolling entries over to tomorrow once
//! their time has passed today.

pub mod board;
pub mod config;
pub mod domain;
pub mod refresh;
pub mod store;
pub mod tursib;
pub mod web;

/// Version stamped into published views and changelog entries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
