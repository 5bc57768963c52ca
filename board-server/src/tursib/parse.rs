//! Timetable page extraction.
//!
//! The station page lists departures in `div.program` sections, one per
//! day-type program, each holding `div.card-body` rows with the line link,
//! the headsign and a run of `span.h` departure times.

use scraper::{ElementRef, Html, Selector};

use crate::domain::{Timetable, TimetableEntry};

struct Selectors {
    program: Selector,
    header: Selector,
    card: Selector,
    line: Selector,
    headsign: Selector,
    time: Selector,
}

impl Selectors {
    fn new() -> Self {
        // Selector::parse only fails on malformed CSS; these are static.
        Self {
            program: Selector::parse("div.program").expect("static selector"),
            header: Selector::parse("h4").expect("static selector"),
            card: Selector::parse("div.card-body").expect("static selector"),
            line: Selector::parse("a.traseu-link").expect("static selector"),
            headsign: Selector::parse("span.headsign-info").expect("static selector"),
            time: Selector::parse("span.h").expect("static selector"),
        }
    }
}

/// Extract the per-program timetable from a station page.
///
/// Section headers name the program in Romanian ("Luni–Vineri",
/// "Sâmbătă", "Duminică"); sections with an unrecognized header are
/// skipped. Returns `None` when no program yields any departures, the
/// parser-level "no usable data" signal.
pub fn parse_timetable(markup: &str) -> Option<Timetable> {
    let document = Html::parse_document(markup);
    let selectors = Selectors::new();
    let mut timetable = Timetable::default();

    for section in document.select(&selectors.program) {
        let Some(header) = section.select(&selectors.header).next() else {
            continue;
        };

        let title = text_of(header).to_lowercase();
        let entries = if title.contains("luni") {
            &mut timetable.weekday
        } else if title.contains("sâmbătă") || title.contains("sambata") {
            &mut timetable.saturday
        } else if title.contains("duminică") || title.contains("duminica") {
            &mut timetable.sunday
        } else {
            continue;
        };

        for card in section.select(&selectors.card) {
            let line = card
                .select(&selectors.line)
                .next()
                .map(text_of)
                .unwrap_or_else(|| "?".to_string());
            let destination = card
                .select(&selectors.headsign)
                .next()
                .map(text_of)
                .unwrap_or_else(|| "?".to_string());

            for time_element in card.select(&selectors.time) {
                let time = text_of(time_element);
                if time.len() == 5 && time.contains(':') {
                    entries.push(TimetableEntry {
                        line: line.clone(),
                        destination: destination.clone(),
                        departure: time,
                    });
                }
            }
        }
    }

    if timetable.is_empty() {
        None
    } else {
        Some(timetable)
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
