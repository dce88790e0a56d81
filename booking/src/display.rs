//! Display strings derived from booking selections.
//!
//! All functions here are pure. Unset inputs produce an empty string.

use crate::selections::{DateRange, PartyComposition};
use chrono::{NaiveDate, NaiveTime};

/// `"1 Dec – 7 Dec"`; empty unless both ends are set
#[must_use]
pub fn derive_dates_display(range: &DateRange) -> String {
    match (range.from, range.to) {
        (Some(from), Some(to)) => format!("{} – {}", short_date(from), short_date(to)),
        _ => String::new(),
    }
}

/// `"2 Adults, 1 Child"`; zero counts are left out
#[must_use]
pub fn derive_group_display(party: &PartyComposition) -> String {
    let mut parts = Vec::with_capacity(2);
    if party.adults > 0 {
        let noun = if party.adults == 1 { "Adult" } else { "Adults" };
        parts.push(format!("{} {noun}", party.adults));
    }
    if party.children > 0 {
        let noun = if party.children == 1 { "Child" } else { "Children" };
        parts.push(format!("{} {noun}", party.children));
    }
    parts.join(", ")
}

/// `"Sunday, 1 December 2024 after 11:00"`
#[must_use]
pub fn arrival_display(range: &DateRange, check_in: NaiveTime) -> String {
    range
        .from
        .map(|date| format!("{} after {}", long_date(date), check_in.format("%H:%M")))
        .unwrap_or_default()
}

/// `"Saturday, 7 December 2024 before 18:00"`
#[must_use]
pub fn departure_display(range: &DateRange, check_out: NaiveTime) -> String {
    range
        .to
        .map(|date| format!("{} before {}", long_date(date), check_out.format("%H:%M")))
        .unwrap_or_default()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

fn long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
