//! Conversions between backend instants and what the views display or accept.
//!
//! All times are shown and entered in UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";
const CLOCK_FORMAT: &str = "%H:%M";
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// `2025-08-13 09:00`
pub fn slot_time(at: &DateTime<Utc>) -> String {
    at.format(SLOT_FORMAT).to_string()
}

/// `2025-08-13 09:00 - 10:30`; the end shows its clock time only
pub fn time_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format!("{} - {}", slot_time(start), end.format(CLOCK_FORMAT))
}

pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Value for a `datetime-local` input
pub fn input_value(at: &DateTime<Utc>) -> String {
    at.format(INPUT_FORMAT).to_string()
}

/// Parse a `datetime-local` value as a UTC instant; blank input is `None`
pub fn parse_input(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, INPUT_FORMAT_SECONDS))
        .ok()
        .map(|naive| naive.and_utc())
}
