//! Permissive date parsing shared by all marketplace normalizers.
//!
//! Exports mix ISO timestamps, bare dates, and ambiguous numeric forms; per
//! the business locale, ambiguous numeric dates resolve day-before-month.
//! A value that matches nothing yields `None` — the caller writes the
//! missing-date marker (empty string), never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Formats carrying both date and time, tried first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats; day-first variants come before month-first fallbacks.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d/%m/%y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Parses a raw cell into a timestamp, trying RFC 3339 first, then the
/// datetime formats, then date-only formats promoted to midnight.
pub fn parse_flexible(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return Some(d.and_time(NaiveTime::default()));
        }
    }
    None
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
