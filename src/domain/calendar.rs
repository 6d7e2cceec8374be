//! Calendar-date handling for `last_viewed`.
//!
//! Dates are stored as plain `YYYY-MM-DD` text. Anything longer (a datetime
//! such as `2024-03-05 10:00:00`) is cut down to its leading date. Input that
//! still does not parse is treated as "no date" and never as an error.

use chrono::NaiveDate;

/// Storage and display format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_LEN: usize = 10;

/// Parse a calendar date, keeping only the leading date portion.
///
/// Returns `None` for blank or unparsable input.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed.get(..DATE_LEN).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Lenient normalization of user-supplied date input.
///
/// Absent and blank input mean "never viewed". Malformed input degrades to the
/// same thing and is reported with a warning.
pub fn normalize_date_input(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        log::warn!("Ignoring unparsable last-viewed date {:?}; storing no value", raw);
    }
    parsed
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
