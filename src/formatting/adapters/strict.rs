//! Exact-format parsing helpers shared by the date formatters.

use chrono::{NaiveDate, NaiveDateTime};

/// Separators recognised between date components, in detection order.
pub(super) const DATE_SEPARATORS: [char; 3] = ['.', '/', '-'];

/// Returns the first recognised separator appearing in `text`.
pub(super) fn detect_separator(text: &str) -> char {
    DATE_SEPARATORS
        .into_iter()
        .find(|separator| text.contains(*separator))
        .unwrap_or('-')
}

/// Parses `text` as a date that renders back to exactly `text`.
///
/// Re-rendering rejects unpadded components and stray whitespace that a
/// lenient parse would accept.
pub(super) fn parse_date_exact(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, format)
        .ok()
        .filter(|date| date.format(format).to_string() == text)
}

/// Parses `text` as a date and time that renders back to exactly `text`.
pub(super) fn parse_date_time_exact(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .filter(|date_time| date_time.format(format).to_string() == text)
}
