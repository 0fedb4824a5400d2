//! Timestamp and weekday handling.

use chrono::{NaiveDateTime, Weekday};

use super::patterns::{ORDINAL_DAY, RECEIPT_TIMESTAMP_FORMAT};
use crate::error::ExtractionError;

/// Weekdays in report order, starting on Sunday.
pub const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Remove English ordinal suffixes from day numbers ("19th" -> "19").
pub fn strip_ordinal_suffixes(s: &str) -> String {
    ORDINAL_DAY.replace_all(s, "$1").into_owned()
}

/// Parse a receipt timestamp such as `"19th Aug 2023 at 08:15 PM"`.
pub fn parse_receipt_timestamp(line: &str) -> Result<NaiveDateTime, ExtractionError> {
    let cleaned = strip_ordinal_suffixes(line.trim());

    NaiveDateTime::parse_from_str(&cleaned, RECEIPT_TIMESTAMP_FORMAT).map_err(|e| {
        ExtractionError::Timestamp {
            value: line.trim().to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parse an export timestamp; unparseable values are treated as absent.
pub fn parse_export_timestamp(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), format).ok()
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday from its full English name (case-insensitive).
pub fn parse_weekday(s: &str) -> Result<Weekday, ExtractionError> {
    let wanted = s.trim();
    WEEKDAYS_FROM_SUNDAY
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ExtractionError::Parse {
            field: "weekday".to_string(),
            value: s.to_string(),
        })
}
