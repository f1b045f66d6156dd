//! Building-local wall-clock timestamps as exchanged with the backend.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepts ISO-8601 with or without an offset. An offset is dropped, keeping
/// the wall-clock reading.
pub fn parse(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| TimestampError(raw.to_string()))
}

/// Like [`parse`], but an offset-bearing timestamp is first moved into the
/// building's timezone so it lands on the building's calendar day.
pub fn parse_in(raw: &str, zone: Tz) -> Result<NaiveDateTime, TimestampError> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(with_offset) => Ok(with_offset.with_timezone(&zone).naive_local()),
        Err(_) => parse(raw),
    }
}

/// Rewrites a backend timestamp as building wall-clock text. Unparseable input
/// is returned untouched for the mapping layer to report.
pub fn localize(raw: &str, zone: Tz) -> String {
    parse_in(raw, zone).map(format).unwrap_or_else(|_| raw.to_string())
}

pub fn format(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid timestamp: {0}")]
pub struct TimestampError(pub String);
