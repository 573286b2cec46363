use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimestampError {
    #[error("Invalid date or time '{0}'")]
    Invalid(String),
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

enum Parsed {
    WithOffset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

fn parse(input: &str) -> Result<Parsed, TimestampError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Parsed::WithOffset(dt));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Parsed::Naive(dt));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Parsed::Naive)
        .ok_or_else(|| TimestampError::Invalid(input.to_string()))
}

/// Parses an ISO-8601 date or date-time. Values carrying an offset are
/// normalized to UTC; date-only values resolve to midnight.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampError> {
    Ok(match parse(input)? {
        Parsed::WithOffset(dt) => dt.naive_utc(),
        Parsed::Naive(dt) => dt,
    })
}

/// Calendar year as written in the input, ignoring any offset.
pub fn year_of(input: &str) -> Result<i32, TimestampError> {
    Ok(match parse(input)? {
        Parsed::WithOffset(dt) => dt.naive_local().year(),
        Parsed::Naive(dt) => dt.year(),
    })
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}
