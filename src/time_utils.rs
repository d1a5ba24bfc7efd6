// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamp conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Format used by health exports, e.g. `2023-01-01 08:00:00 -0800`.
const EXPORT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Formats without an offset; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Date without a time of day; midnight UTC.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a point timestamp to nanoseconds since the Unix epoch.
///
/// Integers are taken as nanoseconds already. Strings are parsed as
/// RFC 3339, then the health export format, then naive UTC forms, then a
/// bare date.
pub fn to_epoch_nanos(time: &Value) -> Result<i64, TimestampError> {
    match time {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| TimestampError::NotAnInteger(n.to_string())),
        Value::String(s) => parse_timestamp(s),
        other => Err(TimestampError::Unsupported(other.to_string())),
    }
}

fn parse_timestamp(s: &str) -> Result<i64, TimestampError> {
    let s = s.trim();

    let parsed = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, EXPORT_FORMAT))
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimestampError::Unparseable(s.to_string()))?;

    parsed
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| TimestampError::OutOfRange(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("Numeric timestamp {0} is not an integer number of nanoseconds")]
    NotAnInteger(String),

    #[error("Unrecognized timestamp format: {0:?}")]
    Unparseable(String),

    #[error("Timestamp out of range: {0:?}")]
    OutOfRange(String),

    #[error("Unsupported timestamp value: {0}")]
    Unsupported(String),
}
