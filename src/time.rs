// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Time-range normalization.
//!
//! Both ends of a range can be epoch milliseconds, text, or an instant.
//! Everything becomes epoch milliseconds before the ordering check, so the
//! checks always run format first, range second.
//!
//! Text is tried as, in order: a bare number (epoch millis), RFC 3339,
//! RFC 2822, a naive date-time (read as UTC), and a bare date (midnight UTC).

use crate::error::{QueryError, QueryResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// One end of a time range, as supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    Millis(i64),
    Text(String),
    Instant(DateTime<Utc>),
    /// Anything else. Carries the shape name for the error message.
    Unsupported(&'static str),
}

impl From<i64> for TimeInput {
    fn from(ms: i64) -> Self {
        TimeInput::Millis(ms)
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        TimeInput::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        TimeInput::Text(text)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(instant: DateTime<Utc>) -> Self {
        TimeInput::Instant(instant)
    }
}

impl From<&Value> for TimeInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(ms), _) => TimeInput::Millis(ms),
                (None, Some(ms)) if ms.is_finite() => TimeInput::Millis(ms.trunc() as i64),
                _ => TimeInput::Unsupported("number"),
            },
            Value::String(s) => TimeInput::Text(s.clone()),
            Value::Null => TimeInput::Unsupported("null"),
            Value::Bool(_) => TimeInput::Unsupported("boolean"),
            Value::Array(_) => TimeInput::Unsupported("array"),
            Value::Object(_) => TimeInput::Unsupported("object"),
        }
    }
}

impl TimeInput {
    /// Epoch milliseconds, or the format error for this input.
    pub fn to_epoch_millis(&self) -> QueryResult<i64> {
        match self {
            TimeInput::Millis(ms) => Ok(*ms),
            TimeInput::Instant(instant) => Ok(instant.timestamp_millis()),
            TimeInput::Text(text) => parse_text(text).ok_or_else(|| QueryError::InvalidDateFormat {
                input: text.clone(),
            }),
            TimeInput::Unsupported(shape) => Err(QueryError::InvalidTimeFormat { shape: *shape }),
        }
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // Numeric text counts as a number
    if let Ok(ms) = text.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(ms) = text.parse::<f64>() {
        if ms.is_finite() {
            return Some(ms.trunc() as i64);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Normalized, non-empty `[start_ms, end_ms]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeRange {
    /// Normalize both ends, then require `start < end`.
    pub fn new(start: impl Into<TimeInput>, end: impl Into<TimeInput>) -> QueryResult<Self> {
        let start_ms = start.into().to_epoch_millis()?;
        let end_ms = end.into().to_epoch_millis()?;

        if start_ms >= end_ms {
            return Err(QueryError::InvalidTimeRange {
                start_time: start_ms,
                end_time: end_ms,
            });
        }
        Ok(TimeRange { start_ms, end_ms })
    }
}
