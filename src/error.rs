// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query failures.
//!
//! Four validation errors, all raised before any collaborator is touched,
//! plus a transparent wrapper for whatever the index, privilege oracle, or
//! projector threw. The latter is never inspected here; the boundary maps it
//! to a server error.

use thiserror::Error;

/// Result alias for engine operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Keywords absent, empty after trimming, or neither text nor a list.
    #[error("[[error:invalid-keyword]]")]
    InvalidKeyword,

    /// A time argument was text that doesn't parse to an instant.
    #[error("[[error:invalid-date-format]] {input:?}")]
    InvalidDateFormat { input: String },

    /// A time argument was neither a number, text, nor an instant.
    #[error("[[error:invalid-time-format]] got {shape}")]
    InvalidTimeFormat { shape: &'static str },

    /// Normalized `start_time >= end_time`.
    #[error("[[error:invalid-time-range]] {start_time} >= {end_time}")]
    InvalidTimeRange { start_time: i64, end_time: i64 },

    /// Opaque fault from an external collaborator.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl QueryError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidKeyword => "invalid-keyword",
            QueryError::InvalidDateFormat { .. } => "invalid-date-format",
            QueryError::InvalidTimeFormat { .. } => "invalid-time-format",
            QueryError::InvalidTimeRange { .. } => "invalid-time-range",
            QueryError::Collaborator(_) => "internal-error",
        }
    }

    /// True for request-shape failures (client errors), false for faults.
    pub fn is_validation(&self) -> bool {
        !matches!(self, QueryError::Collaborator(_))
    }
}
