//! Error types for the build statistics pipeline

use chrono::{DateTime, FixedOffset};
use std::fmt;
use thiserror::Error;

/// Cause attached to a field that could not be interpreted while filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The time field is missing or is not an RFC 3339 date-time
    InvalidTime,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::InvalidTime => f.write_str("invalid format time"),
        }
    }
}

/// Errors that can occur while windowing, parsing or aggregating build rows
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid time window: 'from' ({from}) must be previous or equal to 'to' ({to})")]
    InvalidWindow {
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
    },

    #[error("Malformed CSV row: {0}")]
    Row(#[from] csv::Error),

    #[error("Parse error on line {line}, column {column}: {kind}")]
    Field {
        line: u64,
        column: usize,
        kind: FieldErrorKind,
    },

    #[error("Record has at least one field of an unexpected format")]
    InvalidRecord,
}

/// Result type for build statistics operations
pub type Result<T> = std::result::Result<T, Error>;
