//! Typed projection of a build log row
//!
//! Only the fields used by the statistics are kept: the user who launched the
//! build, when the execution ended and the process exit code.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, Timelike};
use csv::StringRecord;

/// Index of the user identifier field
pub const USER_FIELD: usize = 1;
/// Index of the execution end time field
pub const TIME_FIELD: usize = 4;
/// Index of the exit code field
pub const EXIT_CODE_FIELD: usize = 6;
/// Minimum number of fields a row needs to become a [`Record`]
pub const MIN_FIELDS: usize = EXIT_CODE_FIELD + 1;

/// Parse a timestamp in RFC 3339 format (`2018-10-31T05:45:46-04:00`)
///
/// Date and time must be joined by an uppercase `T` and leap seconds
/// (`:60`) are rejected.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .filter(|t| t.nanosecond() < 1_000_000_000)
}

/// A single build execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub user_id: String,
    pub exec_end: DateTime<FixedOffset>,
    /// 0 means the build succeeded
    pub exit_code: u8,
}

impl Record {
    /// Build a record from a CSV row
    pub fn from_row(row: &StringRecord) -> Result<Self> {
        let fields: Vec<&str> = row.iter().collect();
        Self::from_fields(&fields)
    }

    /// Build a record from raw field values
    ///
    /// Fails with [`Error::InvalidRecord`] when there are fewer than
    /// [`MIN_FIELDS`] fields, the end time is not RFC 3339 or the exit code
    /// is not an integer in `0..=255`.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(Error::InvalidRecord);
        }

        let exec_end = parse_timestamp(fields[TIME_FIELD]).ok_or(Error::InvalidRecord)?;
        let exit_code = fields[EXIT_CODE_FIELD]
            .parse::<u8>()
            .map_err(|_| Error::InvalidRecord)?;

        Ok(Self {
            user_id: fields[USER_FIELD].to_string(),
            exec_end,
            exit_code,
        })
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
