//! Buildstats - Remote build service statistics over a time window
//!
//! This library reads a CSV log of build executions one row at a time,
//! keeps only the rows whose end time falls inside an inclusive time window,
//! and aggregates them in a single pass into build counts, success rate and
//! the most frequent users and failing exit codes.
//!
//! ```
//! use buildstats::{compute_builds, csv_source};
//! use chrono::DateTime;
//!
//! let log = "b1,alice,x,x,2018-10-31T05:45:46-04:00,x,0\n\
//!            b2,bob,x,x,2018-10-31T06:45:46-04:00,x,2\n";
//! let from = DateTime::parse_from_rfc3339("2018-10-31T00:00:00-04:00").unwrap();
//! let to = DateTime::parse_from_rfc3339("2018-11-01T00:00:00-04:00").unwrap();
//!
//! let builds = compute_builds(csv_source(log.as_bytes()), from, to).unwrap();
//! assert_eq!(builds.num, 2);
//! assert_eq!(builds.rate_success, Some(0.5));
//! assert_eq!(builds.top_err_codes, vec![2]);
//! ```

pub mod cli;
pub mod error;
pub mod json_output;
pub mod record;
pub mod report;
pub mod stats;
pub mod window;

pub use error::{Error, FieldErrorKind, Result};
pub use record::Record;
pub use stats::{compute_builds, compute_builds_in, Builds};
pub use window::{csv_source, RowSource, TimeWindow, TimeWindowReader};
