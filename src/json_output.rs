//! JSON output format for build statistics
//!
//! `--format json` implementation

use crate::stats::Builds;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// JSON document describing the statistics of a time window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub format: String,
    /// Window start (RFC 3339)
    pub from: DateTime<FixedOffset>,
    /// Window end (RFC 3339)
    pub to: DateTime<FixedOffset>,
    pub num: u64,
    pub failed: u64,
    /// Fraction of successful builds, null when there were no builds
    pub rate_success: Option<f64>,
    pub top_users: Vec<String>,
    pub top_err_codes: Vec<u8>,
}

impl JsonOutput {
    pub fn new(builds: &Builds) -> Self {
        Self {
            format: "buildstats-json-v1".to_string(),
            from: builds.from,
            to: builds.to,
            num: builds.num,
            failed: builds.failed,
            rate_success: builds.rate_success,
            top_users: builds.top_users.clone(),
            top_err_codes: builds.top_err_codes.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
