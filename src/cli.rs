//! CLI argument parsing for buildstats

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the statistics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "buildstats")]
#[command(version)]
#[command(about = "Remote build service statistics over a time window", long_about = None)]
pub struct Cli {
    /// CSV file with the build executions
    #[arg(short = 'c', long = "csv", value_name = "PATH")]
    pub csv: PathBuf,

    /// Start of the time window (default: any). RFC 3339 or RFC 2822
    #[arg(short = 's', long = "start", value_name = "DATETIME", value_parser = parse_time_bound)]
    pub start: Option<DateTime<FixedOffset>>,

    /// End of the time window (default: current time). RFC 3339 or RFC 2822
    #[arg(short = 'e', long = "end", value_name = "DATETIME", value_parser = parse_time_bound)]
    pub end: Option<DateTime<FixedOffset>>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print debug diagnostics to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Window start, falling back to the zero time
    pub fn window_start(&self) -> DateTime<FixedOffset> {
        self.start.unwrap_or_else(zero_time)
    }

    /// Window end, falling back to now
    pub fn window_end(&self) -> DateTime<FixedOffset> {
        self.end.unwrap_or_else(|| Utc::now().into())
    }
}

/// `0001-01-01T00:00:00Z`, earlier than any build
pub fn zero_time() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(-62_135_596_800, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .into()
}

/// Parse a window bound given as RFC 3339 or RFC 2822
///
/// A trailing `UTC` zone name (`01 Jan 01 00:00 UTC`) is read as `+0000`.
pub fn parse_time_bound(value: &str) -> Result<DateTime<FixedOffset>, String> {
    let rfc2822 = match value.strip_suffix(" UTC") {
        Some(rest) => format!("{} +0000", rest),
        None => value.to_string(),
    };
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(&rfc2822))
        .map_err(|_| {
            format!(
                "invalid date & time '{}': expected RFC 3339 (2018-10-31T03:43:46-04:00) or RFC 2822 (Wed, 31 Oct 2018 03:43:46 -0400)",
                value
            )
        })
}
