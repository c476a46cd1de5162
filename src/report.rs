//! Human-readable rendering of build statistics

use crate::stats::Builds;
use chrono::{DateTime, FixedOffset};
use std::fmt::Display;

/// Date-time layout used for the window bounds (`Wednesday, 31-Oct-18 03:43:46 -04:00`)
const WINDOW_TIME_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S %:z";

fn format_time(t: &DateTime<FixedOffset>) -> String {
    t.format(WINDOW_TIME_FORMAT).to_string()
}

/// Render a ranking as `[a b c]`, or nothing when it's empty
fn format_list<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", joined.join(" "))
}

/// Success rate as a percentage with 2 decimals, blank when undefined
fn format_rate(rate: Option<f64>) -> String {
    rate.map(|r| format!("{:.2}%", r * 100.0))
        .unwrap_or_default()
}

/// Render the statistics report
pub fn format_builds(builds: &Builds) -> String {
    let mut out = String::new();
    out.push_str("Remote Builder service builds stats\n");
    out.push_str("====================================\n");
    out.push_str(&format!(
        "Applied time Window:      {} - {}\n",
        format_time(&builds.from),
        format_time(&builds.to)
    ));
    out.push_str(&format!("Number of Builds:         {}\n", builds.num));
    out.push_str(&format!(
        "Success rate:             {}\n",
        format_rate(builds.rate_success)
    ));
    out.push_str(&format!(
        "Top 5 users:              {}\n",
        format_list(&builds.top_users)
    ));
    out.push_str(&format!(
        "Top 5 error exit codes:   {}\n",
        format_list(&builds.top_err_codes)
    ));
    out
}

/// Print the statistics report to stdout
pub fn print_builds(builds: &Builds) {
    println!();
    print!("{}", format_builds(builds));
}
