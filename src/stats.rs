//! Build statistics over a time window
//!
//! One linear pass over the filtered rows: every record bumps the running
//! counters and two frequency tables (users and failing exit codes), and the
//! rankings are computed once the input is exhausted.

use crate::error::Result;
use crate::record::Record;
use crate::window::{RowSource, TimeWindow, TimeWindowReader};
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::hash::Hash;

/// Number of entries kept in each ranking
pub const TOP_N: usize = 5;

/// Occurrence counts per key, remembering the order keys were first seen
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    /// Position of each key in `entries`
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Count one more occurrence of `key`
    pub fn increment(&mut self, key: &K) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), 1));
            }
        }
    }

    pub fn count(&self, key: &K) -> u64 {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with the highest counts, at most `n` of them
    ///
    /// Keys with equal counts keep their first-seen order.
    pub fn top(&self, n: usize) -> Vec<K> {
        let mut ranked: Vec<&(K, u64)> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(k, _)| k.clone()).collect()
    }
}

impl<K: Hash + Eq + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics of the remote build service in a time window
#[derive(Debug, Clone, PartialEq)]
pub struct Builds {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    /// Number of builds in the window
    pub num: u64,
    /// Number of builds with a non-zero exit code
    pub failed: u64,
    /// Fraction of successful builds; `None` when there were no builds
    pub rate_success: Option<f64>,
    /// Users with most builds, at most [`TOP_N`]
    pub top_users: Vec<String>,
    /// Most frequent non-zero exit codes, at most [`TOP_N`]
    pub top_err_codes: Vec<u8>,
}

/// Running state of a statistics pass
#[derive(Debug, Default)]
pub struct BuildsTracker {
    num: u64,
    failed: u64,
    users: FrequencyTable<String>,
    err_codes: FrequencyTable<u8>,
}

impl BuildsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a build execution
    pub fn record(&mut self, record: &Record) {
        self.num += 1;
        self.users.increment(&record.user_id);

        if !record.succeeded() {
            self.failed += 1;
            self.err_codes.increment(&record.exit_code);
        }
    }

    /// Produce the statistics for `window`
    pub fn finish(self, window: &TimeWindow) -> Builds {
        let rate_success = if self.num > 0 {
            Some((self.num - self.failed) as f64 / self.num as f64)
        } else {
            None
        };

        Builds {
            from: window.from(),
            to: window.to(),
            num: self.num,
            failed: self.failed,
            rate_success,
            top_users: self.users.top(TOP_N),
            top_err_codes: self.err_codes.top(TOP_N),
        }
    }
}

/// Compute the build statistics of the rows left in `source` whose end time
/// is between `from` and `to` (both included)
///
/// Fails if `from` is after `to`. Any row or record error aborts the pass and
/// no partial statistics are returned.
pub fn compute_builds<S: RowSource>(
    source: S,
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
) -> Result<Builds> {
    compute_builds_in(source, TimeWindow::new(from, to)?)
}

/// Same as [`compute_builds`] with an already validated window
pub fn compute_builds_in<S: RowSource>(source: S, window: TimeWindow) -> Result<Builds> {
    let mut reader = TimeWindowReader::new(source, window);
    let mut tracker = BuildsTracker::new();

    while let Some(row) = reader.read_row()? {
        let record = Record::from_row(&row)?;
        tracker.record(&record);
    }

    tracing::debug!(
        builds = tracker.num,
        failed = tracker.failed,
        users = tracker.users.len(),
        err_codes = tracker.err_codes.len(),
        "computed build statistics"
    );

    Ok(tracker.finish(reader.window()))
}
