//! Time-window filtering over a stream of CSV rows
//!
//! [`TimeWindowReader`] wraps any [`RowSource`] and only hands back the rows
//! whose execution end time (field 4) lies inside an inclusive
//! [`TimeWindow`]. Rows are pulled one at a time; nothing is buffered.
//!
//! A row whose time field can't be parsed is fatal: the reader drains the
//! rest of the source before returning [`Error::Field`], so any further read
//! reports end of input instead of resuming in the middle of the stream.

use crate::error::{Error, FieldErrorKind, Result};
use crate::record::{parse_timestamp, TIME_FIELD};
use chrono::{DateTime, FixedOffset};
use csv::StringRecord;
use std::io;

/// A pull-based producer of raw CSV rows
///
/// `Ok(Some(row))` is a row, `Ok(None)` is the end of the input and `Err`
/// is a malformed row. Reading after an error continues with the next row.
pub trait RowSource {
    fn read_row(&mut self) -> Result<Option<StringRecord>>;

    /// Consume every remaining row, discarding rows and row errors
    ///
    /// Stops early on I/O errors, which a source may keep returning forever.
    fn drain(&mut self) {
        loop {
            match self.read_row() {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(Error::Row(err)) if matches!(err.kind(), csv::ErrorKind::Io(_)) => break,
                Err(_) => {}
            }
        }
    }
}

impl<R: io::Read> RowSource for csv::Reader<R> {
    fn read_row(&mut self) -> Result<Option<StringRecord>> {
        let mut row = StringRecord::new();
        if self.read_record(&mut row)? {
            Ok(Some(row))
        } else {
            Ok(None)
        }
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn read_row(&mut self) -> Result<Option<StringRecord>> {
        (**self).read_row()
    }
}

/// Build a CSV reader configured the way build logs are laid out
///
/// No header row, comma delimited, and every row must have the same number
/// of fields as the first one.
pub fn csv_source<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(input)
}

/// Inclusive interval of instants `[from, to]`
///
/// Comparisons are made on the instant; the offsets are only kept so the
/// bounds can be echoed back as they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Create a window, failing if `from` is after `to`
    pub fn new(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> DateTime<FixedOffset> {
        self.from
    }

    pub fn to(&self) -> DateTime<FixedOffset> {
        self.to
    }

    /// Check if `t` lies in the window (both bounds included)
    pub fn contains(&self, t: &DateTime<FixedOffset>) -> bool {
        *t >= self.from && *t <= self.to
    }
}

/// Row reader that skips rows outside of a [`TimeWindow`]
#[derive(Debug)]
pub struct TimeWindowReader<S> {
    source: S,
    window: TimeWindow,
    time_field: usize,
    /// Rows pulled from the source so far
    rows_read: u64,
    finished: bool,
}

impl<S: RowSource> TimeWindowReader<S> {
    pub fn new(source: S, window: TimeWindow) -> Self {
        Self {
            source,
            window,
            time_field: TIME_FIELD,
            rows_read: 0,
            finished: false,
        }
    }

    /// Create a reader from raw bounds, failing if `from` is after `to`
    pub fn from_bounds(
        source: S,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
    ) -> Result<Self> {
        Ok(Self::new(source, TimeWindow::new(from, to)?))
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Read the next row inside the window
    ///
    /// Structural row errors from the source are returned unchanged and
    /// reading may continue afterwards. An unparsable time field drains the
    /// source and ends the stream.
    pub fn read_row(&mut self) -> Result<Option<StringRecord>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let row = match self.source.read_row()? {
                Some(row) => row,
                None => return Ok(None),
            };
            self.rows_read += 1;

            let exec_end = match row.get(self.time_field).and_then(parse_timestamp) {
                Some(t) => t,
                None => {
                    let line = self.rows_read;
                    tracing::warn!(
                        line,
                        column = self.time_field,
                        "invalid time field, discarding the rest of the input"
                    );
                    self.source.drain();
                    self.finished = true;
                    return Err(Error::Field {
                        line,
                        column: self.time_field,
                        kind: FieldErrorKind::InvalidTime,
                    });
                }
            };

            if !self.window.contains(&exec_end) {
                tracing::trace!(line = self.rows_read, %exec_end, "row outside time window");
                continue;
            }

            return Ok(Some(row));
        }
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: RowSource> Iterator for TimeWindowReader<S> {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
