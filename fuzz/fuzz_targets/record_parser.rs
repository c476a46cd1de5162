#![no_main]

use buildstats::{compute_builds, csv_source, Record};
use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Neither a single row nor a whole log may panic, whatever the bytes
    if let Ok(input) = std::str::from_utf8(data) {
        let fields: Vec<&str> = input.split(',').collect();
        let _ = Record::from_fields(&fields);
    }

    let from = DateTime::<Utc>::MIN_UTC.into();
    let to = DateTime::<Utc>::MAX_UTC.into();
    let _ = compute_builds(csv_source(data), from, to);
});
