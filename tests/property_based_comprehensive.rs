//! Property-based tests for the windowing and aggregation pipeline
//!
//! Core features tested:
//! 1. Time window construction and membership
//! 2. Row filtering by time window
//! 3. Record parsing
//! 4. Statistics and ranking order

use buildstats::{
    compute_builds, csv_source, stats::FrequencyTable, Error, Record, TimeWindow,
    TimeWindowReader,
};
use chrono::{DateTime, Duration, FixedOffset};
use proptest::prelude::*;

const BUILDS_CSV: &str = include_str!("fixtures/builds.csv");

fn base() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2018-10-31T00:00:00-04:00").unwrap()
}

fn at(offset_secs: i64, tz_hours: i32) -> DateTime<FixedOffset> {
    let tz = FixedOffset::east_opt(tz_hours * 3600).unwrap();
    (base() + Duration::seconds(offset_secs)).with_timezone(&tz)
}

fn row(user: &str, t: DateTime<FixedOffset>, exit_code: u8) -> String {
    format!("b,{},x,x,{},x,{}", user, t.to_rfc3339(), exit_code)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_window_construction(a in -100_000i64..100_000, b in -100_000i64..100_000) {
        let (from, to) = (at(a, 0), at(b, -4));
        let result = TimeWindow::new(from, to);
        if a <= b {
            prop_assert!(result.is_ok());
        } else {
            let is_invalid_window = matches!(result, Err(Error::InvalidWindow { .. }));
            prop_assert!(is_invalid_window);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_filter_yields_exactly_window_rows(
        times in prop::collection::vec((-5_000i64..5_000, -12i32..=12), 0..40),
        lo in -5_000i64..0,
        len in 0i64..5_000,
    ) {
        let window = TimeWindow::new(at(lo, 0), at(lo + len, 3)).unwrap();
        let input: Vec<String> = times
            .iter()
            .enumerate()
            .map(|(i, &(secs, tz))| row(&format!("u{}", i), at(secs, tz), 0))
            .collect();
        let input = input.join("\n");

        let reader = TimeWindowReader::new(csv_source(input.as_bytes()), window);
        let yielded: Vec<String> = reader
            .map(|r| r.unwrap()[1].to_string())
            .collect();

        let expected: Vec<String> = times
            .iter()
            .enumerate()
            .filter(|(_, t)| t.0 >= lo && t.0 <= lo + len)
            .map(|(i, _)| format!("u{}", i))
            .collect();
        prop_assert_eq!(yielded, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_record_parsing_is_deterministic(
        fields in prop::collection::vec("[a-z0-9:T+-]{0,12}", 0..10),
    ) {
        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        let first = Record::from_fields(&refs);
        let second = Record::from_fields(&refs);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(a, b);
        }
        if refs.len() < 7 {
            let is_invalid_record = matches!(Record::from_fields(&refs), Err(Error::InvalidRecord));
            prop_assert!(is_invalid_record);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_exit_code_range(code in 0u32..1_000) {
        let ts = "2018-10-31T11:02:15-04:00";
        let code_str = code.to_string();
        let fields = ["b", "u", "x", "x", ts, "x", code_str.as_str()];
        let result = Record::from_fields(&fields);
        if code <= 255 {
            prop_assert_eq!(result.unwrap().exit_code as u32, code);
        } else {
            prop_assert!(result.is_err());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_fixture_statistics_independent_of_row_order(
        lines in Just(BUILDS_CSV.lines().map(String::from).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let input = lines.join("\n");
        let from = DateTime::parse_from_rfc3339("2018-10-31T03:43:46-04:00").unwrap();
        let to = DateTime::parse_from_rfc3339("2018-11-01T21:25:40-04:00").unwrap();
        let builds = compute_builds(csv_source(input.as_bytes()), from, to).unwrap();

        prop_assert_eq!(builds.num, 53);
        prop_assert_eq!(builds.failed, 23);
        prop_assert_eq!(builds.top_users, vec!["userA", "userB", "userC", "userD", "userE"]);
        prop_assert_eq!(builds.top_err_codes, vec![4, 3, 5, 2, 7]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_ranking_matches_reference(keys in prop::collection::vec(0u8..12, 0..80)) {
        let mut table = FrequencyTable::new();
        for key in &keys {
            table.increment(key);
        }

        // Reference: distinct keys in first-seen order, then by count
        let mut seen: Vec<u8> = Vec::new();
        for key in &keys {
            if !seen.contains(key) {
                seen.push(*key);
            }
        }
        let count = |k: &u8| keys.iter().filter(|x| *x == k).count();
        let mut expected = seen.clone();
        expected.sort_by_key(|k| std::cmp::Reverse(count(k)));
        expected.truncate(5);

        prop_assert_eq!(table.top(5), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_success_rate(codes in prop::collection::vec(0u8..4, 0..60)) {
        let input: Vec<String> = codes
            .iter()
            .enumerate()
            .map(|(i, &code)| row("u", at(i as i64, 0), code))
            .collect();
        let input = input.join("\n");
        let builds = compute_builds(csv_source(input.as_bytes()), at(0, 0), at(3_600, 0)).unwrap();

        prop_assert_eq!(builds.num, codes.len() as u64);
        if codes.is_empty() {
            prop_assert!(builds.rate_success.is_none());
        } else {
            let ok = codes.iter().filter(|&&c| c == 0).count() as f64;
            let rate = builds.rate_success.unwrap();
            prop_assert!((rate - ok / codes.len() as f64).abs() < 1e-12);
            prop_assert!(!builds.top_err_codes.contains(&0));
            prop_assert!(builds.top_err_codes.len() <= 5);
        }
    }
}
