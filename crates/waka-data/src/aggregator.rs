//! Month indexing, month filtering and per-month aggregation.
//!
//! All functions are pure: they borrow the records, never mutate them, and
//! return freshly built views.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use waka_core::models::{DailyHoursPoint, DailyRecord, LanguageShare, MonthKey};

// ── Month indexer ─────────────────────────────────────────────────────────────

/// Distinct months present in `records`, ascending.
pub fn list_months(records: &[DailyRecord]) -> Vec<MonthKey> {
    // BTreeSet gives dedup and chronological order in one pass.
    let months: BTreeSet<MonthKey> = records.iter().map(DailyRecord::month).collect();
    months.into_iter().collect()
}

/// Month preselected when a dataset is first loaded: the month of the first
/// record in input order, or `None` for an empty set.
pub fn default_month(records: &[DailyRecord]) -> Option<MonthKey> {
    records.first().map(DailyRecord::month)
}

// ── Month filter ──────────────────────────────────────────────────────────────

/// Records dated inside `month`, in input order.
///
/// An unknown month yields an empty vector.
pub fn filter_by_month(records: &[DailyRecord], month: MonthKey) -> Vec<&DailyRecord> {
    records.iter().filter(|r| month.contains(r.date)).collect()
}

// ── Daily / language aggregation ──────────────────────────────────────────────

/// One full-precision hours point per record, in input order.
pub fn daily_hours<'a, I>(records: I) -> Vec<DailyHoursPoint>
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    records
        .into_iter()
        .map(|r| DailyHoursPoint {
            date: r.date,
            hours: r.hours(),
        })
        .collect()
}

/// Total seconds per language across `records`.
///
/// Names match exactly (case-sensitive). Output is in first-seen order, not
/// sorted by magnitude.
pub fn language_shares<'a, I>(records: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut totals: IndexMap<&str, u64> = IndexMap::new();

    for record in records {
        for lang in &record.languages {
            let total = totals.entry(lang.name.as_str()).or_insert(0);
            *total = total.saturating_add(lang.total_seconds);
        }
    }

    totals
        .into_iter()
        .map(|(name, total_seconds)| LanguageShare {
            name: name.to_string(),
            total_seconds,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use waka_core::models::LanguageDuration;

    fn record(date: &str, total: u64, langs: &[(&str, u64)]) -> DailyRecord {
        DailyRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total,
            langs
                .iter()
                .map(|(name, secs)| LanguageDuration::new(*name, *secs))
                .collect(),
        )
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn sample() -> Vec<DailyRecord> {
        vec![
            record("2019-11-02", 7_200, &[("Rust", 5_400), ("TOML", 600)]),
            record("2019-10-17", 16_200, &[("JavaScript", 8_100), ("CSS", 4_050), ("HTML", 4_050)]),
            record("2020-01-05", 1_800, &[("Rust", 1_800)]),
            record("2019-10-20", 3_600, &[("CSS", 1_000), ("Rust", 2_000)]),
        ]
    }

    // ── list_months ───────────────────────────────────────────────────────────

    #[test]
    fn test_list_months_empty() {
        assert!(list_months(&[]).is_empty());
    }

    #[test]
    fn test_list_months_distinct_and_sorted() {
        let months = list_months(&sample());
        let keys: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(keys, vec!["2019-10", "2019-11", "2020-01"]);
    }

    #[test]
    fn test_list_months_covers_every_record() {
        let records = sample();
        let months = list_months(&records);
        for r in &records {
            assert!(months.contains(&r.month()), "{} missing", r.month());
        }
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_list_months_two_records_different_months() {
        let records = vec![
            record("2019-12-31", 60, &[]),
            record("2019-01-01", 60, &[]),
        ];
        let keys: Vec<String> = list_months(&records).iter().map(|m| m.to_string()).collect();
        assert_eq!(keys, vec!["2019-01", "2019-12"]);
        for key in list_months(&records) {
            assert_eq!(filter_by_month(&records, key).len(), 1);
        }
    }

    // ── default_month ─────────────────────────────────────────────────────────

    #[test]
    fn test_default_month_is_first_record_month() {
        assert_eq!(default_month(&sample()), Some(month("2019-11")));
        assert_eq!(default_month(&[]), None);
    }

    // ── filter_by_month ───────────────────────────────────────────────────────

    #[test]
    fn test_filter_by_month_preserves_order() {
        let records = sample();
        let october = filter_by_month(&records, month("2019-10"));
        let dates: Vec<String> = october.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2019-10-17", "2019-10-20"]);
    }

    #[test]
    fn test_filter_by_month_only_matching_records() {
        let records = sample();
        for key in list_months(&records) {
            for r in filter_by_month(&records, key) {
                assert_eq!(r.month(), key);
                assert!(records.contains(r));
            }
        }
    }

    #[test]
    fn test_filter_by_month_unknown_month_is_empty() {
        assert!(filter_by_month(&sample(), month("2018-05")).is_empty());
        assert!(filter_by_month(&[], month("2019-10")).is_empty());
    }

    #[test]
    fn test_filter_by_month_same_month_other_year() {
        let records = vec![record("2018-10-17", 60, &[]), record("2019-10-17", 60, &[])];
        let hits = filter_by_month(&records, month("2019-10"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date.to_string(), "2019-10-17");
    }

    // ── daily_hours ───────────────────────────────────────────────────────────

    #[test]
    fn test_daily_hours_single_record() {
        let records = vec![record("2019-10-17", 16_200, &[])];
        let points = daily_hours(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date.to_string(), "2019-10-17");
        assert_eq!(points[0].rounded_hours(), 4.5);
    }

    #[test]
    fn test_daily_hours_keeps_full_precision() {
        let records = vec![record("2019-10-17", 1_000, &[])];
        let points = daily_hours(&records);
        assert!((points[0].hours - 1_000.0 / 3_600.0).abs() < 1e-15);
        assert_eq!(points[0].rounded_hours(), 0.28);
    }

    #[test]
    fn test_daily_hours_from_filtered_refs() {
        let records = sample();
        let october = filter_by_month(&records, month("2019-10"));
        let points = daily_hours(october.iter().copied());
        let hours: Vec<f64> = points.iter().map(|p| p.hours).collect();
        assert_eq!(hours, vec![4.5, 1.0]);
    }

    #[test]
    fn test_daily_hours_empty() {
        let empty: Vec<DailyRecord> = Vec::new();
        assert!(daily_hours(&empty).is_empty());
    }

    // ── language_shares ───────────────────────────────────────────────────────

    #[test]
    fn test_language_shares_single_record() {
        let records = vec![record(
            "2019-10-17",
            16_200,
            &[("JavaScript", 8_100), ("CSS", 4_050), ("HTML", 4_050)],
        )];
        let shares = language_shares(&records);
        let pairs: Vec<(&str, u64)> = shares
            .iter()
            .map(|s| (s.name.as_str(), s.total_seconds))
            .collect();
        assert_eq!(
            pairs,
            vec![("JavaScript", 8_100), ("CSS", 4_050), ("HTML", 4_050)]
        );
    }

    #[test]
    fn test_language_shares_first_seen_order_and_sums() {
        let records = sample();
        let shares = language_shares(&records);
        let pairs: Vec<(&str, u64)> = shares
            .iter()
            .map(|s| (s.name.as_str(), s.total_seconds))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Rust", 9_200),
                ("TOML", 600),
                ("JavaScript", 8_100),
                ("CSS", 5_050),
                ("HTML", 4_050),
            ]
        );
    }

    #[test]
    fn test_language_shares_totals_independent_of_order() {
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = language_shares(&records);
        let backward = language_shares(&reversed);
        assert_eq!(forward.len(), backward.len());
        for share in &forward {
            let other = backward.iter().find(|s| s.name == share.name).unwrap();
            assert_eq!(other.total_seconds, share.total_seconds);
        }
    }

    #[test]
    fn test_language_shares_case_sensitive() {
        let records = vec![
            record("2019-10-17", 10, &[("rust", 4)]),
            record("2019-10-18", 10, &[("Rust", 6)]),
        ];
        assert_eq!(language_shares(&records).len(), 2);
    }

    #[test]
    fn test_language_shares_saturates() {
        let records = vec![
            record("2019-10-17", 10, &[("Rust", u64::MAX - 5)]),
            record("2019-10-18", 10, &[("Rust", 100)]),
        ];
        let shares = language_shares(&records);
        assert_eq!(shares[0].total_seconds, u64::MAX);
    }

    #[test]
    fn test_language_shares_empty() {
        let empty: Vec<DailyRecord> = Vec::new();
        assert!(language_shares(&empty).is_empty());
        let no_langs = vec![record("2019-10-17", 10, &[])];
        assert!(language_shares(&no_langs).is_empty());
    }
}
