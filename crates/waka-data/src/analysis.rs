//! Monthly statistics, top-day ranking and the per-month report pipeline.

use serde::Serialize;
use tracing::debug;

use waka_core::models::{
    DailyHoursPoint, DailyRecord, LanguageDuration, LanguageShare, MonthKey, MonthlyStats,
    TopDayEntry, TOP_LANGUAGES_PER_DAY,
};

use crate::aggregator::{daily_hours, filter_by_month, language_shares};

// ── Statistics ────────────────────────────────────────────────────────────────

/// Total, mean and maximum hours over `points`.
///
/// Returns `None` when there are no days, which is distinct from a month of
/// days that each tracked zero hours.
pub fn monthly_stats(points: &[DailyHoursPoint]) -> Option<MonthlyStats> {
    if points.is_empty() {
        return None;
    }

    let total_hours: f64 = points.iter().map(|p| p.hours).sum();
    let max_hours_per_day = points
        .iter()
        .map(|p| p.hours)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(MonthlyStats {
        total_hours,
        avg_hours_per_day: total_hours / points.len() as f64,
        max_hours_per_day,
    })
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// Rank every record by hours and keep the first `limit`.
///
/// Operates on the whole record set, not a single month. Sorting uses
/// full-precision hours and is stable, so equal days keep input order.
pub fn top_days(records: &[DailyRecord], limit: usize) -> Vec<TopDayEntry> {
    if limit == 0 {
        return Vec::new();
    }

    let mut entries: Vec<TopDayEntry> = records
        .iter()
        .map(|r| TopDayEntry {
            date: r.date,
            hours: r.hours(),
            top_languages: top_languages(&r.languages, TOP_LANGUAGES_PER_DAY),
        })
        .collect();

    entries.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    entries.truncate(limit);
    entries
}

/// The `count` languages with the most seconds, descending; ties keep the
/// breakdown order.
fn top_languages(languages: &[LanguageDuration], count: usize) -> Vec<LanguageDuration> {
    let mut ranked = languages.to_vec();
    ranked.sort_by(|a, b| b.total_seconds.cmp(&a.total_seconds));
    ranked.truncate(count);
    ranked
}

// ── MonthReport ───────────────────────────────────────────────────────────────

/// Every derived view the dashboard shows for one selected month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub month: MonthKey,
    /// Hours per tracked day of the month, in input order.
    pub daily: Vec<DailyHoursPoint>,
    /// Per-language totals for the month, first-seen order.
    pub languages: Vec<LanguageShare>,
    /// `None` when the month has no tracked days.
    pub stats: Option<MonthlyStats>,
    /// Best days across the whole export (not just this month).
    pub top_days: Vec<TopDayEntry>,
}

impl MonthReport {
    /// Sum of all language seconds, the denominator for share percentages.
    pub fn language_total_seconds(&self) -> u64 {
        self.languages
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.total_seconds))
    }

    /// Language shares ordered by time, largest first (stable on ties).
    pub fn languages_by_time(&self) -> Vec<&LanguageShare> {
        let mut ranked: Vec<&LanguageShare> = self.languages.iter().collect();
        ranked.sort_by(|a, b| b.total_seconds.cmp(&a.total_seconds));
        ranked
    }
}

/// Run filter → aggregate → statistics for `month` and rank the top days.
pub fn analyze_month(records: &[DailyRecord], month: MonthKey, top_limit: usize) -> MonthReport {
    let in_month = filter_by_month(records, month);
    let daily = daily_hours(in_month.iter().copied());
    let languages = language_shares(in_month.iter().copied());
    let stats = monthly_stats(&daily);
    let ranked = top_days(records, top_limit);

    debug!(
        "Analysed {}: {} days, {} languages, {} top days",
        month,
        daily.len(),
        languages.len(),
        ranked.len()
    );

    MonthReport {
        month,
        daily,
        languages,
        stats,
        top_days: ranked,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
