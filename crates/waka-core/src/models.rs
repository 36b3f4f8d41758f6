use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WakaError;

/// Number of top coding days ranked when no limit is given.
pub const DEFAULT_TOP_DAYS: usize = 5;

/// Number of languages listed for each top coding day.
pub const TOP_LANGUAGES_PER_DAY: usize = 3;

/// Seconds in one hour, used for every seconds → hours conversion.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Convert a whole number of seconds into fractional hours (full precision).
pub fn seconds_to_hours(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR
}

// ── Input records ─────────────────────────────────────────────────────────────

/// Time attributed to one programming language on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDuration {
    /// Language name exactly as reported (case-sensitive).
    pub name: String,
    /// Tracked seconds for this language.
    pub total_seconds: u64,
}

impl LanguageDuration {
    pub fn new(name: impl Into<String>, total_seconds: u64) -> Self {
        Self {
            name: name.into(),
            total_seconds,
        }
    }

    pub fn hours(&self) -> f64 {
        seconds_to_hours(self.total_seconds)
    }
}

/// One day of tracked coding time.
///
/// `total_seconds` is measured independently of the language breakdown, so the
/// per-language seconds need not add up to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date (serialised as `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Total tracked seconds for the day.
    pub total_seconds: u64,
    /// Per-language breakdown in the order it was reported.
    #[serde(default)]
    pub languages: Vec<LanguageDuration>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, total_seconds: u64, languages: Vec<LanguageDuration>) -> Self {
        Self {
            date,
            total_seconds,
            languages,
        }
    }

    /// Total tracked time in hours (full precision).
    pub fn hours(&self) -> f64 {
        seconds_to_hours(self.total_seconds)
    }

    /// Calendar month this record belongs to.
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

/// The validated set of daily records for one uploaded export, in input order.
///
/// Dereferences to `[DailyRecord]` so every engine operation can take a plain
/// slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet(Vec<DailyRecord>);

impl RecordSet {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self(records)
    }
}

impl Deref for RecordSet {
    type Target = [DailyRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<DailyRecord>> for RecordSet {
    fn from(records: Vec<DailyRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── MonthKey ──────────────────────────────────────────────────────────────────

/// A calendar year + month, written `YYYY-MM`.
///
/// Field order makes the derived `Ord` chronological, which is also the
/// lexicographic order of the `YYYY-MM` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from its parts. Returns `None` when `month` is not 1–12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Truncate a date to its calendar month (no timezone shifting).
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long human label, e.g. `"October 2019"`.
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = WakaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WakaError::InvalidMonth(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── Derived views ─────────────────────────────────────────────────────────────

/// Hours tracked on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHoursPoint {
    pub date: NaiveDate,
    /// Full-precision hours; round only for display.
    pub hours: f64,
}

impl DailyHoursPoint {
    /// Hours rounded to two decimal places for presentation.
    pub fn rounded_hours(&self) -> f64 {
        crate::formatting::round_hours(self.hours)
    }
}

/// Cumulative time for one language across a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub total_seconds: u64,
}

impl LanguageShare {
    pub fn hours(&self) -> f64 {
        seconds_to_hours(self.total_seconds)
    }

    /// Share of `total_seconds` as a percentage. `0.0` when the total is zero.
    pub fn percent_of(&self, total_seconds: u64) -> f64 {
        if total_seconds == 0 {
            return 0.0;
        }
        self.total_seconds as f64 / total_seconds as f64 * 100.0
    }
}

/// Summary figures for the days of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_hours: f64,
    pub avg_hours_per_day: f64,
    pub max_hours_per_day: f64,
}

/// A highly ranked day together with its most time-consuming languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDayEntry {
    pub date: NaiveDate,
    /// Full-precision hours for the day.
    pub hours: f64,
    /// Up to three languages, most seconds first.
    pub top_languages: Vec<LanguageDuration>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
