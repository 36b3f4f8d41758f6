//! WakaTime export loading and shape validation.
//!
//! Reads the JSON document produced by WakaTime's "export my data" feature
//! and converts its `days` array into a validated [`RecordSet`].  Everything
//! downstream of this module may assume well-formed input.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use waka_core::error::{Result, WakaError};
use waka_core::models::{DailyRecord, LanguageDuration, RecordSet};

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and validate the export at `path`.
pub fn load_export(path: &Path) -> Result<RecordSet> {
    let content = std::fs::read_to_string(path).map_err(|source| WakaError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_export(&content)?;
    info!(
        "Loaded {} days from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse and validate an export document held in memory.
///
/// Expected shape (extra fields are ignored):
///
/// ```json
/// { "days": [ { "date": "2019-10-17",
///               "grand_total": { "total_seconds": 16200.0 },
///               "languages": [ { "name": "Rust", "total_seconds": 8100.0 } ] } ] }
/// ```
///
/// Records keep the order of the `days` array.
pub fn parse_export(content: &str) -> Result<RecordSet> {
    let document: Value = serde_json::from_str(content)?;

    let days = document
        .get("days")
        .and_then(Value::as_array)
        .ok_or_else(|| WakaError::MissingField("days".to_string()))?;

    let mut seen_dates: HashSet<NaiveDate> = HashSet::with_capacity(days.len());
    let mut records: Vec<DailyRecord> = Vec::with_capacity(days.len());

    for (index, day) in days.iter().enumerate() {
        let record = parse_day(index, day)?;
        if !seen_dates.insert(record.date) {
            return Err(WakaError::DuplicateDate(record.date.to_string()));
        }
        records.push(record);
    }

    debug!("Parsed {} day entries", records.len());
    Ok(RecordSet::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Strict `YYYY-MM-DD` shape; calendar validity is checked by chrono.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("regex is valid"))
}

/// Validate and convert one element of the `days` array.
fn parse_day(index: usize, day: &Value) -> Result<DailyRecord> {
    let raw_date = day
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| WakaError::MissingField(format!("days[{index}].date")))?;
    let date = parse_date(raw_date)?;

    let total_value = day
        .get("grand_total")
        .and_then(|g| g.get("total_seconds"))
        .ok_or_else(|| {
            WakaError::MissingField(format!("days[{index}].grand_total.total_seconds"))
        })?;
    let total_seconds =
        parse_seconds(total_value, &format!("days[{index}].grand_total.total_seconds"))?;

    let languages = match day.get("languages") {
        None | Some(Value::Null) => {
            debug!("{} has no language breakdown", raw_date);
            Vec::new()
        }
        Some(Value::Array(items)) => parse_languages(index, items)?,
        Some(_) => {
            return Err(WakaError::UnexpectedType {
                field: format!("days[{index}].languages"),
                expected: "array",
            })
        }
    };

    Ok(DailyRecord::new(date, total_seconds, languages))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    if !date_pattern().is_match(raw) {
        return Err(WakaError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| WakaError::InvalidDate(raw.to_string()))
}

/// Accept any finite, non-negative JSON number that fits in `u64`; fractional
/// seconds are truncated toward zero.
fn parse_seconds(value: &Value, field: &str) -> Result<u64> {
    let invalid = || WakaError::InvalidDuration {
        field: field.to_string(),
        value: value.to_string(),
    };

    if let Some(whole) = value.as_u64() {
        return Ok(whole);
    }
    match value.as_f64() {
        // `u64::MAX as f64` rounds up to 2^64, so `<` keeps the cast exact.
        Some(seconds) if seconds.is_finite() && seconds >= 0.0 && seconds < u64::MAX as f64 => {
            Ok(seconds.trunc() as u64)
        }
        _ => Err(invalid()),
    }
}

/// Convert a day's language list, merging repeated names so that names are
/// unique within the record (first position wins, seconds are summed).
fn parse_languages(day_index: usize, items: &[Value]) -> Result<Vec<LanguageDuration>> {
    let mut merged: IndexMap<String, u64> = IndexMap::with_capacity(items.len());

    for (lang_index, item) in items.iter().enumerate() {
        let field = format!("days[{day_index}].languages[{lang_index}]");
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| WakaError::MissingField(format!("{field}.name")))?;
        let seconds_value = item
            .get("total_seconds")
            .ok_or_else(|| WakaError::MissingField(format!("{field}.total_seconds")))?;
        let seconds = parse_seconds(seconds_value, &format!("{field}.total_seconds"))?;

        match merged.get_mut(name) {
            Some(total) => {
                warn!("Language {} repeated in {}; merging", name, field);
                let current = *total;
                *total = current
                    .checked_add(seconds)
                    .ok_or_else(|| WakaError::InvalidDuration {
                        field: format!("{field}.total_seconds"),
                        value: format!("{current} + {seconds}"),
                    })?;
            }
            None => {
                merged.insert(name.to_string(), seconds);
            }
        }
    }

    Ok(merged
        .into_iter()
        .map(|(name, total_seconds)| LanguageDuration::new(name, total_seconds))
        .collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
