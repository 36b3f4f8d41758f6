//! Plain-text month report for non-interactive output (`--view report`).

use std::fmt::Write;

use waka_core::formatting::{format_duration, format_hours, format_number};
use waka_core::models::MonthKey;
use waka_data::analysis::MonthReport;

const RULE_WIDTH: usize = 60;

/// Render `report` as plain text.  `months` lists every month in the export
/// so the reader knows what else can be selected.
pub fn render_report(report: &MonthReport, months: &[MonthKey]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report, months);
    out
}

fn write_report(out: &mut String, report: &MonthReport, months: &[MonthKey]) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "WakaTime Coding Report: {}", report.month.label())?;
    writeln!(out, "{rule}")?;

    let available = months
        .iter()
        .map(MonthKey::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "Available months: {available}")?;
    writeln!(out)?;

    match report.stats.as_ref() {
        Some(stats) => {
            writeln!(out, "Total Hours:    {}", format_hours(stats.total_hours))?;
            writeln!(out, "Avg Hours/Day:  {}", format_hours(stats.avg_hours_per_day))?;
            writeln!(out, "Max Hours/Day:  {}", format_hours(stats.max_hours_per_day))?;
        }
        None => writeln!(out, "No coding activity recorded for {}", report.month.label())?,
    }

    writeln!(out)?;
    writeln!(out, "Top Coding Days")?;
    if report.top_days.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (i, day) in report.top_days.iter().enumerate() {
        let langs = day
            .top_languages
            .iter()
            .map(|l| format!("{} {}h", l.name, format_hours(l.hours())))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "  #{:<2} {}  {:>7}h  {}",
            i + 1,
            day.date,
            format_hours(day.hours),
            langs
        )?;
    }

    if !report.daily.is_empty() {
        writeln!(out)?;
        writeln!(out, "Daily Programming Hours")?;
        for point in &report.daily {
            writeln!(out, "  {}  {:>7}h", point.date, format_hours(point.rounded_hours()))?;
        }
    }

    let total = report.language_total_seconds();
    if total > 0 {
        writeln!(out)?;
        writeln!(out, "Language Distribution")?;
        for share in report.languages_by_time() {
            writeln!(
                out,
                "  {:<16} {:>5}%  {}",
                share.name,
                format_number(share.percent_of(total), 1),
                format_duration(share.total_seconds)
            )?;
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
