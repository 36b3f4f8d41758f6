mod bootstrap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use waka_core::models::{MonthKey, RecordSet};
use waka_core::settings::{LastUsedParams, Settings};
use waka_data::aggregator::list_months;
use waka_data::analysis::{analyze_month, MonthReport};
use waka_data::reader::load_export;
use waka_ui::app::{resolve_initial_month, App, ViewMode};
use waka_ui::report::render_report;
use waka_ui::themes::{Palette, Theme};

/// Shape of `--view json` output.
#[derive(Debug, Serialize)]
struct JsonOutput {
    months: Vec<MonthKey>,
    selected: Option<MonthKey>,
    report: Option<MonthReport>,
}

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let view_mode = ViewMode::from_name(&settings.view);
    let log_file = settings
        .log_file
        .clone()
        .or_else(|| view_mode.map(|_| bootstrap::default_log_path(&app_dir)));
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    info!("WakaTime Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "View: {}, Theme: {}, Top days: {}",
        settings.view, settings.theme, settings.top
    );

    let path = settings
        .file
        .clone()
        .context("no export file given; pass --file or set WAKA_EXPORT_FILE")?;
    let records = load_export(&path)
        .with_context(|| format!("failed to load WakaTime export {}", path.display()))?;

    let mut theme = Theme::from_name(&settings.theme);
    if let Some(colors) = settings.palette.as_deref() {
        theme = theme.with_palette(Palette::parse(colors)?);
    }

    match view_mode {
        Some(mode) => {
            let app = App::new(records, theme, mode, settings.top, settings.month);
            let last_month = app.run()?;
            remember_month(&settings, last_month);
        }
        None => {
            let output = analyze_selected(&records, settings.month, settings.top);
            if settings.view == "json" {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                match output.report.as_ref() {
                    Some(report) => print!("{}", render_report(report, &output.months)),
                    None => println!("No coding activity found in {}", path.display()),
                }
            }
        }
    }

    Ok(())
}

/// Resolve the month to show and run the analysis for it.
fn analyze_selected(records: &RecordSet, requested: Option<MonthKey>, top: usize) -> JsonOutput {
    let months = list_months(records);
    let selected = resolve_initial_month(records, &months, requested);
    let report = selected.map(|month| analyze_month(records, month, top));
    JsonOutput {
        months,
        selected,
        report,
    }
}

/// Persist the month the user ended on so the next run reopens it.
fn remember_month(settings: &Settings, month: Option<MonthKey>) {
    let mut params = LastUsedParams::from(settings);
    params.month = month;
    if let Err(e) = params.save() {
        warn!("Could not save last-used settings: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waka_data::reader::parse_export;

    const EXPORT: &str = r#"{
        "days": [
            {"date": "2019-11-02", "grand_total": {"total_seconds": 7200},
             "languages": [{"name": "Rust", "total_seconds": 7200}]},
            {"date": "2019-10-17", "grand_total": {"total_seconds": 16200},
             "languages": [{"name": "JavaScript", "total_seconds": 8100},
                           {"name": "CSS", "total_seconds": 4050},
                           {"name": "HTML", "total_seconds": 4050}]}
        ]
    }"#;

    #[test]
    fn test_analyze_selected_defaults_to_first_record_month() {
        let records = parse_export(EXPORT).unwrap();
        let output = analyze_selected(&records, None, 5);
        assert_eq!(output.months.len(), 2);
        assert_eq!(output.selected.map(|m| m.to_string()), Some("2019-11".to_string()));
        assert_eq!(output.report.unwrap().daily.len(), 1);
    }

    #[test]
    fn test_analyze_selected_requested_month() {
        let records = parse_export(EXPORT).unwrap();
        let output = analyze_selected(&records, Some("2019-10".parse().unwrap()), 1);
        let report = output.report.unwrap();
        assert_eq!(report.stats.unwrap().total_hours, 4.5);
        assert_eq!(report.top_days.len(), 1);
    }

    #[test]
    fn test_analyze_selected_empty_export() {
        let records = parse_export(r#"{"days": []}"#).unwrap();
        let output = analyze_selected(&records, None, 5);
        assert!(output.months.is_empty());
        assert!(output.selected.is_none());
        assert!(output.report.is_none());
    }

    #[test]
    fn test_json_output_shape() {
        let records = parse_export(EXPORT).unwrap();
        let output = analyze_selected(&records, Some("2019-10".parse().unwrap()), 5);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["months"], serde_json::json!(["2019-10", "2019-11"]));
        assert_eq!(value["selected"], "2019-10");
        assert_eq!(value["report"]["month"], "2019-10");
        assert_eq!(value["report"]["stats"]["total_hours"], 4.5);
    }
}
