//! Daily breakdown table for the selected month.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per tracked
//! day plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use waka_core::formatting;
use waka_core::models::{DailyRecord, MonthlyStats, SECONDS_PER_HOUR};

use crate::themes::Theme;

/// Data for a single row in the daily table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowData {
    /// Day label, e.g. `"2019-10-17"`.
    pub date: String,
    /// Full-precision hours for the day.
    pub hours: f64,
    /// Language with the most time that day, if any were recorded.
    pub top_language: Option<String>,
    /// Number of languages in the day's breakdown.
    pub language_count: usize,
}

impl TableRowData {
    pub fn from_record(record: &DailyRecord) -> Self {
        let top_language = record
            .languages
            .iter()
            .reduce(|best, lang| {
                if lang.total_seconds > best.total_seconds {
                    lang
                } else {
                    best
                }
            })
            .map(|lang| lang.name.clone());

        Self {
            date: record.date.to_string(),
            hours: record.hours(),
            top_language,
            language_count: record.languages.len(),
        }
    }
}

/// Aggregated totals across all rows in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableTotals {
    pub total_hours: f64,
    pub avg_hours_per_day: f64,
    pub max_hours_per_day: f64,
    /// Number of days (rows) represented.
    pub days: usize,
}

impl TableTotals {
    /// Totals for `days` rows; zeroed when the month has no statistics.
    pub fn new(stats: Option<&MonthlyStats>, days: usize) -> Self {
        match stats {
            Some(s) => Self {
                total_hours: s.total_hours,
                avg_hours_per_day: s.avg_hours_per_day,
                max_hours_per_day: s.max_hours_per_day,
                days,
            },
            None => Self {
                total_hours: 0.0,
                avg_hours_per_day: 0.0,
                max_hours_per_day: 0.0,
                days,
            },
        }
    }
}

/// Render the daily table into `area`.
///
/// The table has one data row per [`TableRowData`] entry, followed by a
/// highlighted totals row, all within a bordered block titled `title`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[TableRowData],
    totals: &TableTotals,
    theme: &Theme,
) {
    let header_cells = ["Date", "Hours", "Time", "Top Language", "Languages"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let seconds = (row.hours * SECONDS_PER_HOUR).round() as u64;
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(formatting::format_hours(row.hours)),
                Cell::from(formatting::format_duration(seconds)),
                Cell::from(row.top_language.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(row.language_count.to_string()),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(theme.table_total),
        Cell::from(formatting::format_hours(totals.total_hours)),
        Cell::from(format!("{} days", totals.days)),
        Cell::from(format!(
            "avg {}",
            formatting::format_hours(totals.avg_hours_per_day)
        )),
        Cell::from(format!(
            "max {}",
            formatting::format_hours(totals.max_hours_per_day)
        )),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(20),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the export has no tracked days.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No coding activity found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "The export contains no tracked days.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" WakaTime Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
