//! Month dashboard for the WakaTime TUI.
//!
//! Renders the header, headline statistics, the top coding days, a bar chart
//! of daily hours and the language distribution for one analysed month.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Stylize,
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use waka_core::formatting::{format_hours, round_hours};
use waka_core::models::LanguageShare;
use waka_data::analysis::MonthReport;

use crate::components::header::Header;
use crate::components::share_bar::{LanguageShareBar, ShareBarConfig};
use crate::components::stat_card::stat_cards;
use crate::themes::Theme;

/// Key help shown on the last line of the dashboard.
pub const KEY_HELP: &str = "←/h previous month   →/l next month   Tab table   q quit";

/// Everything needed to draw one dashboard frame.
pub struct DashboardView<'a> {
    pub report: &'a MonthReport,
    /// Zero-based index of `report.month` among the available months.
    pub position: usize,
    pub month_count: usize,
}

/// Draw the full dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let report = view.report;
    let top_height = report.top_days.len().max(1) as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(top_height),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(report.month.label(), view.position, view.month_count, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    render_stats(frame, chunks[1], report, theme);

    frame.render_widget(
        Paragraph::new(Text::from(build_top_day_lines(report, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Top Coding Days "),
        ),
        chunks[2],
    );

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);
    render_daily_chart(frame, charts[0], report, theme);
    render_languages(frame, charts[1], report, theme);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(KEY_HELP, theme.dim))),
        chunks[4],
    );
}

// ── Sections ─────────────────────────────────────────────────────────────────

fn render_stats(frame: &mut Frame, area: Rect, report: &MonthReport, theme: &Theme) {
    let Some(stats) = report.stats.as_ref() else {
        frame.render_widget(
            Paragraph::new(no_activity_line(report, theme))
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, cell) in stat_cards(stats, theme).iter().zip(cells.iter()) {
        frame.render_widget(
            Paragraph::new(Text::from(card.to_lines()))
                .block(Block::default().borders(Borders::ALL)),
            *cell,
        );
    }
}

fn render_daily_chart(frame: &mut Frame, area: Rect, report: &MonthReport, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Daily Programming Hours ");

    if report.daily.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No days tracked", theme.dim)).block(block),
            area,
        );
        return;
    }

    let bars = build_daily_bars(report, theme);
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = daily_bar_width(inner_width, bars.len());

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_languages(frame: &mut Frame, area: Rect, report: &MonthReport, theme: &Theme) {
    let bar_width = area.width.saturating_sub(2 + 14 + 1 + 7 + 9).clamp(5, 30);
    frame.render_widget(
        Paragraph::new(Text::from(build_language_lines(report, theme, bar_width))).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Language Distribution "),
        ),
        area,
    );
}

// ── Line / bar builders ──────────────────────────────────────────────────────

/// One line per ranked day: rank badge, date, hours and its top languages.
pub fn build_top_day_lines<'a>(report: &MonthReport, theme: &'a Theme) -> Vec<Line<'a>> {
    if report.top_days.is_empty() {
        return vec![Line::from(Span::styled("No days ranked", theme.dim))];
    }

    report
        .top_days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let rank = i + 1;
            let langs = day
                .top_languages
                .iter()
                .map(|l| format!("{} {}h", l.name, format_hours(l.hours())))
                .collect::<Vec<_>>()
                .join(" · ");
            Line::from(vec![
                Span::styled(format!("#{rank:<2} "), theme.rank_style(rank)),
                Span::styled(day.date.to_string(), theme.text),
                Span::styled(format!("  {:>7}h  ", format_hours(day.hours)), theme.value),
                Span::styled(langs, theme.dim),
            ])
        })
        .collect()
}

/// Language rows, largest first, each coloured by its first-seen position so
/// a language keeps its colour however the list is ordered.
pub fn build_language_lines<'a>(
    report: &'a MonthReport,
    theme: &'a Theme,
    bar_width: u16,
) -> Vec<Line<'a>> {
    let total = report.language_total_seconds();
    if total == 0 {
        return vec![Line::from(Span::styled("No languages recorded", theme.dim))];
    }

    let mut indexed: Vec<(usize, &LanguageShare)> = report.languages.iter().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_seconds.cmp(&a.1.total_seconds));

    indexed
        .into_iter()
        .map(|(index, share)| {
            LanguageShareBar::new(
                &share.name,
                share.percent_of(total),
                share.total_seconds,
                theme.language_style(index),
                theme,
            )
            .with_config(ShareBarConfig {
                width: bar_width,
                ..ShareBarConfig::default()
            })
            .to_line()
        })
        .collect()
}

/// One bar per tracked day, valued in hundredths of an hour.  The longest
/// day is drawn in the peak style.
pub fn build_daily_bars<'a>(report: &MonthReport, theme: &Theme) -> Vec<Bar<'a>> {
    let peak = report
        .daily
        .iter()
        .map(|p| p.hours)
        .fold(f64::NEG_INFINITY, f64::max);

    report
        .daily
        .iter()
        .map(|point| {
            let rounded = round_hours(point.hours);
            let style = if point.hours >= peak {
                theme.bar_peak
            } else {
                theme.bar
            };
            Bar::default()
                .value((rounded * 100.0).round() as u64)
                .label(Line::from(point.date.format("%d").to_string()))
                .text_value(format_hours(rounded))
                .style(style)
                .value_style(style.reversed())
        })
        .collect()
}

/// Widest bar (1..=6 columns) that fits `count` bars with a one-column gap.
pub fn daily_bar_width(inner_width: usize, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let per_bar = (inner_width + 1) / count;
    per_bar.saturating_sub(1).clamp(1, 6) as u16
}

fn no_activity_line<'a>(report: &MonthReport, theme: &'a Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("No coding activity recorded for {}", report.month.label()),
        theme.warning,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
