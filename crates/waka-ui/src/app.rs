//! Application state and TUI event loop for the WakaTime dashboard.
//!
//! [`App`] owns the loaded records, the month list and the current
//! selection.  Every navigation step reruns the analysis pipeline for the
//! newly selected month; nothing else is cached between frames.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, warn};

use waka_core::models::{MonthKey, RecordSet};
use waka_data::aggregator::{default_month, filter_by_month, list_months};
use waka_data::analysis::{analyze_month, MonthReport};

use crate::dashboard_view::{self, DashboardView};
use crate::table_view::{self, TableRowData, TableTotals};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which interactive view the TUI is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Stat cards, top days and charts.
    Dashboard,
    /// One row per tracked day.
    Table,
}

impl ViewMode {
    /// Map a `--view` value to an interactive mode.  Non-interactive views
    /// (`report`, `json`) have no mode.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Self::Dashboard),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Maximum number of ranked days.
    pub top_limit: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    records: RecordSet,
    months: Vec<MonthKey>,
    selected: usize,
    report: Option<MonthReport>,
}

impl App {
    /// Build the application around `records`.
    ///
    /// `requested` selects the initial month when it exists in the data;
    /// otherwise the month of the first record is used.
    pub fn new(
        records: RecordSet,
        theme: Theme,
        view_mode: ViewMode,
        top_limit: usize,
        requested: Option<MonthKey>,
    ) -> Self {
        let months = list_months(&records);
        let selected = resolve_initial_month(&records, &months, requested)
            .and_then(|month| months.iter().position(|m| *m == month))
            .unwrap_or(0);

        let mut app = Self {
            theme,
            view_mode,
            top_limit,
            should_quit: false,
            records,
            months,
            selected,
            report: None,
        };
        app.refresh_report();
        app
    }

    /// Months available for navigation, ascending.
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// Currently selected month, `None` for an empty export.
    pub fn selected_month(&self) -> Option<MonthKey> {
        self.months.get(self.selected).copied()
    }

    /// Analysis of the selected month.
    pub fn report(&self) -> Option<&MonthReport> {
        self.report.as_ref()
    }

    /// Move to the next month.  Returns `false` at the end of the list.
    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 >= self.months.len() {
            return false;
        }
        self.selected += 1;
        self.refresh_report();
        true
    }

    /// Move to the previous month.  Returns `false` at the start of the list.
    pub fn select_previous(&mut self) -> bool {
        if self.selected == 0 || self.months.is_empty() {
            return false;
        }
        self.selected -= 1;
        self.refresh_report();
        true
    }

    /// Apply a key press: arrows / `h` `l` navigate, `q` or `Ctrl+C` quit.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_previous();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_next();
            }
            KeyCode::Tab => {
                self.view_mode = match self.view_mode {
                    ViewMode::Dashboard => ViewMode::Table,
                    ViewMode::Table => ViewMode::Dashboard,
                };
            }
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current thread.  Returns the month selected on exit.
    pub fn run(mut self) -> io::Result<Option<MonthKey>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(self.selected_month());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let Some(report) = self.report.as_ref() else {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        };

        match self.view_mode {
            ViewMode::Dashboard => {
                let view = DashboardView {
                    report,
                    position: self.selected,
                    month_count: self.months.len(),
                };
                dashboard_view::render_dashboard(frame, area, &view, &self.theme);
            }
            ViewMode::Table => {
                let rows = self.table_rows(report.month);
                let totals = TableTotals::new(report.stats.as_ref(), rows.len());
                let title = format!(
                    "{} [{}/{}]",
                    report.month.label(),
                    self.selected + 1,
                    self.months.len()
                );
                table_view::render_table_view(frame, area, &title, &rows, &totals, &self.theme);
            }
        }
    }

    /// Daily table rows for `month`, in input order.
    pub fn table_rows(&self, month: MonthKey) -> Vec<TableRowData> {
        filter_by_month(&self.records, month)
            .into_iter()
            .map(TableRowData::from_record)
            .collect()
    }

    fn refresh_report(&mut self) {
        self.report = self
            .selected_month()
            .map(|month| analyze_month(&self.records, month, self.top_limit));
        if let Some(month) = self.selected_month() {
            debug!("Selected month {} ({}/{})", month, self.selected + 1, self.months.len());
        }
    }
}

/// Month to open first: `requested` if the data has it, else the default.
///
/// A requested month with no records is logged and ignored.
pub fn resolve_initial_month(
    records: &RecordSet,
    months: &[MonthKey],
    requested: Option<MonthKey>,
) -> Option<MonthKey> {
    match requested {
        Some(month) if months.contains(&month) => Some(month),
        Some(month) => {
            warn!("Month {} has no records, falling back to default", month);
            default_month(records)
        }
        None => default_month(records),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use waka_core::models::{DailyRecord, LanguageDuration};

    fn record(date: &str, total: u64, langs: &[(&str, u64)]) -> DailyRecord {
        DailyRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total,
            langs
                .iter()
                .map(|(n, s)| LanguageDuration::new(*n, *s))
                .collect(),
        )
    }

    /// Input order deliberately starts in November.
    fn sample() -> RecordSet {
        RecordSet::new(vec![
            record("2019-11-01", 36_000, &[("Rust", 30_000), ("TOML", 6_000)]),
            record(
                "2019-10-17",
                16_200,
                &[("JavaScript", 8_100), ("CSS", 4_050), ("HTML", 4_050)],
            ),
            record("2019-10-18", 7_200, &[("Rust", 7_200)]),
            record("2020-01-03", 1_800, &[("Go", 1_800)]),
        ])
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(requested: Option<MonthKey>) -> App {
        App::new(sample(), Theme::dark(), ViewMode::Dashboard, 5, requested)
    }

    // ── ViewMode ──────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_from_name() {
        assert_eq!(ViewMode::from_name("dashboard"), Some(ViewMode::Dashboard));
        assert_eq!(ViewMode::from_name("table"), Some(ViewMode::Table));
        assert_eq!(ViewMode::from_name("report"), None);
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_app_defaults_to_first_record_month() {
        let app = app_with(None);
        assert_eq!(app.months().len(), 3);
        assert_eq!(app.selected_month(), Some(month("2019-11")));
        assert!(!app.should_quit);
        let report = app.report().unwrap();
        assert_eq!(report.month, month("2019-11"));
        assert_eq!(report.stats.as_ref().unwrap().total_hours, 10.0);
    }

    #[test]
    fn test_app_uses_requested_month() {
        let app = app_with(Some(month("2019-10")));
        assert_eq!(app.selected_month(), Some(month("2019-10")));
        assert_eq!(app.report().unwrap().daily.len(), 2);
    }

    #[test]
    fn test_app_unknown_requested_month_falls_back() {
        let app = app_with(Some(month("2018-02")));
        assert_eq!(app.selected_month(), Some(month("2019-11")));
    }

    #[test]
    fn test_app_empty_records() {
        let mut app = App::new(RecordSet::default(), Theme::dark(), ViewMode::Table, 5, None);
        assert!(app.months().is_empty());
        assert_eq!(app.selected_month(), None);
        assert!(app.report().is_none());
        assert!(!app.select_next());
        assert!(!app.select_previous());
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    #[test]
    fn test_navigation_bounds() {
        let mut app = app_with(Some(month("2019-10")));
        assert!(!app.select_previous());
        assert!(app.select_next());
        assert!(app.select_next());
        assert_eq!(app.selected_month(), Some(month("2020-01")));
        assert!(!app.select_next());
        assert_eq!(app.report().unwrap().month, month("2020-01"));
    }

    #[test]
    fn test_handle_key_navigation() {
        let mut app = app_with(None);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.selected_month(), Some(month("2019-10")));
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected_month(), Some(month("2020-01")));
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.selected_month(), Some(month("2019-11")));
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app_with(None);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = app_with(None);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = app_with(None);
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_handle_key_tab_toggles_view() {
        let mut app = app_with(None);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Table);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Dashboard);
    }

    #[test]
    fn test_top_days_span_all_months() {
        let app = app_with(Some(month("2020-01")));
        let report = app.report().unwrap();
        assert_eq!(report.top_days.len(), 4);
        assert_eq!(report.top_days[0].date.to_string(), "2019-11-01");
    }

    #[test]
    fn test_table_rows_for_month() {
        let app = app_with(None);
        let rows = app.table_rows(month("2019-10"));
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2019-10-17", "2019-10-18"]);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_both_modes_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = app_with(None);
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.view_mode = ViewMode::Table;
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_render_empty_shows_no_data() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let app = App::new(RecordSet::default(), Theme::dark(), ViewMode::Dashboard, 5, None);
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No coding activity found"));
    }
}
