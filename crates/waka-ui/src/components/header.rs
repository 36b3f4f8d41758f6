use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Month and position information in `[ October 2019 | 1/3 ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Human-readable month label, e.g. "October 2019".
    pub month_label: String,
    /// Zero-based index of the selected month.
    pub position: usize,
    /// Number of months available for navigation.
    pub month_count: usize,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        month_label: impl Into<String>,
        position: usize,
        month_count: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            month_label: month_label.into(),
            position,
            month_count,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_accent),
                Span::styled(" WAKATIME CODING DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.month_label.clone(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.position_text(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }

    /// `"i/n"` with a one-based index, `"0/0"` when nothing is loaded.
    fn position_text(&self) -> String {
        if self.month_count == 0 {
            return "0/0".to_string();
        }
        format!("{}/{}", self.position + 1, self.month_count)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
