use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use waka_core::formatting::{format_duration, format_number};

/// Configuration controlling visual appearance of a share bar.
pub struct ShareBarConfig {
    /// Width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    /// Display width the language name is padded to.
    pub label_width: usize,
    /// Character used to fill the share portion of the bar.
    pub filled_char: char,
    /// Character used to fill the rest of the bar.
    pub empty_char: char,
}

impl Default for ShareBarConfig {
    fn default() -> Self {
        Self {
            width: 20,
            label_width: 14,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── LanguageShareBar ──────────────────────────────────────────────────────────

/// One row of the language distribution: padded name, a bar filled in the
/// language's palette colour, its percentage and its tracked time.
pub struct LanguageShareBar<'a> {
    pub name: &'a str,
    /// Share of the month, clamped to `[0.0, 100.0]`.
    pub percentage: f64,
    pub total_seconds: u64,
    /// Style of the filled portion.
    pub color: Style,
    pub theme: &'a Theme,
    pub config: ShareBarConfig,
}

impl<'a> LanguageShareBar<'a> {
    pub fn new(
        name: &'a str,
        percentage: f64,
        total_seconds: u64,
        color: Style,
        theme: &'a Theme,
    ) -> Self {
        Self {
            name,
            percentage: percentage.clamp(0.0, 100.0),
            total_seconds,
            color,
            theme,
            config: ShareBarConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShareBarConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the bar as a [`Line`].
    ///
    /// Format: `"Rust           ██████░░░░  62.5%  3h 45m"`
    pub fn to_line(&self) -> Line<'a> {
        let filled = ((self.percentage / 100.0) * self.config.width as f64).round() as u16;
        let filled = filled.min(self.config.width);
        let empty = self.config.width - filled;

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        Line::from(vec![
            Span::styled(pad_label(self.name, self.config.label_width), self.theme.label),
            Span::raw(" "),
            Span::styled(filled_str, self.color),
            Span::styled(empty_str, self.theme.share_empty),
            Span::styled(
                format!(" {:>5}%", format_number(self.percentage, 1)),
                self.theme.value,
            ),
            Span::styled(
                format!("  {}", format_duration(self.total_seconds)),
                self.theme.dim,
            ),
        ])
    }
}

/// Pad or truncate `label` to exactly `width` display columns.
///
/// Truncation ends with `…` so long names stay recognisable.
pub fn pad_label(label: &str, width: usize) -> String {
    let current = label.width();
    if current <= width {
        return format!("{label}{}", " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
