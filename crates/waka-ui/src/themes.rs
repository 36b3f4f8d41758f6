use ratatui::style::{Color, Modifier, Style};

use waka_core::error::{Result, WakaError};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// Ordered colours assigned to languages by position, cycling when there are
/// more languages than colours.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Blue, teal, amber, orange, lavender.
    pub const DASHBOARD_HEX: [&'static str; 5] =
        ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8"];

    /// Build a palette from explicit colours. An empty list falls back to
    /// [`Palette::dashboard`].
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::dashboard();
        }
        Self { colors }
    }

    /// The five-colour palette used for language charts by default.
    pub fn dashboard() -> Self {
        Self {
            colors: Self::DASHBOARD_HEX
                .iter()
                .filter_map(|hex| parse_hex_color(hex))
                .collect(),
        }
    }

    /// Basic ANSI colours for terminals without true-colour support.
    pub fn ansi() -> Self {
        Self {
            colors: vec![
                Color::Blue,
                Color::Cyan,
                Color::Yellow,
                Color::Red,
                Color::Magenta,
            ],
        }
    }

    /// Parse a comma-separated list of `#RRGGBB` colours, e.g. from `--palette`.
    pub fn parse(list: &str) -> Result<Self> {
        let colors = list
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                parse_hex_color(part)
                    .ok_or_else(|| WakaError::Config(format!("invalid palette colour: {part}")))
            })
            .collect::<Result<Vec<Color>>>()?;

        if colors.is_empty() {
            return Err(WakaError::Config("palette must contain at least one colour".to_string()));
        }
        Ok(Self { colors })
    }

    /// Colour for the language at `index`.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into an RGB colour.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

// ── Theme ─────────────────────────────────────────────────────────────────────

/// Complete theme definition carrying all UI styles used by waka-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,

    // ── Stat cards ───────────────────────────────────────────────────────────
    pub stat_total: Style,
    pub stat_average: Style,
    pub stat_max: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Daily hours bars.
    pub bar: Style,
    /// The longest day of the month.
    pub bar_peak: Style,
    /// Unfilled portion of a share bar.
    pub share_empty: Style,

    // ── Ranking ──────────────────────────────────────────────────────────────
    pub rank_first: Style,
    pub rank_other: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    /// Colours cycled across languages.
    pub palette: Palette,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),

            stat_total: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            stat_average: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            stat_max: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Blue),
            bar_peak: Style::default().fg(Color::Yellow),
            share_empty: Style::default().fg(Color::DarkGray),

            rank_first: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            rank_other: Style::default().fg(Color::White),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            palette: Palette::dashboard(),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Red),

            stat_total: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            stat_average: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            stat_max: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Blue),
            bar_peak: Style::default().fg(Color::Magenta),
            share_empty: Style::default().fg(Color::Gray),

            rank_first: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            rank_other: Style::default().fg(Color::Black),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            palette: Palette::dashboard(),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette, without bold
    /// modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),

            stat_total: Style::default().fg(Color::Blue),
            stat_average: Style::default().fg(Color::Green),
            stat_max: Style::default().fg(Color::Magenta),

            bar: Style::default().fg(Color::Cyan),
            bar_peak: Style::default().fg(Color::Yellow),
            share_empty: Style::default().fg(Color::DarkGray),

            rank_first: Style::default().fg(Color::Yellow),
            rank_other: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            palette: Palette::ansi(),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    /// Replace the language palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Foreground style for the language at `index` in a chart.
    pub fn language_style(&self, index: usize) -> Style {
        Style::default().fg(self.palette.color(index))
    }

    /// Style for the rank badge of a top day (1-based).
    pub fn rank_style(&self, rank: usize) -> Style {
        if rank == 1 {
            self.rank_first
        } else {
            self.rank_other
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.text.fg, Some(Color::White));
        assert_eq!(t.palette, Palette::dashboard());
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.header.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_uses_ansi_palette() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.palette, Palette::ansi());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").text.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("dark").text.fg, Some(Color::White));
        assert_eq!(Theme::from_name("classic").palette, Palette::ansi());
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("neon");
        assert!(t.text.fg.is_some());
    }

    // ── Palette ──────────────────────────────────────────────────────────────

    #[test]
    fn test_dashboard_palette_colors() {
        let p = Palette::dashboard();
        assert_eq!(p.len(), 5);
        assert_eq!(p.color(0), Color::Rgb(0x00, 0x88, 0xFE));
        assert_eq!(p.color(4), Color::Rgb(0x88, 0x84, 0xD8));
    }

    #[test]
    fn test_palette_cycles() {
        let p = Palette::dashboard();
        assert_eq!(p.color(5), p.color(0));
        assert_eq!(p.color(12), p.color(2));
    }

    #[test]
    fn test_palette_parse() {
        let p = Palette::parse("#ff0000, 00ff00").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.color(0), Color::Rgb(255, 0, 0));
        assert_eq!(p.color(1), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_palette_parse_rejects_bad_input() {
        assert!(Palette::parse("#ff00").is_err());
        assert!(Palette::parse("#gg0000").is_err());
        assert!(Palette::parse(" , ").is_err());
    }

    #[test]
    fn test_palette_new_empty_falls_back() {
        assert_eq!(Palette::new(Vec::new()), Palette::dashboard());
    }

    #[test]
    fn test_with_palette_and_language_style() {
        let t = Theme::dark().with_palette(Palette::ansi());
        assert_eq!(t.language_style(0).fg, Some(Color::Blue));
        assert_eq!(t.language_style(6).fg, Some(Color::Cyan));
    }

    #[test]
    fn test_rank_style() {
        let t = Theme::dark();
        assert_eq!(t.rank_style(1), t.rank_first);
        assert_eq!(t.rank_style(2), t.rank_other);
    }
}
