use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use waka_core::formatting::format_hours;
use waka_core::models::MonthlyStats;

/// A single headline figure: a caption above a large value.
pub struct StatCard<'a> {
    pub title: &'static str,
    pub value: String,
    /// Style of the value line.
    pub style: Style,
    pub theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'static str, value: String, style: Style, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            style,
            theme,
        }
    }

    /// Caption line followed by the value line.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.title, self.theme.label)),
            Line::from(Span::styled(self.value.clone(), self.style)),
        ]
    }
}

/// Total, average and maximum hours cards for a month, in display order.
pub fn stat_cards<'a>(stats: &MonthlyStats, theme: &'a Theme) -> [StatCard<'a>; 3] {
    [
        StatCard::new(
            "Total Hours",
            format_hours(stats.total_hours),
            theme.stat_total,
            theme,
        ),
        StatCard::new(
            "Avg Hours/Day",
            format_hours(stats.avg_hours_per_day),
            theme.stat_average,
            theme,
        ),
        StatCard::new(
            "Max Hours/Day",
            format_hours(stats.max_hours_per_day),
            theme.stat_max,
            theme,
        ),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_cards_values() {
        let theme = Theme::dark();
        let stats = MonthlyStats {
            total_hours: 6.5,
            avg_hours_per_day: 3.25,
            max_hours_per_day: 4.5,
        };
        let cards = stat_cards(&stats, &theme);
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["6.50", "3.25", "4.50"]);
        assert_eq!(cards[0].title, "Total Hours");
        assert_eq!(cards[2].style, theme.stat_max);
    }

    #[test]
    fn test_stat_card_lines() {
        let theme = Theme::light();
        let card = StatCard::new("Total Hours", "12.00".to_string(), theme.stat_total, &theme);
        let lines = card.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "Total Hours");
        assert_eq!(lines[1].spans[0].content, "12.00");
        assert_eq!(lines[1].spans[0].style, theme.stat_total);
    }
}
