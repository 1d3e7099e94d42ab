use crate::themes::Theme;
use ratatui::text::{Line, Span};

use timeline_core::formatting::{format_count, percentage};
use timeline_core::models::CategoryLabel;
use timeline_data::aggregator::Stats;

/// Summary tiles: the total song count, then one line per category with its
/// count and share of the total.
pub struct StatTiles<'a> {
    pub stats: &'a Stats,
    pub theme: &'a Theme,
}

impl<'a> StatTiles<'a> {
    pub fn new(stats: &'a Stats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(vec![
            Span::styled("TOTAL SONGS       ", self.theme.bold),
            Span::styled(format_count(self.stats.total), self.theme.value),
        ])];

        for label in CategoryLabel::ALL {
            let count = self.stats.by_category.get(label);
            let share = percentage(count, self.stats.total, 1);
            lines.push(Line::from(vec![
                Span::styled("■ ", self.theme.category_style(label)),
                Span::styled(format!("{:<16}", label.label()), self.theme.label),
                Span::styled(format_count(count), self.theme.value),
                Span::styled(format!(" ({:.1}%)", share), self.theme.dim),
            ]));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::models::CategoryCounts;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tiles_show_total_and_each_category() {
        let theme = Theme::dark();
        let stats = Stats {
            total: 4,
            by_category: CategoryCounts {
                tv_soundtrack: 1,
                youtube_internet: 1,
                mainstream: 2,
            },
            top_artists: vec![],
        };
        let lines = StatTiles::new(&stats, &theme).to_lines();
        assert_eq!(lines.len(), 4);
        assert!(line_text(&lines[0]).ends_with('4'));
        assert_eq!(lines[0].spans[0].style, theme.bold);
        assert_eq!(line_text(&lines[1]), "■ TV Soundtrack   1 (25.0%)");
        assert_eq!(line_text(&lines[3]), "■ Mainstream      2 (50.0%)");
    }

    #[test]
    fn test_tiles_zero_total_has_zero_shares() {
        let theme = Theme::dark();
        let stats = Stats::default();
        let lines = StatTiles::new(&stats, &theme).to_lines();
        assert!(line_text(&lines[2]).ends_with("0 (0.0%)"));
    }
}
