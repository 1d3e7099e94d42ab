use crate::themes::Theme;
use ratatui::text::{Line, Span};

use timeline_core::models::{CategoryFilter, Granularity};

/// Decoration placed either side of the title.
pub const SPARKLES: &str = "♪ ★ ♪";

/// Dashboard header, four lines:
///
/// 1. Title with decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ playlist | category | view ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub playlist: &'a str,
    pub filter: CategoryFilter,
    pub granularity: Granularity,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        playlist: &'a str,
        filter: CategoryFilter,
        granularity: Granularity,
        theme: &'a Theme,
    ) -> Self {
        Self {
            playlist,
            filter,
            granularity,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" MUSIC TIMELINE ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.playlist, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.filter.label(), self.theme.value),
                Span::styled(" | by ", self.theme.label),
                Span::styled(self.granularity.label(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}
