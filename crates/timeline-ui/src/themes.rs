use ratatui::style::{Color, Modifier, Style};

use timeline_core::models::CategoryLabel;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark; 7–15 are light. Absent or unparseable means dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()))
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

// Category bar colours.
const TV_ORANGE: Color = Color::Rgb(0xFF, 0x6B, 0x35);
const INTERNET_CYAN: Color = Color::Rgb(0x00, 0xD9, 0xFF);
const MAINSTREAM_PURPLE: Color = Color::Rgb(0x6E, 0x44, 0xFF);

/// All styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Categories ───────────────────────────────────────────────────────────
    pub category_tv: Style,
    pub category_internet: Style,
    pub category_mainstream: Style,
    /// Axis labels and count suffixes on the chart.
    pub chart_label: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_highlight: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(TV_ORANGE)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::LightGreen),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            category_tv: Style::default().fg(TV_ORANGE),
            category_internet: Style::default().fg(INTERNET_CYAN),
            category_mainstream: Style::default().fg(MAINSTREAM_PURPLE),
            chart_label: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_highlight: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Green),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            category_tv: Style::default().fg(TV_ORANGE),
            category_internet: Style::default().fg(Color::Blue),
            category_mainstream: Style::default().fg(MAINSTREAM_PURPLE),
            chart_label: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_highlight: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Yellow),
            header_sparkle: Style::default().fg(Color::Green),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            category_tv: Style::default().fg(Color::Red),
            category_internet: Style::default().fg(Color::Cyan),
            category_mainstream: Style::default().fg(Color::Magenta),
            chart_label: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_highlight: Style::default().fg(Color::Green),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    /// Bar and label colour for a category.
    pub fn category_style(&self, label: CategoryLabel) -> Style {
        match label {
            CategoryLabel::TvSoundtrack => self.category_tv,
            CategoryLabel::YoutubeInternet => self.category_internet,
            CategoryLabel::Mainstream => self.category_mainstream,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_category_palette() {
        let t = Theme::dark();
        assert_eq!(t.category_tv.fg, Some(TV_ORANGE));
        assert_eq!(t.category_internet.fg, Some(INTERNET_CYAN));
        assert_eq!(t.category_mainstream.fg, Some(MAINSTREAM_PURPLE));
        assert_eq!(t.error.fg, Some(Color::Red));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.category_internet.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.error.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").text.fg, Some(Color::White));
        assert_eq!(Theme::from_name("light").text.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("classic").header.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_category_style_maps_each_label() {
        let t = Theme::classic();
        assert_eq!(t.category_style(CategoryLabel::TvSoundtrack).fg, Some(Color::Red));
        assert_eq!(
            t.category_style(CategoryLabel::YoutubeInternet).fg,
            Some(Color::Cyan)
        );
        assert_eq!(
            t.category_style(CategoryLabel::Mainstream).fg,
            Some(Color::Magenta)
        );
    }
}
