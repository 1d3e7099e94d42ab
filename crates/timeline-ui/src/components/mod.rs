//! Line-level building blocks for the dashboard views.

pub mod header;
pub mod stacked_bar;
pub mod stat_tiles;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max` display columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Truncate or right-pad `s` to exactly `width` display columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = UnicodeWidthStr::width(out.as_str());
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("Drake", 10), "Drake");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Ski Mask The Slump God", 8), "Ski Mas…");
        assert_eq!(UnicodeWidthStr::width(truncate_to_width("Ski Mask The Slump God", 8).as_str()), 8);
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide.
        let out = truncate_to_width("宇多田ヒカル", 5);
        assert_eq!(out, "宇多…");
        assert!(UnicodeWidthStr::width(out.as_str()) <= 5);
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_to_width("Drake", 0), "");
    }

    #[test]
    fn test_fit_to_width_pads() {
        assert_eq!(fit_to_width("2015", 8), "2015    ");
        assert_eq!(fit_to_width("Mar 2015 extra", 8), "Mar 201…");
    }
}
