//! Helpers for the `YYYY-MM-DD...` added-date strings and period keys.
//!
//! Grouping itself works on raw string prefixes; these helpers only check
//! well-formedness and produce display labels.

use chrono::NaiveDate;

use crate::models::char_prefix;

/// Parse the calendar date at the start of an added-date string.
///
/// Accepts `"2015-03-01"` as well as full timestamps such as
/// `"2015-03-01T12:00:00Z"`. Returns `None` when the first ten characters are
/// not a valid date.
pub fn parse_added_date(added_date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(char_prefix(added_date, 10), "%Y-%m-%d").ok()
}

/// `true` when the added date starts with a valid `YYYY-MM-DD` date, which is
/// what makes lexicographic period ordering chronological.
pub fn is_well_formed(added_date: &str) -> bool {
    parse_added_date(added_date).is_some()
}

/// Display label for a period key.
///
/// * `"2015"`    → `"2015"`
/// * `"2015-03"` → `"Mar 2015"`
/// * anything else is returned unchanged.
pub fn period_label(period: &str) -> String {
    if period.len() == 7 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d") {
            return date.format("%b %Y").to_string();
        }
    }
    period.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_added_date_plain() {
        let d = parse_added_date("2015-03-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2015, 3, 1));
    }

    #[test]
    fn test_parse_added_date_timestamp() {
        let d = parse_added_date("2019-12-31T23:59:59Z").unwrap();
        assert_eq!(d.year(), 2019);
        assert_eq!(d.month(), 12);
    }

    #[test]
    fn test_parse_added_date_malformed() {
        assert!(parse_added_date("yesterday").is_none());
        assert!(parse_added_date("2015-13-01").is_none());
        assert!(parse_added_date("2015").is_none());
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_period_label_year_unchanged() {
        assert_eq!(period_label("2015"), "2015");
    }

    #[test]
    fn test_period_label_month() {
        assert_eq!(period_label("2015-03"), "Mar 2015");
        assert_eq!(period_label("2020-12"), "Dec 2020");
    }

    #[test]
    fn test_period_label_garbage_passthrough() {
        assert_eq!(period_label("abcdefg"), "abcdefg");
        assert_eq!(period_label("2015-3"), "2015-3");
    }
}
