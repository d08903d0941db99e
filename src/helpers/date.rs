//! Date helper functions

use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date using a Moment.js-compatible format string
///
/// Returns `None` when the format asks for something a calendar date does not
/// have (hours, time zone, ...).
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> Some("2024-01-15")
/// format_date(&date, "LL")         // -> Some("January 15, 2024")
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> Option<String> {
    let chrono_format = moment_to_chrono_format(format);
    let mut out = String::new();
    write!(out, "{}", date.format(&chrono_format)).ok()?;
    Some(out)
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    if format == "LL" {
        return "%B %-d, %Y".to_string();
    }

    // Longest patterns first within each category
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month / year
        ("DDDD", "%j"),
        ("DD", "%d"),
        // Hour, minute, second
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(), "YYYY-MM-DD").as_deref(), Some("2024-01-05"));
        assert_eq!(format_date(&date(), "YYYY/MM/DD").as_deref(), Some("2024/01/05"));
        assert_eq!(format_date(&date(), "MMM DD, YY").as_deref(), Some("Jan 05, 24"));
        assert_eq!(format_date(&date(), "dddd").as_deref(), Some("Friday"));
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date(&date(), "LL").as_deref(), Some("January 5, 2024"));
    }

    #[test]
    fn test_format_date_rejects_time_tokens() {
        assert_eq!(format_date(&date(), "HH:mm"), None);
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
