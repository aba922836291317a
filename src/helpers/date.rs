//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt::Write;

/// Formats tried, in order, for strings that carry a time of day
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Formats tried, in order, for plain calendar dates
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];

/// Parse a date string in the formats posts commonly use.
///
/// Strings without an offset are read as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Newest-first ordering of two raw date strings.
///
/// Unparseable dates compare as older than any parseable one and equal to
/// each other, so a stable sort keeps their source order at the tail.
pub fn compare_newest_first(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Normalise a raw date to a display string, keeping it verbatim when unparseable
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_date(raw) {
        Some(dt) => format_date(&dt, format).unwrap_or_else(|| raw.trim().to_string()),
        None => raw.trim().to_string(),
    }
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> Some("2024-01-15")
/// ```
///
/// Returns `None` if chrono rejects the converted format.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    let mut out = String::new();
    write!(out, "{}", date.format(&chrono_format)).ok()?;
    Some(out)
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    // literal percent signs are not chrono specifiers
    let mut result = format.replace('%', "%%");

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
