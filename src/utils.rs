//! Utility functions for timestamps, table escaping and log formatting.
//!
//! This module provides helpers used throughout the application:
//! - [`ReportTimestamp`]: the single UTC+8 instant a report is stamped with
//! - [`escape_cell`]: makes arbitrary text safe inside a Markdown table cell
//! - [`truncate_for_log`] and [`error_chain`]: compact error/log rendering

use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;

/// Offset of the report's civil time zone from UTC, in seconds (UTC+8).
const REPORT_OFFSET_SECS: i32 = 8 * 3600;

/// Suffix naming the report's time zone in the display timestamp.
const REPORT_ZONE_LABEL: &str = "Beijing Time";

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("line-break pattern is a valid regex"));

/// The instant a report was produced, fixed to UTC+8.
///
/// Captured once per run so the report heading and the output filename can
/// never disagree, whatever the host machine's local zone is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTimestamp {
    at: DateTime<FixedOffset>,
}

impl ReportTimestamp {
    /// Capture the current instant.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Stamp a report with an explicit UTC instant.
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        Self {
            at: utc.with_timezone(&report_offset()),
        }
    }

    /// Human-readable form for the report heading, e.g. `2025-04-30 13:20 Beijing Time`.
    pub fn display(&self) -> String {
        format!("{} {}", self.at.format("%Y-%m-%d %H:%M"), REPORT_ZONE_LABEL)
    }

    /// Filesystem-safe form for the output filename, e.g. `20250430_1320`.
    pub fn compact(&self) -> String {
        self.at.format("%Y%m%d_%H%M").to_string()
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.at
    }
}

fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORT_OFFSET_SECS)
        .expect("UTC+8 is within chrono's +/-24h offset bound")
}

/// Make text safe for a Markdown table cell.
///
/// Every `|` becomes `\|` and every line break (`\r\n`, `\r` or `\n`) becomes
/// a single space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(escape_cell("A | B"), r"A \| B");
/// assert_eq!(escape_cell("one\r\ntwo"), "one two");
/// ```
pub fn escape_cell(text: &str) -> String {
    LINE_BREAK.replace_all(&text.replace('|', r"\|"), " ").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a character
/// boundary) with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Render an error followed by each of its sources, joined with `: `.
///
/// Transport errors usually carry the interesting detail (connection refused,
/// DNS failure) in their source chain rather than their own message.
pub fn error_chain(e: &dyn Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};
    use std::fmt;

    #[test]
    fn test_escape_cell_pipe() {
        assert_eq!(escape_cell("A | B"), r"A \| B");
        assert_eq!(escape_cell("||"), r"\|\|");
    }

    #[test]
    fn test_escape_cell_line_breaks() {
        assert_eq!(escape_cell("one\ntwo"), "one two");
        assert_eq!(escape_cell("one\r\ntwo"), "one two");
        assert_eq!(escape_cell("one\rtwo"), "one two");
        assert_eq!(escape_cell("a\n\nb"), "a  b");
    }

    #[test]
    fn test_escape_cell_plain_text_untouched() {
        assert_eq!(escape_cell("Nothing to see"), "Nothing to see");
    }

    #[test]
    fn test_timestamp_forms() {
        let ts = ReportTimestamp::from_utc(Utc.with_ymd_and_hms(2025, 4, 30, 5, 20, 42).unwrap());
        assert_eq!(ts.display(), "2025-04-30 13:20 Beijing Time");
        assert_eq!(ts.compact(), "20250430_1320");
        assert_eq!(ts.as_datetime().offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_timestamp_crosses_date_line() {
        let ts = ReportTimestamp::from_utc(Utc.with_ymd_and_hms(2025, 12, 31, 18, 5, 0).unwrap());
        assert_eq!(ts.display(), "2026-01-01 02:05 Beijing Time");
        assert_eq!(ts.compact(), "20260101_0205");
    }

    #[test]
    fn test_timestamp_forms_agree_in_utc() {
        let utc = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 30).unwrap();
        let ts = ReportTimestamp::from_utc(utc);

        let display = ts.display();
        let display = display.strip_suffix(" Beijing Time").unwrap();
        let from_display = NaiveDateTime::parse_from_str(display, "%Y-%m-%d %H:%M").unwrap();
        let from_compact = NaiveDateTime::parse_from_str(&ts.compact(), "%Y%m%d_%H%M").unwrap();
        assert_eq!(from_display, from_compact);

        let back_to_utc = from_display - chrono::Duration::hours(8);
        assert_eq!(
            back_to_utc,
            NaiveDateTime::parse_from_str("2024-02-29 23:59", "%Y-%m-%d %H:%M").unwrap()
        );
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééé", 3);
        assert!(result.starts_with('é'));
        assert!(result.contains("(+4 bytes)"));
    }

    #[derive(Debug)]
    struct Outer(Inner);
    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("error sending request")
        }
    }
    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Connection refused")
        }
    }
    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }
    impl Error for Inner {}

    #[test]
    fn test_error_chain() {
        assert_eq!(
            error_chain(&Outer(Inner)),
            "error sending request: Connection refused"
        );
        assert_eq!(error_chain(&Inner), "Connection refused");
    }
}
