use chrono::{DateTime, NaiveDateTime};

use quill_core::content::Side;
use quill_core::title::TimeFormat;

/// Parse ellipsis side from string
pub fn parse_side(s: &str) -> std::result::Result<Side, String> {
    s.parse::<Side>().map_err(|e| e.to_string())
}

/// Parse time format from string
pub fn parse_time_format(s: &str) -> std::result::Result<TimeFormat, String> {
    s.parse::<TimeFormat>().map_err(|e| e.to_string())
}

/// Parse an RFC 3339 instant, keeping its wall-clock time
pub fn parse_instant(s: &str) -> std::result::Result<NaiveDateTime, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|e| format!("invalid RFC 3339 timestamp '{s}': {e}"))
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
