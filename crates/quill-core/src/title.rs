//! Note title templates
//!
//! Expands `$date$`, `$time$`, `$timestamp$`, `$headline$` and `$count$` in a
//! template. The reference instant is always passed in by the caller so the
//! output is deterministic.
//!
//! Date patterns use Day.js tokens (`YYYY`, `MM`, `DD`, `MMM`, `dddd`, ...).
//! Text inside `[...]` is copied literally.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::QuillError;

const TIMESTAMP_PATTERN: &str = "YYYYMMDDHHmm";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Longest tokens first so `YYYY` wins over `YY`
const TOKENS: [&str; 22] = [
    "YYYY", "MMMM", "dddd", "MMM", "ddd", "YY", "MM", "DD", "dd", "HH", "hh", "mm", "ss", "M",
    "D", "d", "H", "h", "m", "s", "A", "a",
];

/// Clock style for `$time$`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12-hour")]
    TwelveHour,
    #[serde(rename = "24-hour")]
    TwentyFourHour,
}

impl TimeFormat {
    fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "hh:mm A",
            TimeFormat::TwentyFourHour => "HH:mm",
        }
    }
}

impl FromStr for TimeFormat {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12-hour" | "12h" => Ok(TimeFormat::TwelveHour),
            "24-hour" | "24h" => Ok(TimeFormat::TwentyFourHour),
            other => Err(QuillError::unsupported(
                "time format",
                other,
                "12-hour, 24-hour",
            )),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12-hour"),
            TimeFormat::TwentyFourHour => write!(f, "24-hour"),
        }
    }
}

/// Expand a title template at the instant `now`.
///
/// `count` is substituted as given; callers pass the number they want shown.
pub fn format_title(
    template: &str,
    date_format: &str,
    time_format: TimeFormat,
    headline: &str,
    count: usize,
    now: NaiveDateTime,
) -> String {
    template
        .replace("$date$", &format_date(&now, date_format))
        .replace("$time$", &format_date(&now, time_format.pattern()))
        .replace("$timestamp$", &format_date(&now, TIMESTAMP_PATTERN))
        .replace("$count$", &count.to_string())
        .replace("$headline$", headline)
}

/// Render `date` with a Day.js-style pattern
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        match TOKENS.iter().find(|token| rest.starts_with(*token)) {
            Some(token) => {
                out.push_str(&render_token(date, token));
                rest = &rest[token.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

fn render_token(date: &NaiveDateTime, token: &str) -> String {
    let hour12 = match date.hour() % 12 {
        0 => 12,
        h => h,
    };
    let month = MONTHS[date.month0() as usize];
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];

    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => month.to_string(),
        "MMM" => month[..3].to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => weekday.to_string(),
        "ddd" => weekday[..3].to_string(),
        "dd" => weekday[..2].to_string(),
        "d" => date.weekday().num_days_from_sunday().to_string(),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "A" if date.hour() < 12 => "AM".to_string(),
        "A" => "PM".to_string(),
        "a" if date.hour() < 12 => "am".to_string(),
        "a" => "pm".to_string(),
        _ => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, 5)
            .unwrap()
    }

    #[test]
    fn test_all_placeholders() {
        let title = format_title(
            "$date$ $time$ $timestamp$ $headline$ #$count$",
            "DD-MM-YYYY",
            TimeFormat::TwentyFourHour,
            "Groceries",
            3,
            instant(14, 9),
        );
        assert_eq!(title, "07-03-2024 14:09 202403071409 Groceries #3");
    }

    #[test]
    fn test_twelve_hour_clock() {
        let title = format_title(
            "$time$",
            "YYYY-MM-DD",
            TimeFormat::TwelveHour,
            "",
            0,
            instant(0, 30),
        );
        assert_eq!(title, "12:30 AM");

        let title = format_title("$time$", "", TimeFormat::TwelveHour, "", 0, instant(15, 1));
        assert_eq!(title, "03:01 PM");
    }

    #[test]
    fn test_repeated_placeholders_all_replaced() {
        let title = format_title(
            "$count$/$count$",
            "",
            TimeFormat::default(),
            "",
            9,
            instant(1, 1),
        );
        assert_eq!(title, "9/9");
    }

    #[test]
    fn test_template_without_placeholders_unchanged() {
        let title = format_title("Plain", "", TimeFormat::default(), "h", 1, instant(1, 1));
        assert_eq!(title, "Plain");
    }

    #[test]
    fn test_named_tokens_and_escapes() {
        let date = instant(9, 0);
        assert_eq!(format_date(&date, "dddd, MMMM D"), "Thursday, March 7");
        assert_eq!(format_date(&date, "ddd MMM YY"), "Thu Mar 24");
        assert_eq!(format_date(&date, "[Day] D"), "Day 7");
    }

    #[test]
    fn test_time_format_parse() {
        assert_eq!(
            "24-hour".parse::<TimeFormat>().unwrap(),
            TimeFormat::TwentyFourHour
        );
        assert!("48-hour".parse::<TimeFormat>().is_err());
        assert_eq!(TimeFormat::TwelveHour.to_string(), "12-hour");
    }
}
