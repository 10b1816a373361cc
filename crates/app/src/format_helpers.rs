//! Shared formatting utilities for the UI layer.

use chrono::{DateTime, Local, NaiveDate, Timelike};

/// Format a `YYYY-MM-DD` (or longer ISO) string as "Jan 20, 2026".
///
/// Falls back to the input when it does not start with a date.
pub fn format_date_human(date_str: &str) -> String {
    date_str
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

/// Format an RFC 3339 timestamp in local time as "Jan 20, 2026 9:35 PM".
pub fn format_datetime_human(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%b %-d, %Y %-I:%M %p")
            .to_string(),
        Err(_) => format_date_human(timestamp),
    }
}

/// Marks as "42 / 50", trimming a trailing ".0".
pub fn format_marks(obtained: f64, total: i32) -> String {
    if obtained.fract() == 0.0 {
        format!("{} / {total}", obtained as i64)
    } else {
        format!("{obtained:.1} / {total}")
    }
}

/// Capitalise a status such as "present" for display.
pub fn format_status(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Local hour of day, for the greeting.
pub fn current_hour() -> u32 {
    Local::now().hour()
}
