//! Shared utility functions for output formatting

use chrono::{DateTime, Local, Utc};

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const VERTICAL: &str = "│   ";
pub const SPACE: &str = "    ";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Connector drawn before a node's name.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

/// Prefix for the children of a node drawn with `prefix`.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", prefix, SPACE)
    } else {
        format!("{}{}", prefix, VERTICAL)
    }
}

/// Format a byte count using the largest unit that keeps the value under
/// 1024, capped at GB. Whole bytes get no decimals, larger units one.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}{}", bytes, SIZE_UNITS[0])
    } else {
        format!("{:.1}{}", value, SIZE_UNITS[unit])
    }
}

/// Format a modification time in the local timezone.
pub fn format_date(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
