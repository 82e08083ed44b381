//! Size and time formatting for listings.

use chrono::{Local, TimeZone};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 units.
///
/// Bytes are shown as an integer, every larger unit with one decimal place.
/// Values beyond the terabyte range stay in TB.
///
/// ```
/// use filepane::format_size;
///
/// assert_eq!(format_size(512), "512B");
/// assert_eq!(format_size(1536), "1.5KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes}{}", UNITS[0])
    } else {
        format!("{value:.1}{}", UNITS[unit])
    }
}

/// Format a unix timestamp as local time with minute precision.
pub fn format_mtime(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).earliest() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_owned(),
    }
}
