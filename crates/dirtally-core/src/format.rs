//! Human-readable size and date formatting.

use std::fmt::Display;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

use crate::entry::FileEntry;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// Date layout used for modification times.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a byte count as `512B`, `1.50KB`, `2.00MB` or `3.25GB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes}B")
    } else if bytes < MB {
        format!("{:.2}KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2}MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2}GB", bytes as f64 / GB as f64)
    }
}

/// Size column for an entry; directories have none.
pub fn format_entry_size(entry: &FileEntry) -> Option<String> {
    entry.is_file().then(|| format_size(entry.size))
}

/// Format a timestamp in local time.
pub fn format_date(time: SystemTime) -> String {
    format_date_in(time, &Local)
}

/// Format a timestamp in the given time zone.
pub fn format_date_in<Tz>(time: SystemTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::<chrono::Utc>::from(time)
        .with_timezone(tz)
        .format(DATE_FORMAT)
        .to_string()
}
