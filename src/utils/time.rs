//! Time utilities: instant storage format, HH:MM parsing, minute formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Format an instant for storage, in the given store offset.
///
/// Millisecond precision is fixed so that lexicographic order of the stored
/// strings equals chronological order; the sequence allocator compares these
/// strings in SQL.
pub fn fmt_instant(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Parse a stored instant back to UTC.
pub fn parse_instant(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Wall-clock HH:MM display of an instant in the given store offset.
pub fn wall_clock(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format("%H:%M").to_string()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
