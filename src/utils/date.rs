use chrono::NaiveDate;

/// Business-day keys travel as plain `YYYY-MM-DD` strings: the format is
/// both the display value and the storage partition key.
pub fn format_day(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
