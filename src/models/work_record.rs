use super::work_status::WorkStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One break taken during a work record. An interval with `break_end = None`
/// is the record's open break; at most one may exist at any time.
#[derive(Debug, Clone, Serialize)]
pub struct BreakInterval {
    pub id: i64,
    pub break_start: DateTime<Utc>,
    pub break_end: Option<DateTime<Utc>>,
}

impl BreakInterval {
    pub fn is_open(&self) -> bool {
        self.break_end.is_none()
    }

    /// Break length in minutes, measuring an open interval up to `reference`.
    pub fn minutes(&self, reference: DateTime<Utc>) -> i64 {
        (self.break_end.unwrap_or(reference) - self.break_start).num_minutes()
    }
}

/// One shift/attendance instance.
///
/// `business_day` is computed once at clock-in from the store rollover time
/// and never recomputed, even if the store config changes later. The raw
/// `clock_in`/`clock_out` instants are stored unrounded; only the
/// `scheduled_start_time`/`scheduled_end_time` display strings carry the
/// configured rounding.
#[derive(Debug, Clone, Serialize)]
pub struct WorkRecord {
    pub id: i64,
    pub owner_id: String,     // ⇔ work_records.owner_id
    pub store_id: String,     // ⇔ work_records.store_id
    pub business_day: NaiveDate, // ⇔ work_records.business_day (TEXT "YYYY-MM-DD")
    pub status: WorkStatus,   // ⇔ work_records.status
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub scheduled_start_time: Option<String>, // "HH:MM", rounded display
    pub scheduled_end_time: Option<String>,   // "HH:MM", rounded display
    pub breaks: Vec<BreakInterval>,
    pub source: String,     // ⇔ work_records.source (default 'cli')
    pub meta: String,       // ⇔ work_records.meta (JSON, default '')
    pub created_at: String, // ⇔ work_records.created_at (RFC 3339)
}

impl WorkRecord {
    pub fn business_day_str(&self) -> String {
        self.business_day.format("%Y-%m-%d").to_string()
    }

    /// The record's open break, if any.
    pub fn open_break(&self) -> Option<&BreakInterval> {
        self.breaks.iter().filter(|b| b.is_open()).max_by_key(|b| (b.break_start, b.id))
    }

    /// Read-time projection of the legacy single-break columns: the most
    /// recently started interval. There is no mirrored column pair in the
    /// schema.
    pub fn latest_break(&self) -> Option<&BreakInterval> {
        self.breaks.iter().max_by_key(|b| (b.break_start, b.id))
    }

    /// Worked minutes between clock-in and clock-out, minus breaks.
    ///
    /// For a still-open record (or open break) `reference` stands in for the
    /// missing end instant. Display-only: nothing derived from `reference`
    /// is ever persisted.
    pub fn worked_minutes(&self, reference: DateTime<Utc>) -> i64 {
        let Some(start) = self.clock_in else {
            return 0;
        };
        let end = self.clock_out.unwrap_or(reference);
        let mut total = (end - start).num_minutes();
        for b in &self.breaks {
            total -= b.minutes(reference);
        }
        total
    }
}
