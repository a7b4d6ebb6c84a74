//! Per-store, per-business-day sequence allocation.
//!
//! The allocator is read-then-write with no exclusive lock: it scans the
//! committed rows of a scope inside the business day's instant bounds,
//! claims `max + 1`, and lets the UNIQUE index on
//! `(store_id, scope, business_day, seq)` reject the loser of a concurrent
//! race. A rejected insert is transient: re-read, re-claim, up to a bounded
//! number of attempts.

use crate::core::calendar::StoreCalendar;
use crate::errors::{AppError, AppResult};
use crate::utils::date::format_day;
use crate::utils::time::fmt_instant;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

/// Scope used by the guest queue; attendance sessions or any other
/// daily-reset counter get their own scope name under the same contract.
pub const QUEUE_SCOPE: &str = "queue";

pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// Allocate the next sequence number for (store, scope) on the business day
/// that `now` belongs to. Starts at 1 at every rollover; strictly
/// increasing and unique within the scope and day.
pub fn next_sequence(
    conn: &Connection,
    calendar: &StoreCalendar,
    store_id: &str,
    scope: &str,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    let day = calendar.business_day_of(now);
    let lower = fmt_instant(calendar.business_day_start(day), calendar.offset());
    let upper = fmt_instant(calendar.business_day_end(day), calendar.offset());
    let day_str = format_day(day);
    let created_at = fmt_instant(now, calendar.offset());

    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(seq) FROM sequence_entries
             WHERE store_id = ?1 AND scope = ?2
               AND created_at >= ?3 AND created_at < ?4",
            params![store_id, scope, lower, upper],
            |row| row.get(0),
        )?;
        let next = max.unwrap_or(0) + 1;

        let inserted = conn.execute(
            "INSERT INTO sequence_entries (store_id, scope, business_day, seq, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![store_id, scope, day_str, next, created_at],
        );

        match inserted {
            Ok(_) => return Ok(next),
            // A concurrent caller committed the same number first; re-read
            // the max and try again.
            Err(e) if is_constraint_violation(&e) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::AllocationExhausted {
        store_id: store_id.to_string(),
        scope: scope.to_string(),
    })
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
