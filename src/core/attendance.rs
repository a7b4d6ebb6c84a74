//! Attendance state machine: scheduled → working → completed, with a
//! parallel break sub-state.
//!
//! One owner has at most one `working` record per store and business day;
//! clocking out and back in the same day produces a new record, so a day
//! may accumulate several completed cycles. Records are only ever mutated
//! by their owning identity.

use crate::config::Config;
use crate::core::calendar::StoreCalendar;
use crate::core::rounding::Rounding;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::work_record::WorkRecord;
use crate::notify::{Notifier, StoreNotification, notify_best_effort};
use crate::utils::date::format_day;
use crate::utils::time::{fmt_instant, wall_clock};
use chrono::{DateTime, Utc};

/// High-level attendance operations, configured with the store calendar and
/// rounding policy in effect at call time.
pub struct Attendance {
    pub calendar: StoreCalendar,
    pub rounding: Rounding,
}

impl Attendance {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            calendar: StoreCalendar::from_config(cfg),
            rounding: Rounding::from_config(cfg),
        }
    }

    /// Clock in, returning the id of the record now `working`.
    ///
    /// Idempotent: a second clock-in on the same business day finds the
    /// `working` record and returns its id without touching timestamps. A
    /// schedule placeholder left by the shift planner is activated in
    /// place; otherwise a fresh record is created. On an actual transition
    /// the other store members are notified best-effort.
    pub fn clock_in(
        &self,
        pool: &mut DbPool,
        notifier: &dyn Notifier,
        owner_id: &str,
        store_id: &str,
        meta: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> AppResult<i64> {
        let day = format_day(self.calendar.business_day_of(now));
        let clock_in = fmt_instant(now, self.calendar.offset());
        let display = wall_clock(self.rounding.apply(now), self.calendar.offset());
        let meta_str = meta.map(|m| m.to_string()).unwrap_or_default();

        let existing = queries::find_active_record(&pool.conn, owner_id, store_id, &day)?;

        let record_id = match existing {
            Some(rec) if rec.status.is_working() => return Ok(rec.id),
            Some(rec) => {
                queries::activate_work_record(&pool.conn, rec.id, &clock_in, &display, &meta_str)?;
                rec.id
            }
            None => queries::insert_work_record(
                &pool.conn, owner_id, store_id, &day, &clock_in, &display, &meta_str, &clock_in,
            )?,
        };

        notify_best_effort(
            notifier,
            &pool.conn,
            &StoreNotification {
                store_id: store_id.to_string(),
                title: "Shift started".to_string(),
                body: format!("{} clocked in at {}", owner_id, display),
                target_url: format!("/stores/{}/attendance", store_id),
                exclude_owner_ids: vec![owner_id.to_string()],
            },
        );

        Ok(record_id)
    }

    /// Clock out of a working record, completing the cycle.
    ///
    /// A record that is already completed is left untouched. Only the
    /// owning identity may clock a record out.
    pub fn clock_out(
        &self,
        pool: &mut DbPool,
        record_id: i64,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let rec = self.owned_record(pool, record_id, owner_id)?;
        if rec.status.is_completed() {
            return Ok(());
        }

        let clock_out = fmt_instant(now, self.calendar.offset());
        let display = wall_clock(self.rounding.apply(now), self.calendar.offset());
        queries::complete_work_record(&pool.conn, record_id, &clock_out, &display)?;
        Ok(())
    }

    /// Open a new break interval on the record.
    pub fn start_break(
        &self,
        pool: &mut DbPool,
        record_id: i64,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.owned_record(pool, record_id, owner_id)?;

        if queries::open_break_id(&pool.conn, record_id)?.is_some() {
            return Err(AppError::AlreadyOnBreak(record_id));
        }

        let start = fmt_instant(now, self.calendar.offset());
        queries::insert_break(&pool.conn, record_id, &start)?;
        Ok(())
    }

    /// Close the record's open break (the most recently started one).
    pub fn end_break(
        &self,
        pool: &mut DbPool,
        record_id: i64,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.owned_record(pool, record_id, owner_id)?;

        let break_id = queries::open_break_id(&pool.conn, record_id)?
            .ok_or(AppError::NoActiveBreak(record_id))?;

        let end = fmt_instant(now, self.calendar.offset());
        queries::close_break(&pool.conn, break_id, &end)?;
        Ok(())
    }

    fn owned_record(
        &self,
        pool: &mut DbPool,
        record_id: i64,
        owner_id: &str,
    ) -> AppResult<WorkRecord> {
        let rec = queries::get_work_record(&pool.conn, record_id)?
            .ok_or(AppError::NotFound(record_id))?;
        if rec.owner_id != owner_id {
            return Err(AppError::Unauthorized(record_id));
        }
        Ok(rec)
    }
}
