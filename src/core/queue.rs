//! Guest queue: daily-reset ticket numbers per store.
//!
//! The queue is a plain consumer of the business calendar and the sequence
//! allocator; its own table only records who holds which ticket.

use crate::core::calendar::StoreCalendar;
use crate::core::sequence::{QUEUE_SCOPE, next_sequence};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::queue_entry::QueueEntry;
use crate::utils::date::format_day;
use crate::utils::time::fmt_instant;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct QueueTicket {
    pub entry_id: i64,
    pub number: i64,
    pub business_day: NaiveDate,
}

pub struct QueueLogic;

impl QueueLogic {
    /// Join the store's queue for the current business day. The ticket
    /// number comes out of the shared allocator, so it is unique within
    /// the day even under concurrent joins.
    pub fn join(
        pool: &mut DbPool,
        calendar: &StoreCalendar,
        store_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<QueueTicket> {
        let day = calendar.business_day_of(now);
        let number = next_sequence(&pool.conn, calendar, store_id, QUEUE_SCOPE, now)?;
        let entry_id = queries::insert_queue_entry(
            &pool.conn,
            store_id,
            number,
            &format_day(day),
            &fmt_instant(now, calendar.offset()),
        )?;

        Ok(QueueTicket {
            entry_id,
            number,
            business_day: day,
        })
    }

    /// Waiting entries for the current business day, in ticket order.
    pub fn waiting(
        pool: &mut DbPool,
        calendar: &StoreCalendar,
        store_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<QueueEntry>> {
        let day = calendar.business_day_of(now);
        queries::load_waiting_queue(&pool.conn, store_id, &format_day(day))
    }
}
