use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One guest-queue ticket. Numbers restart at 1 every business day, per
/// store; allocation goes through the shared sequence scope `"queue"`.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub id: i64,
    pub store_id: String,
    pub queue_number: i64,
    pub business_day: NaiveDate,
    pub status: String, // 'waiting' here; later transitions are external
    pub created_at: DateTime<Utc>,
}
