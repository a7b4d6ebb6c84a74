use crate::errors::{AppError, AppResult};
use crate::models::queue_entry::QueueEntry;
use crate::models::work_record::{BreakInterval, WorkRecord};
use crate::models::work_status::WorkStatus;
use crate::utils::time::parse_instant;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_err(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn get_instant(row: &Row, col: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        Some(s) => parse_instant(&s).map(Some).map_err(conversion_err),
        None => Ok(None),
    }
}

/// Map a `work_records` row. Breaks are loaded separately.
pub fn map_work_record_row(row: &Row) -> Result<WorkRecord> {
    let day_str: String = row.get("business_day")?;
    let business_day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
        .map_err(|_| conversion_err(AppError::InvalidDate(day_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = WorkStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_err(AppError::InvalidStatus(status_str.clone())))?;

    Ok(WorkRecord {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        store_id: row.get("store_id")?,
        business_day,
        status,
        clock_in: get_instant(row, "clock_in")?,
        clock_out: get_instant(row, "clock_out")?,
        scheduled_start_time: row.get("scheduled_start_time")?,
        scheduled_end_time: row.get("scheduled_end_time")?,
        breaks: Vec::new(),
        source: row.get("source")?,
        meta: row.get::<_, Option<String>>("meta")?.unwrap_or_default(),
        created_at: row.get("created_at")?,
    })
}

pub fn load_breaks(conn: &Connection, record_id: i64) -> AppResult<Vec<BreakInterval>> {
    let mut stmt = conn.prepare(
        "SELECT id, break_start, break_end FROM work_breaks
         WHERE work_record_id = ?1
         ORDER BY break_start ASC, id ASC",
    )?;

    let rows = stmt.query_map([record_id], |row| {
        let start: String = row.get("break_start")?;
        let end: Option<String> = row.get("break_end")?;
        Ok(BreakInterval {
            id: row.get("id")?,
            break_start: parse_instant(&start).map_err(conversion_err)?,
            break_end: match end {
                Some(s) => Some(parse_instant(&s).map_err(conversion_err)?),
                None => None,
            },
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn with_breaks(conn: &Connection, mut rec: WorkRecord) -> AppResult<WorkRecord> {
    rec.breaks = load_breaks(conn, rec.id)?;
    Ok(rec)
}

pub fn get_work_record(conn: &Connection, id: i64) -> AppResult<Option<WorkRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM work_records WHERE id = ?1",
            [id],
            map_work_record_row,
        )
        .optional()?;

    match rec {
        Some(r) => Ok(Some(with_breaks(conn, r)?)),
        None => Ok(None),
    }
}

/// Find the owner's record for a business day that a clock-in may act on:
/// either the one currently `working` or a schedule placeholder. Completed
/// records never match, so a second cycle on the same day starts fresh.
pub fn find_active_record(
    conn: &Connection,
    owner_id: &str,
    store_id: &str,
    day: &str,
) -> AppResult<Option<WorkRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM work_records
             WHERE owner_id = ?1 AND store_id = ?2 AND business_day = ?3
               AND status IN ('working','scheduled','pending')
             ORDER BY id DESC
             LIMIT 1",
            params![owner_id, store_id, day],
            map_work_record_row,
        )
        .optional()?;

    match rec {
        Some(r) => Ok(Some(with_breaks(conn, r)?)),
        None => Ok(None),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn insert_work_record(
    conn: &Connection,
    owner_id: &str,
    store_id: &str,
    day: &str,
    clock_in: &str,
    scheduled_start_time: &str,
    meta: &str,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_records
            (owner_id, store_id, business_day, status, clock_in,
             scheduled_start_time, source, meta, created_at)
         VALUES (?1, ?2, ?3, 'working', ?4, ?5, 'cli', ?6, ?7)",
        params![
            owner_id,
            store_id,
            day,
            clock_in,
            scheduled_start_time,
            meta,
            created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Turn a schedule placeholder into a working record in place: stamp the
/// clock-in, clear any stale clock-out and breaks left on the placeholder.
pub fn activate_work_record(
    conn: &Connection,
    id: i64,
    clock_in: &str,
    scheduled_start_time: &str,
    meta: &str,
) -> AppResult<()> {
    conn.execute(
        "UPDATE work_records
         SET status = 'working', clock_in = ?1, clock_out = NULL,
             scheduled_start_time = ?2, scheduled_end_time = NULL, meta = ?3
         WHERE id = ?4",
        params![clock_in, scheduled_start_time, meta, id],
    )?;
    conn.execute("DELETE FROM work_breaks WHERE work_record_id = ?1", [id])?;
    Ok(())
}

pub fn complete_work_record(
    conn: &Connection,
    id: i64,
    clock_out: &str,
    scheduled_end_time: &str,
) -> AppResult<()> {
    conn.execute(
        "UPDATE work_records
         SET status = 'completed', clock_out = ?1, scheduled_end_time = ?2
         WHERE id = ?3",
        params![clock_out, scheduled_end_time, id],
    )?;
    Ok(())
}

pub fn insert_break(conn: &Connection, record_id: i64, break_start: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_breaks (work_record_id, break_start) VALUES (?1, ?2)",
        params![record_id, break_start],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Id of the record's open break, picking the most recently started one.
pub fn open_break_id(conn: &Connection, record_id: i64) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM work_breaks
             WHERE work_record_id = ?1 AND break_end IS NULL
             ORDER BY break_start DESC, id DESC
             LIMIT 1",
            [record_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn close_break(conn: &Connection, break_id: i64, break_end: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE work_breaks SET break_end = ?1 WHERE id = ?2",
        params![break_end, break_id],
    )?;
    Ok(())
}

/// All of a store's records for one business day, optionally filtered by
/// owner, oldest first.
pub fn load_records_for_day(
    conn: &Connection,
    store_id: &str,
    owner_id: Option<&str>,
    day: &str,
) -> AppResult<Vec<WorkRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM work_records
         WHERE store_id = ?1 AND business_day = ?2
           AND (?3 IS NULL OR owner_id = ?3)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![store_id, day, owner_id], map_work_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(with_breaks(conn, r?)?);
    }
    Ok(out)
}

pub fn insert_queue_entry(
    conn: &Connection,
    store_id: &str,
    queue_number: i64,
    day: &str,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO queue_entries (store_id, queue_number, business_day, status, created_at)
         VALUES (?1, ?2, ?3, 'waiting', ?4)",
        params![store_id, queue_number, day, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_waiting_queue(
    conn: &Connection,
    store_id: &str,
    day: &str,
) -> AppResult<Vec<QueueEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, store_id, queue_number, business_day, status, created_at
         FROM queue_entries
         WHERE store_id = ?1 AND business_day = ?2 AND status = 'waiting'
         ORDER BY queue_number ASC",
    )?;

    let rows = stmt.query_map(params![store_id, day], |row| {
        let day_str: String = row.get("business_day")?;
        let created: String = row.get("created_at")?;
        Ok(QueueEntry {
            id: row.get("id")?,
            store_id: row.get("store_id")?,
            queue_number: row.get("queue_number")?,
            business_day: NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
                .map_err(|_| conversion_err(AppError::InvalidDate(day_str.clone())))?,
            status: row.get("status")?,
            created_at: parse_instant(&created).map_err(conversion_err)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
