use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the attendance tables.
///
/// `work_records.business_day` is the `YYYY-MM-DD` partition key fixed at
/// clock-in; instants are RFC 3339 text. Break intervals live in their own
/// table, one row per interval, no mirrored single-break columns.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_records (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id             TEXT NOT NULL,
            store_id             TEXT NOT NULL,
            business_day         TEXT NOT NULL,
            status               TEXT NOT NULL
                                 CHECK(status IN ('scheduled','pending','working','completed')),
            clock_in             TEXT,
            clock_out            TEXT,
            scheduled_start_time TEXT,
            scheduled_end_time   TEXT,
            source               TEXT NOT NULL DEFAULT 'cli',
            meta                 TEXT DEFAULT '',
            created_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS work_breaks (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            work_record_id INTEGER NOT NULL REFERENCES work_records(id),
            break_start    TEXT NOT NULL,
            break_end      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_work_records_owner_day
            ON work_records(owner_id, store_id, business_day);
        CREATE INDEX IF NOT EXISTS idx_work_breaks_record
            ON work_breaks(work_record_id);
        "#,
    )?;
    Ok(())
}

/// Create the sequence and queue tables.
///
/// The UNIQUE index on (store_id, scope, business_day, seq) is the
/// allocator's race detector: a losing concurrent writer gets a constraint
/// error instead of a silently duplicated number.
fn create_sequence_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sequence_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id     TEXT NOT NULL,
            scope        TEXT NOT NULL,
            business_day TEXT NOT NULL,
            seq          INTEGER NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sequence_entries_unique
            ON sequence_entries(store_id, scope, business_day, seq);

        CREATE TABLE IF NOT EXISTS queue_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id     TEXT NOT NULL,
            queue_number INTEGER NOT NULL,
            business_day TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'waiting',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_queue_entries_store_day
            ON queue_entries(store_id, business_day);
        "#,
    )?;
    Ok(())
}

/// Mark a migration as applied in the log table, once.
fn stamp_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    create_attendance_tables(conn)?;
    create_sequence_tables(conn)?;

    stamp_migration(
        conn,
        "20250301_0001_base_schema",
        "Created attendance, sequence and queue tables",
    )?;

    Ok(())
}
