#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use shiftlog::config::Config;
use shiftlog::db::initialize::init_db;
use shiftlog::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn slg() -> Command {
    cargo_bin_cmd!("shiftlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Open a pool on the given path with the schema in place
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Config pointing at the given DB, otherwise defaults (rollover 05:00,
/// UTC+9, rounding off)
pub fn test_config(db_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        ..Config::default()
    }
}

pub fn store_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("offset")
}

/// An instant given as store-local wall-clock time
pub fn local_instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    store_offset()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid local time")
        .with_timezone(&Utc)
}
