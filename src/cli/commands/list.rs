use crate::cli::commands::resolve_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::StoreCalendar;
use crate::db::pool::DbPool;
use crate::db::queries::load_records_for_day;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{format_day, parse_date};
use crate::utils::time::format_minutes;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List { store, owner, day } = cmd else {
        return Ok(());
    };

    let store_id = resolve_store(store, cfg);
    let calendar = StoreCalendar::from_config(cfg);
    let now = Utc::now();

    let business_day = match day {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => calendar.business_day_of(now),
    };

    let pool = DbPool::new(&cfg.database)?;
    let records = load_records_for_day(
        &pool.conn,
        &store_id,
        owner.as_deref(),
        &format_day(business_day),
    )?;

    if records.is_empty() {
        println!("No work records for {} (store {}).", business_day, store_id);
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<10} {:<7} {:<7} {:<7} {}",
        "id", "owner", "status", "in", "out", "worked", "breaks"
    );
    for rec in records {
        println!(
            "{:<5} {:<12} {:<10} {:<7} {:<7} {:<7} {}",
            rec.id,
            rec.owner_id,
            rec.status.to_db_str(),
            rec.scheduled_start_time.as_deref().unwrap_or("-"),
            rec.scheduled_end_time.as_deref().unwrap_or("-"),
            format_minutes(rec.worked_minutes(now)),
            rec.breaks.len(),
        );
    }

    Ok(())
}
