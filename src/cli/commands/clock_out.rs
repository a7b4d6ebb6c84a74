use crate::cli::commands::resolve_owner;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::Attendance;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Out { record, owner } = cmd else {
        return Ok(());
    };

    let owner_id = resolve_owner(owner, cfg)?;

    let mut pool = DbPool::new(&cfg.database)?;
    let attendance = Attendance::from_config(cfg);

    attendance.clock_out(&mut pool, *record, &owner_id, Utc::now())?;

    audit(
        &pool.conn,
        "clock_out",
        &record.to_string(),
        &format!("{} clocked out", owner_id),
    )?;

    success(format!("Clocked out: record {}.", record));
    Ok(())
}
