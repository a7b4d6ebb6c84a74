use crate::cli::commands::resolve_owner;
use crate::cli::parser::{BreakAction, Commands};
use crate::config::Config;
use crate::core::attendance::Attendance;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Break { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let attendance = Attendance::from_config(cfg);

    match action {
        BreakAction::Start { record, owner } => {
            let owner_id = resolve_owner(owner, cfg)?;
            attendance.start_break(&mut pool, *record, &owner_id, Utc::now())?;
            audit(
                &pool.conn,
                "break_start",
                &record.to_string(),
                &format!("{} started a break", owner_id),
            )?;
            success(format!("Break started on record {}.", record));
        }
        BreakAction::End { record, owner } => {
            let owner_id = resolve_owner(owner, cfg)?;
            attendance.end_break(&mut pool, *record, &owner_id, Utc::now())?;
            audit(
                &pool.conn,
                "break_end",
                &record.to_string(),
                &format!("{} ended a break", owner_id),
            )?;
            success(format!("Break ended on record {}.", record));
        }
    }

    Ok(())
}
