use crate::cli::commands::{resolve_owner, resolve_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::Attendance;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::notify::DbNotifier;
use crate::ui::messages::success;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::In {
        owner,
        store,
        pickup,
        answers,
    } = cmd
    else {
        return Ok(());
    };

    let owner_id = resolve_owner(owner, cfg)?;
    let store_id = resolve_store(store, cfg);
    let meta = build_meta(pickup, answers)?;

    let mut pool = DbPool::new(&cfg.database)?;
    let attendance = Attendance::from_config(cfg);
    let notifier = DbNotifier {
        database: cfg.database.clone(),
    };

    let record_id = attendance.clock_in(
        &mut pool,
        &notifier,
        &owner_id,
        &store_id,
        meta,
        Utc::now(),
    )?;

    audit(
        &pool.conn,
        "clock_in",
        &record_id.to_string(),
        &format!("{} clocked in at store {}", owner_id, store_id),
    )?;

    success(format!("Clocked in: record {}.", record_id));
    Ok(())
}

/// Optional pickup note and questionnaire answers become one JSON payload
/// in the record's meta column.
fn build_meta(
    pickup: &Option<String>,
    answers: &Option<String>,
) -> AppResult<Option<serde_json::Value>> {
    if pickup.is_none() && answers.is_none() {
        return Ok(None);
    }

    let answers_value = match answers {
        Some(raw) => Some(
            serde_json::from_str::<serde_json::Value>(raw)
                .map_err(|e| AppError::InvalidMeta(e.to_string()))?,
        ),
        None => None,
    };

    Ok(Some(serde_json::json!({
        "pickup": pickup,
        "answers": answers_value,
    })))
}
