use crate::cli::commands::resolve_store;
use crate::cli::parser::{Commands, QueueAction};
use crate::config::Config;
use crate::core::calendar::StoreCalendar;
use crate::core::queue::QueueLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::wall_clock;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Queue { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let calendar = StoreCalendar::from_config(cfg);

    match action {
        QueueAction::Join { store } => {
            let store_id = resolve_store(store, cfg);
            let ticket = QueueLogic::join(&mut pool, &calendar, &store_id, Utc::now())?;
            audit(
                &pool.conn,
                "queue_join",
                &ticket.entry_id.to_string(),
                &format!("Ticket {} issued for {}", ticket.number, ticket.business_day),
            )?;
            success(format!(
                "Ticket {} for {} (store {}).",
                ticket.number, ticket.business_day, store_id
            ));
        }
        QueueAction::List { store } => {
            let store_id = resolve_store(store, cfg);
            let entries = QueueLogic::waiting(&mut pool, &calendar, &store_id, Utc::now())?;
            if entries.is_empty() {
                println!("Queue is empty.");
            }
            for e in entries {
                println!(
                    "#{:<4} {}  waiting since {}",
                    e.queue_number,
                    e.business_day,
                    wall_clock(e.created_at, calendar.offset())
                );
            }
        }
    }

    Ok(())
}
