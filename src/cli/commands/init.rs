use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| Config::database_file().to_string_lossy().to_string());

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success("Database schema initialized.");
    Ok(())
}
