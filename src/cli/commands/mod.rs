pub mod brk;
pub mod clock_in;
pub mod clock_out;
pub mod config;
pub mod init;
pub mod list;
pub mod log;
pub mod queue;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Resolve the acting profile: explicit flag first, config default second.
pub fn resolve_owner(flag: &Option<String>, cfg: &Config) -> AppResult<String> {
    match flag {
        Some(o) if !o.is_empty() => Ok(o.clone()),
        _ if !cfg.default_owner.is_empty() => Ok(cfg.default_owner.clone()),
        _ => Err(AppError::NoActiveProfile),
    }
}

/// Resolve the target store: explicit flag first, config default second.
pub fn resolve_store(flag: &Option<String>, cfg: &Config) -> String {
    match flag {
        Some(s) if !s.is_empty() => s.clone(),
        _ => cfg.default_store.clone(),
    }
}
