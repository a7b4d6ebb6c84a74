//! Unified application error type.
//! All modules (db, core, cli, notify) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid work status: {0}")]
    InvalidStatus(String),

    #[error("Invalid metadata payload: {0}")]
    InvalidMeta(String),

    // ---------------------------
    // Attendance / queue logic
    // ---------------------------
    #[error("No profile available: pass --owner or set default_owner in the config")]
    NoActiveProfile,

    #[error("Work record {0} belongs to another profile")]
    Unauthorized(i64),

    #[error("Work record {0} not found")]
    NotFound(i64),

    #[error("Work record {0} already has an open break")]
    AlreadyOnBreak(i64),

    #[error("Work record {0} has no open break")]
    NoActiveBreak(i64),

    #[error("Could not allocate a sequence number for scope '{scope}' in store '{store_id}'")]
    AllocationExhausted { store_id: String, scope: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
