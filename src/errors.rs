//! Unified application error type.
//! All modules (db, core, sync, cli, utils) return AppError to keep the error
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
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Corrupted '{key}' collection: {source}")]
    Collection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month format: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid selection: {0} (expected student-<id> or class-<id>)")]
    InvalidSelection(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    // ---------------------------
    // Sync errors
    // ---------------------------
    #[error("Sync error: {0}")]
    Sync(String),

    #[error("Invalid sync code: {0}")]
    InvalidSyncCode(String),

    #[error("Sync is not configured: {0}")]
    SyncNotConfigured(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
