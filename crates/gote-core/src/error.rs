//! Error types for gote-core

use thiserror::Error;

/// Main error type for gote-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Memo not found: {0}")]
    MemoNotFound(u32),

    #[error(
        "database schema version {db_version} is newer than supported version {latest_supported}"
    )]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// Result type alias for gote-core
pub type Result<T> = std::result::Result<T, Error>;
