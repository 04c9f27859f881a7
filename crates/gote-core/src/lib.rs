//! gote-core: storage layer for the gote memo backend
//!
//! Owns the SQLite database file, its versioned schema, and the
//! record operations on memos. The HTTP layer lives in `gote-api`.

pub mod config;
pub mod db;
pub mod error;
pub mod memo;

pub use config::{ApiConfig, Config, DatabaseConfig};
pub use error::{Error, Result};
pub use memo::{Memo, MemoStore};
