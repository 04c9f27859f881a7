//! Memo type definitions for gote-core

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Error, Result};

/// A memo stored in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memo {
    /// Identifier assigned by storage, never reused
    pub id: u32,
    /// Title of the memo (never empty once persisted)
    pub title: String,
    /// Body text
    pub content: String,
    /// When the memo was created
    pub created_at: DateTime<Utc>,
    /// When the memo was last written
    pub updated_at: DateTime<Utc>,
    /// Tombstone; set once the memo is deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Check that a title can be persisted
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    Ok(())
}
