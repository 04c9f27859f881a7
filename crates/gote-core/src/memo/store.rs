//! Memo storage implementation using SQLite

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::db;
use crate::memo::{Memo, validate_title};
use crate::{Error, Result};

const SELECT_LIVE: &str = "SELECT id, title, content, created_at, updated_at, deleted_at
     FROM memos WHERE deleted_at IS NULL";

/// SQLite-based storage for memos
///
/// Shared by every request handler; access to the connection is
/// serialized through a mutex.
pub struct MemoStore {
    conn: Mutex<Connection>,
}

impl MemoStore {
    /// Open the memo database at the given path, migrating it if needed
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = db::open_db(db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        info!("MemoStore initialized with {} memos", store.count()?);
        Ok(store)
    }

    /// Create an in-memory MemoStore (useful for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = db::open_db_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    /// List every live memo in insertion order
    pub fn find_all(&self) -> Result<Vec<Memo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_LIVE} ORDER BY id"))?;
        let memos = stmt
            .query_map([], row_to_memo)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} memos", memos.len());
        Ok(memos)
    }

    /// Load a live memo by ID
    pub fn find_by_id(&self, id: u32) -> Result<Memo> {
        let conn = self.conn()?;
        find_live(&conn, id)?.ok_or(Error::MemoNotFound(id))
    }

    /// Insert a new memo; storage assigns the id and timestamps
    pub fn create(&self, title: &str, content: &str) -> Result<Memo> {
        validate_title(title)?;

        let now = Utc::now();
        let conn = self.conn()?;
        let id: u32 = conn.query_row(
            "INSERT INTO memos (title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING id",
            params![title, content, now.to_rfc3339()],
            |row| row.get(0),
        )?;

        debug!("Created memo with id: {}", id);
        Ok(Memo {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Overwrite the title and content of a live memo
    pub fn update(&self, id: u32, title: &str, content: &str) -> Result<Memo> {
        validate_title(title)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut memo = find_live(&tx, id)?.ok_or(Error::MemoNotFound(id))?;
        memo.title = title.to_string();
        memo.content = content.to_string();
        memo.updated_at = Utc::now();

        tx.execute(
            "UPDATE memos SET title = ?1, content = ?2, updated_at = ?3
             WHERE id = ?4 AND deleted_at IS NULL",
            params![memo.title, memo.content, memo.updated_at.to_rfc3339(), id],
        )?;
        tx.commit()?;

        debug!("Updated memo with id: {}", id);
        Ok(memo)
    }

    /// Soft-delete a live memo
    pub fn delete(&self, id: u32) -> Result<()> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "UPDATE memos SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(Error::MemoNotFound(id));
        }
        debug!("Deleted memo with id: {}", id);
        Ok(())
    }

    /// Count live memos
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM memos WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn find_live(conn: &Connection, id: u32) -> Result<Option<Memo>> {
    let memo = conn
        .query_row(&format!("{SELECT_LIVE} AND id = ?1"), params![id], row_to_memo)
        .optional()?;
    Ok(memo)
}

fn row_to_memo(row: &Row<'_>) -> rusqlite::Result<Memo> {
    let deleted_at: Option<String> = row.get(5)?;

    Ok(Memo {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
        updated_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
        deleted_at: deleted_at
            .map(|value| parse_timestamp(5, &value))
            .transpose()?,
    })
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
