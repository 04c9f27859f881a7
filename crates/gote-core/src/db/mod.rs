//! SQLite connection bootstrap
//!
//! Connections returned from here have their pragmas set and all
//! migrations applied. Nothing reads or writes memos before that.

pub mod migrations;

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::Result;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if absent) a database file and migrate it
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    debug!("Opening database at: {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = Connection::open(path)?;
    let journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    debug!("Journal mode: {}", journal_mode);

    bootstrap(&mut conn)?;
    info!("Database ready at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database and migrate it (useful for testing)
pub fn open_db_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap(&mut conn)?;
    Ok(conn)
}

fn bootstrap(conn: &mut Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrations::apply_migrations(conn)
}
