//! SQLite connection for the snapshot store.
//!
//! [`Database`] wraps a `rusqlite::Connection` and migrates the schema on open.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use super::migrations;
use crate::types::errors::DatabaseError;

/// Owned SQLite connection with an up-to-date schema.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file, creating missing parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DatabaseError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| DatabaseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "database opened");
        Self::migrated(conn)
    }

    /// Opens a throwaway in-memory database. Used by tests and previews.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Self::migrated(conn)
    }

    fn migrated(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn).map_err(DatabaseError::Migration)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
