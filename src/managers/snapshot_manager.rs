//! Snapshot Manager for tabstash.
//!
//! Keeps exported session text in SQLite so a save can be restored later without
//! going through the clipboard.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::connection::Database;
use crate::services::session_format::format_for;
use crate::types::errors::SnapshotError;
use crate::types::settings::Dialect;
use crate::types::snapshot::Snapshot;

const SELECT_COLUMNS: &str =
    "SELECT id, label, dialect, content, window_count, tab_count, created_at FROM snapshots";

/// Trait defining snapshot persistence operations.
pub trait SnapshotManagerTrait {
    fn save(&self, label: &str, dialect: Dialect, content: &str) -> Result<Snapshot, SnapshotError>;
    fn list(&self) -> Result<Vec<Snapshot>, SnapshotError>;
    fn get(&self, id: &str) -> Result<Snapshot, SnapshotError>;
    fn latest(&self) -> Result<Option<Snapshot>, SnapshotError>;
    fn delete(&self, id: &str) -> Result<(), SnapshotError>;
    fn clear(&self) -> Result<(), SnapshotError>;
}

/// Snapshot store backed by SQLite.
pub struct SnapshotManager {
    db: Arc<Database>,
}

impl SnapshotManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Snapshot> {
        let dialect: String = row.get(2)?;
        let window_count: i64 = row.get(4)?;
        let tab_count: i64 = row.get(5)?;
        Ok(Snapshot {
            id: row.get(0)?,
            label: row.get(1)?,
            // Unknown dialect names read back as the default.
            dialect: dialect.parse().unwrap_or_default(),
            content: row.get(3)?,
            window_count: window_count as usize,
            tab_count: tab_count as usize,
            created_at: row.get(6)?,
        })
    }
}

impl SnapshotManagerTrait for SnapshotManager {
    /// Stores session text after checking it decodes in its dialect.
    ///
    /// Window and tab counts are taken from the decoded groups (groups without
    /// entries are not counted).
    fn save(&self, label: &str, dialect: Dialect, content: &str) -> Result<Snapshot, SnapshotError> {
        let groups = format_for(dialect).decode(content)?;
        let window_count = groups
            .iter()
            .filter(|g| !g.is_bare() && !g.entries.is_empty())
            .count();
        let tab_count = groups.iter().map(|g| g.entries.len()).sum();

        let snapshot = Snapshot {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
            dialect,
            content: content.to_string(),
            window_count,
            tab_count,
            created_at: Self::now(),
        };

        self.db.connection().execute(
            "INSERT INTO snapshots (id, label, dialect, content, window_count, tab_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                snapshot.id,
                snapshot.label,
                snapshot.dialect.as_str(),
                snapshot.content,
                snapshot.window_count as i64,
                snapshot.tab_count as i64,
                snapshot.created_at,
            ],
        )?;

        info!(id = %snapshot.id, windows = window_count, tabs = tab_count, "snapshot saved");
        Ok(snapshot)
    }

    /// All snapshots, newest first.
    fn list(&self) -> Result<Vec<Snapshot>, SnapshotError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;
        let snapshots = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshots)
    }

    fn get(&self, id: &str) -> Result<Snapshot, SnapshotError> {
        self.db
            .connection()
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Self::from_row,
            )
            .optional()?
            .ok_or_else(|| SnapshotError::NotFound(id.to_string()))
    }

    fn latest(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let snapshot = self
            .db
            .connection()
            .query_row(
                &format!("{} ORDER BY created_at DESC, rowid DESC LIMIT 1", SELECT_COLUMNS),
                [],
                Self::from_row,
            )
            .optional()?;
        Ok(snapshot)
    }

    fn delete(&self, id: &str) -> Result<(), SnapshotError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM snapshots WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(SnapshotError::NotFound(id.to_string()));
        }
        debug!(id, "snapshot deleted");
        Ok(())
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        self.db.connection().execute("DELETE FROM snapshots", [])?;
        Ok(())
    }
}
