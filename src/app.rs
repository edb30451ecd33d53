//! App Core for tabstash.
//!
//! Holds settings, the snapshot store and the save/restore workflows for the
//! RPC server and the CLI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::database::connection::Database;
use crate::managers::session_exporter::SessionExporter;
use crate::managers::session_restorer::SessionRestorer;
use crate::managers::snapshot_manager::SnapshotManager;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::Dialect;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub snapshot_manager: SnapshotManager,
    pub restorer: SessionRestorer,
}

impl App {
    /// Loads settings and opens the snapshot database.
    ///
    /// `db_path` overrides the database location from settings.
    pub fn new(settings_path: Option<PathBuf>, db_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        settings_engine.load().with_context(|| {
            format!(
                "loading settings from {}",
                settings_engine.get_config_path().display()
            )
        })?;

        let db_path = db_path.unwrap_or_else(|| settings_engine.database_path());
        let db = Database::open(&db_path)
            .with_context(|| format!("opening snapshot database {}", db_path.display()))?;

        Ok(Self::with_database(settings_engine, db))
    }

    /// Builds an app around an already opened database.
    pub fn with_database(settings_engine: SettingsEngine, db: Database) -> Self {
        Self {
            snapshot_manager: SnapshotManager::new(Arc::new(db)),
            settings_engine,
            restorer: SessionRestorer::new(),
        }
    }

    /// The requested dialect, or the configured default.
    pub fn dialect(&self, requested: Option<Dialect>) -> Dialect {
        requested.unwrap_or(self.settings_engine.get_settings().general.dialect)
    }

    /// An exporter using the currently configured exclusions.
    pub fn exporter(&self) -> SessionExporter {
        SessionExporter::new(
            self.settings_engine
                .get_settings()
                .export
                .excluded_url_prefixes
                .clone(),
        )
    }
}
