use std::path::PathBuf;

use thiserror::Error;

// === HostError ===

/// Errors reported by the browser host while querying or changing windows and tabs.
#[derive(Debug, Error)]
pub enum HostError {
    /// Window with the given ID was not found.
    #[error("Window not found: {0}")]
    WindowNotFound(i64),
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    TabNotFound(i64),
    /// The host refused the operation.
    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}

// === FormatError ===

/// Errors raised while encoding or decoding session text.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The structured record document could not be decoded.
    #[error("Invalid session record: {0}")]
    Record(#[source] serde_json::Error),
    /// The structured record document could not be written.
    #[error("Failed to write session record: {0}")]
    Encode(#[source] serde_json::Error),
}

// === ExportError ===

/// Errors related to saving the open windows.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

// === RestoreError ===

/// Errors related to restoring windows from session text.
///
/// Restoring stops at the first error; windows and tabs created before it stay open.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The input text was empty or whitespace only.
    #[error("No data to restore")]
    EmptyInput,
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Host(#[from] HostError),
}

// === DatabaseError ===

/// Errors raised while opening or migrating the snapshot database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to create database directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Database migration failed: {0}")]
    Migration(#[source] rusqlite::Error),
}

// === SnapshotError ===

/// Errors related to snapshot persistence.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot with the given ID was not found.
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    /// The snapshot content is not valid for its dialect.
    #[error("Invalid snapshot content: {0}")]
    InvalidContent(#[from] FormatError),
    /// Database operation failed.
    #[error("Snapshot database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
