use serde::{Deserialize, Serialize};

use super::settings::Dialect;

/// Exported session text kept in the local database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub label: String,
    pub dialect: Dialect,
    pub content: String,
    pub window_count: usize,
    pub tab_count: usize,
    pub created_at: i64,
}
