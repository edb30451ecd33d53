use serde::{Deserialize, Serialize};

use super::browser::WindowState;

/// Current version written into record documents.
pub const RECORD_VERSION: u32 = 1;

/// Structured session document: the lossless alternative to marker text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub windows: Vec<WindowRecord>,
}

/// A window with explicit, typed fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default)]
    pub state: WindowState,
    #[serde(default)]
    pub focused: bool,
    pub tabs: Vec<TabRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabRecord {
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

fn default_version() -> u32 {
    RECORD_VERSION
}
