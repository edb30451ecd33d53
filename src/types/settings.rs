use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level tabstash settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StashSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Dialect used when a caller does not pick one.
    pub dialect: Dialect,
}

/// Settings that shape what a save captures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
    /// Tabs whose URL starts with one of these are left out of an export.
    pub excluded_url_prefixes: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            excluded_url_prefixes: default_excluded_prefixes(),
        }
    }
}

/// Where snapshots are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub database_path: Option<String>,
}

/// The two session text dialects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Human-editable marker lines plus one URL per line.
    #[default]
    Marker,
    /// Structured JSON document with explicit field names.
    Record,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Marker => "marker",
            Dialect::Record => "record",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "marker" | "text" => Ok(Dialect::Marker),
            "record" | "json" => Ok(Dialect::Record),
            other => Err(format!("unknown dialect: {}", other)),
        }
    }
}

/// Internal browser pages that cannot be reopened from a saved URL.
pub fn default_excluded_prefixes() -> Vec<String> {
    vec!["chrome://".to_string(), "chrome-extension://".to_string()]
}
