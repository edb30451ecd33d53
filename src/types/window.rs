use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw `key:value` pairs read from a window marker line.
///
/// Values are kept as the text found in the marker; callers parse them as needed.
pub type WindowProperties = BTreeMap<String, String>;

/// One window's worth of tabs as recovered from session text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowGroup {
    /// `None` for a bare group (URLs with no preceding marker line).
    pub properties: Option<WindowProperties>,
    pub entries: Vec<TabEntry>,
}

/// A single URL occurrence with its inline tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabEntry {
    pub url: String,
    pub pinned: bool,
    pub active: bool,
}

impl WindowGroup {
    /// Creates a group started by a marker line.
    pub fn with_properties(properties: WindowProperties) -> Self {
        Self {
            properties: Some(properties),
            entries: Vec::new(),
        }
    }

    /// Creates a group for URLs that appeared outside any marker.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn is_bare(&self) -> bool {
        self.properties.is_none()
    }

    /// Looks up a marker property. Always `None` for bare groups.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .map(String::as_str)
    }
}

impl TabEntry {
    pub fn new(url: impl Into<String>, pinned: bool, active: bool) -> Self {
        Self {
            url: url.into(),
            pinned,
            active,
        }
    }
}
