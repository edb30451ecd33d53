//! Session text dialects.
//!
//! Both dialects encode live browser windows and decode into the same
//! [`WindowGroup`] model, so a single restore path serves either one. The caller
//! always picks the dialect; it is never guessed from the text.

use crate::services::text_parser;
use crate::types::browser::BrowserWindow;
use crate::types::errors::FormatError;
use crate::types::record::{SessionRecord, TabRecord, WindowRecord, RECORD_VERSION};
use crate::types::settings::Dialect;
use crate::types::window::{TabEntry, WindowGroup, WindowProperties};

/// Trait implemented by each session text dialect.
pub trait SessionFormat {
    fn dialect(&self) -> Dialect;
    fn encode(&self, windows: &[BrowserWindow]) -> Result<String, FormatError>;
    fn decode(&self, text: &str) -> Result<Vec<WindowGroup>, FormatError>;
}

/// Returns the format implementation for a dialect.
pub fn format_for(dialect: Dialect) -> Box<dyn SessionFormat> {
    match dialect {
        Dialect::Marker => Box::new(MarkerFormat),
        Dialect::Record => Box::new(RecordFormat),
    }
}

// ─── Marker dialect ───

/// Human-editable dialect: one marker line per window, one URL per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerFormat;

impl MarkerFormat {
    /// Builds the marker line for a window, numbered from 1.
    ///
    /// Bounds the host did not report are left out of the marker.
    pub fn marker_line(number: usize, window: &BrowserWindow) -> String {
        let mut line = format!("/* Window {} |", number);
        let bounds = [
            ("left", window.left),
            ("top", window.top),
            ("width", window.width),
            ("height", window.height),
        ];
        for (key, value) in bounds {
            if let Some(value) = value {
                line.push_str(&format!("{}:{}|", key, value));
            }
        }
        line.push_str(&format!("state:{}| */", window.state));
        line
    }
}

impl SessionFormat for MarkerFormat {
    fn dialect(&self) -> Dialect {
        Dialect::Marker
    }

    /// Windows without tabs are skipped and do not take a number.
    fn encode(&self, windows: &[BrowserWindow]) -> Result<String, FormatError> {
        let mut lines: Vec<String> = Vec::new();
        let mut number = 0;

        for window in windows.iter().filter(|w| !w.tabs.is_empty()) {
            if number > 0 {
                lines.push(String::new());
            }
            number += 1;

            lines.push(Self::marker_line(number, window));
            for tab in &window.tabs {
                let mut line = tab.url.clone();
                if tab.pinned {
                    line.push_str(" [pinned]");
                }
                if tab.active {
                    line.push_str(" [active]");
                }
                lines.push(line);
            }
        }

        Ok(lines.join("\n"))
    }

    fn decode(&self, text: &str) -> Result<Vec<WindowGroup>, FormatError> {
        Ok(text_parser::parse(text))
    }
}

// ─── Record dialect ───

/// Structured dialect: a JSON document with explicit field names.
///
/// Keeps the focus flag and numeric bounds that marker text loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormat;

impl RecordFormat {
    pub fn to_record(windows: &[BrowserWindow]) -> SessionRecord {
        SessionRecord {
            version: RECORD_VERSION,
            windows: windows
                .iter()
                .filter(|w| !w.tabs.is_empty())
                .map(|w| WindowRecord {
                    left: w.left,
                    top: w.top,
                    width: w.width,
                    height: w.height,
                    state: w.state,
                    focused: w.focused,
                    tabs: w
                        .tabs
                        .iter()
                        .map(|t| TabRecord {
                            url: t.url.clone(),
                            pinned: t.pinned,
                            active: t.active,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Maps a record window onto a property-bearing group.
    pub fn to_group(window: &WindowRecord) -> WindowGroup {
        let mut props = WindowProperties::new();
        let bounds = [
            ("left", window.left),
            ("top", window.top),
            ("width", window.width),
            ("height", window.height),
        ];
        for (key, value) in bounds {
            if let Some(value) = value {
                props.insert(key.to_string(), value.to_string());
            }
        }
        props.insert("state".to_string(), window.state.to_string());
        props.insert("focused".to_string(), window.focused.to_string());

        WindowGroup {
            properties: Some(props),
            entries: window
                .tabs
                .iter()
                .map(|t| TabEntry::new(t.url.clone(), t.pinned, t.active))
                .collect(),
        }
    }
}

impl SessionFormat for RecordFormat {
    fn dialect(&self) -> Dialect {
        Dialect::Record
    }

    fn encode(&self, windows: &[BrowserWindow]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&Self::to_record(windows)).map_err(FormatError::Encode)
    }

    fn decode(&self, text: &str) -> Result<Vec<WindowGroup>, FormatError> {
        let record: SessionRecord = serde_json::from_str(text).map_err(FormatError::Record)?;
        Ok(record.windows.iter().map(Self::to_group).collect())
    }
}
