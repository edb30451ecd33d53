//! Session Exporter for tabstash.
//!
//! Captures the open windows of the current browsing mode and writes them out in
//! the requested dialect.

use serde::Serialize;
use tracing::{debug, info};

use crate::host::BrowserHost;
use crate::services::session_format::format_for;
use crate::types::browser::{mode_label, BrowserWindow};
use crate::types::errors::{ExportError, FormatError};
use crate::types::settings::{default_excluded_prefixes, Dialect};

/// Trait defining session export operations.
pub trait SessionExporterTrait {
    fn capture(
        &self,
        host: &mut dyn BrowserHost,
        dialect: Dialect,
    ) -> Result<ExportOutcome, ExportError>;
    fn export_windows(
        &self,
        incognito: bool,
        windows: &[BrowserWindow],
        dialect: Dialect,
    ) -> Result<ExportOutcome, FormatError>;
}

/// Result of a save: the text plus what went into it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportOutcome {
    pub text: String,
    pub dialect: Dialect,
    pub window_count: usize,
    pub tab_count: usize,
    pub incognito: bool,
}

impl ExportOutcome {
    pub fn summary(&self) -> String {
        format!(
            "Saved {} {} window(s) with {} tab(s)",
            self.window_count,
            mode_label(self.incognito),
            self.tab_count
        )
    }
}

/// Exporter that filters out internal pages before encoding.
pub struct SessionExporter {
    excluded_url_prefixes: Vec<String>,
}

impl SessionExporter {
    pub fn new(excluded_url_prefixes: Vec<String>) -> Self {
        Self {
            excluded_url_prefixes,
        }
    }

    fn is_excluded(&self, url: &str) -> bool {
        self.excluded_url_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    /// Keeps windows of the given mode, minus excluded tabs and windows left empty.
    pub fn select_windows(&self, incognito: bool, windows: &[BrowserWindow]) -> Vec<BrowserWindow> {
        windows
            .iter()
            .filter(|w| w.incognito == incognito)
            .filter_map(|w| {
                let mut window = w.clone();
                window.tabs.retain(|t| !self.is_excluded(&t.url));
                (!window.tabs.is_empty()).then_some(window)
            })
            .collect()
    }
}

impl Default for SessionExporter {
    fn default() -> Self {
        Self::new(default_excluded_prefixes())
    }
}

impl SessionExporterTrait for SessionExporter {
    /// Reads the current mode and all windows from the host, then exports them.
    fn capture(
        &self,
        host: &mut dyn BrowserHost,
        dialect: Dialect,
    ) -> Result<ExportOutcome, ExportError> {
        let incognito = host.current_window()?.incognito;
        let windows = host.all_windows()?;
        debug!(total = windows.len(), incognito, "captured windows");

        let outcome = self.export_windows(incognito, &windows, dialect)?;
        info!("{}", outcome.summary());
        Ok(outcome)
    }

    fn export_windows(
        &self,
        incognito: bool,
        windows: &[BrowserWindow],
        dialect: Dialect,
    ) -> Result<ExportOutcome, FormatError> {
        let selected = self.select_windows(incognito, windows);
        let text = format_for(dialect).encode(&selected)?;

        Ok(ExportOutcome {
            text,
            dialect,
            window_count: selected.len(),
            tab_count: selected.iter().map(|w| w.tabs.len()).sum(),
            incognito,
        })
    }
}
