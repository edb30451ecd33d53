//! Session Restorer for tabstash.
//!
//! Replays parsed window groups through a [`BrowserHost`]. Bare groups become tabs
//! in the current window; groups with marker properties become new windows placed
//! and sized from those properties. The first host failure aborts the restore and
//! nothing already opened is rolled back.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::host::BrowserHost;
use crate::services::session_format::format_for;
use crate::types::browser::{
    mode_label, CreateTabData, CreateWindowData, TabUpdate, WindowState, WindowUpdate,
};
use crate::types::errors::RestoreError;
use crate::types::settings::Dialect;
use crate::types::window::{TabEntry, WindowGroup};

/// Trait defining session restore operations.
pub trait SessionRestorerTrait {
    fn restore(
        &self,
        host: &mut dyn BrowserHost,
        text: &str,
        dialect: Dialect,
    ) -> Result<RestoreOutcome, RestoreError>;
    fn restore_groups(
        &self,
        host: &mut dyn BrowserHost,
        groups: &[WindowGroup],
    ) -> Result<RestoreOutcome, RestoreError>;
}

/// What a restore created.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RestoreOutcome {
    pub window_count: usize,
    pub tab_count: usize,
    pub incognito: bool,
}

impl RestoreOutcome {
    pub fn summary(&self) -> String {
        if self.window_count > 0 {
            format!(
                "Restored {} {} window(s) with {} tab(s)",
                self.window_count,
                mode_label(self.incognito),
                self.tab_count
            )
        } else {
            format!("Restored {} tab(s)", self.tab_count)
        }
    }
}

/// Window placement read from marker properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlacement {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub state: WindowState,
    pub focused: bool,
}

impl WindowPlacement {
    /// Reads placement from a group's properties.
    ///
    /// Bounds that are missing or not numeric stay `None` so the host picks its
    /// defaults. An unknown `state` falls back to normal. `focused` defaults to true.
    pub fn from_group(group: &WindowGroup) -> Self {
        let bound = |key: &str| group.property(key).and_then(parse_leading_int);

        let state = match group.property("state") {
            None => WindowState::Normal,
            Some(raw) => raw.parse::<WindowState>().unwrap_or_else(|err| {
                warn!(%err, "treating window as normal");
                WindowState::Normal
            }),
        };

        let focused = group
            .property("focused")
            .map_or(true, |raw| raw != "false");

        Self {
            left: bound("left"),
            top: bound("top"),
            width: bound("width"),
            height: bound("height"),
            state,
            focused,
        }
    }
}

/// Parses an optional sign followed by digits, ignoring anything after them.
///
/// `"1200"` and `"1200px"` give 1200; `"wide"` and out-of-range numbers give `None`.
pub fn parse_leading_int(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Restorer that creates one host object at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionRestorer;

impl SessionRestorer {
    pub fn new() -> Self {
        Self
    }

    /// Opens bare entries as background tabs of the current window.
    fn restore_bare(
        host: &mut dyn BrowserHost,
        window_id: i64,
        entries: &[TabEntry],
    ) -> Result<usize, RestoreError> {
        for entry in entries {
            host.create_tab(&CreateTabData {
                window_id,
                url: entry.url.clone(),
                pinned: entry.pinned,
                // The current tab stays in front.
                active: false,
            })?;
        }
        Ok(entries.len())
    }

    /// Opens a new window for a group with marker properties.
    fn restore_window(
        host: &mut dyn BrowserHost,
        group: &WindowGroup,
        incognito: bool,
    ) -> Result<usize, RestoreError> {
        let Some((first, rest)) = group.entries.split_first() else {
            return Ok(0);
        };
        let placement = WindowPlacement::from_group(group);

        let window = host.create_window(&CreateWindowData {
            url: first.url.clone(),
            left: placement.left,
            top: placement.top,
            width: placement.width,
            height: placement.height,
            focused: placement.focused,
            incognito,
        })?;
        debug!(window_id = window.id, ?placement, "window opened");

        if !placement.state.is_normal() {
            host.update_window(
                window.id,
                &WindowUpdate {
                    state: Some(placement.state),
                    focused: None,
                },
            )?;
        }

        let first_tab_id = window.tabs.first().map(|t| t.id);
        if first.pinned {
            if let Some(tab_id) = first_tab_id {
                host.update_tab(
                    tab_id,
                    &TabUpdate {
                        pinned: Some(true),
                        active: None,
                    },
                )?;
            }
        }

        let mut active_tab_id = if first.active { first_tab_id } else { None };

        for entry in rest {
            let tab = host.create_tab(&CreateTabData {
                window_id: window.id,
                url: entry.url.clone(),
                pinned: entry.pinned,
                active: false,
            })?;
            if entry.active {
                active_tab_id = Some(tab.id);
            }
        }

        if let Some(tab_id) = active_tab_id {
            host.update_tab(
                tab_id,
                &TabUpdate {
                    pinned: None,
                    active: Some(true),
                },
            )?;
        }

        Ok(group.entries.len())
    }
}

impl SessionRestorerTrait for SessionRestorer {
    /// Decodes `text` with the given dialect and restores the result.
    fn restore(
        &self,
        host: &mut dyn BrowserHost,
        text: &str,
        dialect: Dialect,
    ) -> Result<RestoreOutcome, RestoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RestoreError::EmptyInput);
        }

        let groups = format_for(dialect).decode(text)?;
        debug!(groups = groups.len(), %dialect, "session text decoded");
        self.restore_groups(host, &groups)
    }

    fn restore_groups(
        &self,
        host: &mut dyn BrowserHost,
        groups: &[WindowGroup],
    ) -> Result<RestoreOutcome, RestoreError> {
        let current = host.current_window()?;
        let mut outcome = RestoreOutcome {
            incognito: current.incognito,
            ..RestoreOutcome::default()
        };

        for group in groups.iter().filter(|g| !g.entries.is_empty()) {
            if group.is_bare() {
                outcome.tab_count += Self::restore_bare(host, current.id, &group.entries)?;
            } else {
                outcome.tab_count += Self::restore_window(host, group, current.incognito)?;
                outcome.window_count += 1;
            }
        }

        info!("{}", outcome.summary());
        Ok(outcome)
    }
}
