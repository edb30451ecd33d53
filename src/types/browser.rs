use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Show state of a browser window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
    LockedFullscreen,
}

impl WindowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::Normal => "normal",
            WindowState::Minimized => "minimized",
            WindowState::Maximized => "maximized",
            WindowState::Fullscreen => "fullscreen",
            WindowState::LockedFullscreen => "locked-fullscreen",
        }
    }

    pub fn is_normal(&self) -> bool {
        *self == WindowState::Normal
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(WindowState::Normal),
            "minimized" => Ok(WindowState::Minimized),
            "maximized" => Ok(WindowState::Maximized),
            "fullscreen" => Ok(WindowState::Fullscreen),
            // Both spellings show up: the extension API uses the hyphen, serde the underscore.
            "locked-fullscreen" | "locked_fullscreen" => Ok(WindowState::LockedFullscreen),
            other => Err(format!("unknown window state: {}", other)),
        }
    }
}

/// A live browser window as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserWindow {
    pub id: i64,
    #[serde(default)]
    pub left: Option<i32>,
    #[serde(default)]
    pub top: Option<i32>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub state: WindowState,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub incognito: bool,
    #[serde(default)]
    pub tabs: Vec<BrowserTab>,
}

/// A live browser tab as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserTab {
    pub id: i64,
    pub window_id: i64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

/// Arguments for opening a new window with a single tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateWindowData {
    pub url: String,
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub focused: bool,
    pub incognito: bool,
}

/// Follow-up window changes. State cannot be combined with bounds on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WindowUpdate {
    pub state: Option<WindowState>,
    pub focused: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTabData {
    pub window_id: i64,
    pub url: String,
    pub pinned: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabUpdate {
    pub pinned: Option<bool>,
    pub active: Option<bool>,
}

/// `"private"` for incognito windows, `"regular"` otherwise.
pub fn mode_label(incognito: bool) -> &'static str {
    if incognito {
        "private"
    } else {
        "regular"
    }
}
