//! Browser host abstraction.
//!
//! The host owns the real windows and tabs. Exporting and restoring only talk to
//! it through [`BrowserHost`], one call at a time, so an extension bridge, a
//! remote debugging client or the in-memory [`memory::MemoryHost`] can all back
//! the same workflows.

pub mod memory;

use crate::types::browser::{
    BrowserTab, BrowserWindow, CreateTabData, CreateWindowData, TabUpdate, WindowUpdate,
};
use crate::types::errors::HostError;

/// Window and tab operations provided by the browser.
pub trait BrowserHost {
    /// The window the user is acting from, with its tabs.
    fn current_window(&mut self) -> Result<BrowserWindow, HostError>;
    /// Every open window, each populated with its tabs.
    fn all_windows(&mut self) -> Result<Vec<BrowserWindow>, HostError>;
    /// Opens a window with a single tab and returns it.
    fn create_window(&mut self, data: &CreateWindowData) -> Result<BrowserWindow, HostError>;
    fn update_window(&mut self, window_id: i64, update: &WindowUpdate) -> Result<(), HostError>;
    fn create_tab(&mut self, data: &CreateTabData) -> Result<BrowserTab, HostError>;
    fn update_tab(&mut self, tab_id: i64, update: &TabUpdate) -> Result<(), HostError>;
}
