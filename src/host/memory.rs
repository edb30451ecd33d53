use tracing::trace;

use crate::host::BrowserHost;
use crate::types::browser::{
    BrowserTab, BrowserWindow, CreateTabData, CreateWindowData, TabUpdate, WindowState,
    WindowUpdate,
};
use crate::types::errors::HostError;

/// In-memory browser used for previews and tests.
///
/// Windows and tabs get increasing integer IDs. A new window starts with one
/// tab; creating or activating a tab deactivates its siblings; pinning moves a
/// tab right after the tabs already pinned in its window.
pub struct MemoryHost {
    windows: Vec<BrowserWindow>,
    current_window_id: i64,
    next_id: i64,
    call_budget: Option<usize>,
}

impl MemoryHost {
    /// Creates a host with one empty regular window that acts as the current window.
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Creates a host whose current window is private when `incognito` is set.
    pub fn with_mode(incognito: bool) -> Self {
        let mut host = Self {
            windows: Vec::new(),
            current_window_id: 0,
            next_id: 1,
            call_budget: None,
        };
        let id = host.alloc_id();
        host.windows.push(BrowserWindow {
            id,
            left: Some(0),
            top: Some(0),
            width: Some(1280),
            height: Some(800),
            state: WindowState::Normal,
            focused: true,
            incognito,
            tabs: Vec::new(),
        });
        host.current_window_id = id;
        host
    }

    /// Builds a host from pre-existing windows. The first one is current.
    ///
    /// Windows and tabs keep their IDs; new IDs continue after the largest one.
    pub fn from_windows(windows: Vec<BrowserWindow>) -> Self {
        let max_id = windows
            .iter()
            .flat_map(|w| std::iter::once(w.id).chain(w.tabs.iter().map(|t| t.id)))
            .max()
            .unwrap_or(0);
        let current_window_id = windows.first().map_or(0, |w| w.id);
        Self {
            windows,
            current_window_id,
            next_id: max_id + 1,
            call_budget: None,
        }
    }

    /// Lets only `calls` more mutating operations succeed; later ones are rejected.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.call_budget = Some(calls);
        self
    }

    pub fn windows(&self) -> &[BrowserWindow] {
        &self.windows
    }

    pub fn window(&self, window_id: i64) -> Option<&BrowserWindow> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn tab_count(&self) -> usize {
        self.windows.iter().map(|w| w.tabs.len()).sum()
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spend_call(&mut self, operation: &str) -> Result<(), HostError> {
        match self.call_budget.as_mut() {
            Some(0) => Err(HostError::Rejected(format!("{} refused", operation))),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn window_mut(&mut self, window_id: i64) -> Result<&mut BrowserWindow, HostError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == window_id)
            .ok_or(HostError::WindowNotFound(window_id))
    }

    /// Returns (window index, tab index) for a tab.
    fn locate_tab(&self, tab_id: i64) -> Result<(usize, usize), HostError> {
        self.windows
            .iter()
            .enumerate()
            .find_map(|(wi, w)| w.tabs.iter().position(|t| t.id == tab_id).map(|ti| (wi, ti)))
            .ok_or(HostError::TabNotFound(tab_id))
    }

    fn activate(window: &mut BrowserWindow, tab_id: i64) {
        for tab in &mut window.tabs {
            tab.active = tab.id == tab_id;
        }
    }

    /// Moves the tab at `index` to sit right after the other pinned tabs.
    fn move_after_pinned(window: &mut BrowserWindow, index: usize) {
        let tab = window.tabs.remove(index);
        let insert_at = window.tabs.iter().filter(|t| t.pinned).count();
        window.tabs.insert(insert_at, tab);
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserHost for MemoryHost {
    fn current_window(&mut self) -> Result<BrowserWindow, HostError> {
        self.window(self.current_window_id)
            .cloned()
            .ok_or(HostError::WindowNotFound(self.current_window_id))
    }

    fn all_windows(&mut self) -> Result<Vec<BrowserWindow>, HostError> {
        Ok(self.windows.clone())
    }

    fn create_window(&mut self, data: &CreateWindowData) -> Result<BrowserWindow, HostError> {
        self.spend_call("windows.create")?;
        let window_id = self.alloc_id();
        let tab_id = self.alloc_id();

        if data.focused {
            for w in &mut self.windows {
                w.focused = false;
            }
        }

        let window = BrowserWindow {
            id: window_id,
            left: data.left,
            top: data.top,
            width: data.width,
            height: data.height,
            state: WindowState::Normal,
            focused: data.focused,
            incognito: data.incognito,
            tabs: vec![BrowserTab {
                id: tab_id,
                window_id,
                url: data.url.clone(),
                title: data.url.clone(),
                pinned: false,
                active: true,
            }],
        };
        trace!(window_id, url = %data.url, "window created");
        self.windows.push(window.clone());
        Ok(window)
    }

    fn update_window(&mut self, window_id: i64, update: &WindowUpdate) -> Result<(), HostError> {
        self.spend_call("windows.update")?;
        let window = self.window_mut(window_id)?;
        if let Some(state) = update.state {
            window.state = state;
        }
        if let Some(focused) = update.focused {
            window.focused = focused;
        }
        Ok(())
    }

    fn create_tab(&mut self, data: &CreateTabData) -> Result<BrowserTab, HostError> {
        self.spend_call("tabs.create")?;
        let tab_id = self.alloc_id();
        let window = self.window_mut(data.window_id)?;

        let tab = BrowserTab {
            id: tab_id,
            window_id: data.window_id,
            url: data.url.clone(),
            title: data.url.clone(),
            pinned: false,
            active: false,
        };
        window.tabs.push(tab);

        let last = window.tabs.len() - 1;
        if data.pinned {
            window.tabs[last].pinned = true;
            Self::move_after_pinned(window, last);
        }
        if data.active || window.tabs.len() == 1 {
            Self::activate(window, tab_id);
        }

        trace!(tab_id, window_id = data.window_id, "tab created");
        window
            .tabs
            .iter()
            .find(|t| t.id == tab_id)
            .cloned()
            .ok_or(HostError::TabNotFound(tab_id))
    }

    fn update_tab(&mut self, tab_id: i64, update: &TabUpdate) -> Result<(), HostError> {
        self.spend_call("tabs.update")?;
        let (wi, ti) = self.locate_tab(tab_id)?;
        let window = &mut self.windows[wi];

        if let Some(pinned) = update.pinned {
            if window.tabs[ti].pinned != pinned {
                window.tabs[ti].pinned = pinned;
                Self::move_after_pinned(window, ti);
            }
        }
        if update.active == Some(true) {
            Self::activate(window, tab_id);
        }
        Ok(())
    }
}
