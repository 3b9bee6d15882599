//! Open tabs and the store contract used by the synchronizer

use super::routes::Icon;

/// A single open tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Path itself, or `action-<id>` for detail views
    pub id: String,
    pub title: String,
    pub path: String,
    pub icon: Icon,
    pub closable: bool,
}

impl Tab {
    /// Get a short display title for the tab bar
    pub fn short_title(&self, max_len: usize) -> String {
        if self.title.chars().count() <= max_len {
            self.title.clone()
        } else {
            let head: String = self.title.chars().take(max_len.saturating_sub(1)).collect();
            format!("{}…", head)
        }
    }
}

/// Contract between the synchronizer and whoever holds the tabs
pub trait TabsStore {
    /// Ordered view of the open tabs (open order)
    fn tabs(&self) -> &[Tab];

    /// Append `tab` unless a tab with the same id is already open
    fn open_tab(&mut self, tab: Tab);

    /// Mark `id` active. Unknown ids are ignored.
    fn set_active_tab(&mut self, id: &str);

    fn active_tab_id(&self) -> Option<&str>;

    fn contains(&self, id: &str) -> bool {
        self.tabs().iter().any(|tab| tab.id == id)
    }
}

/// In-memory tabs store
#[derive(Debug, Default)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active: Option<String>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active(&self) -> Option<&Tab> {
        let id = self.active.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn active_index(&self) -> Option<usize> {
        let id = self.active.as_deref()?;
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Close a tab by id
    ///
    /// Returns the path of the tab that became active, if the closed tab was
    /// the active one. Non-closable and unknown tabs are left alone.
    pub fn close_tab(&mut self, id: &str) -> Result<Option<String>, CloseRefused> {
        let Some(index) = self.tabs.iter().position(|tab| tab.id == id) else {
            return Err(CloseRefused::Unknown);
        };
        if !self.tabs[index].closable {
            return Err(CloseRefused::Pinned);
        }

        self.tabs.remove(index);

        if self.active.as_deref() != Some(id) {
            return Ok(None);
        }

        // Right neighbour takes over, or the new last tab
        let next = self
            .tabs
            .get(index)
            .or_else(|| self.tabs.last())
            .map(|tab| (tab.id.clone(), tab.path.clone()));
        match next {
            Some((next_id, path)) => {
                self.active = Some(next_id);
                Ok(Some(path))
            }
            None => {
                self.active = None;
                Ok(None)
            }
        }
    }

    /// Path of the tab after the active one (wrapping)
    pub fn next_path(&self) -> Option<String> {
        let index = self.active_index()?;
        let next = (index + 1) % self.tabs.len();
        self.tabs.get(next).map(|tab| tab.path.clone())
    }

    /// Path of the tab before the active one (wrapping)
    pub fn prev_path(&self) -> Option<String> {
        let index = self.active_index()?;
        let prev = if index == 0 {
            self.tabs.len() - 1
        } else {
            index - 1
        };
        self.tabs.get(prev).map(|tab| tab.path.clone())
    }
}

impl TabsStore for TabManager {
    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn open_tab(&mut self, tab: Tab) {
        if self.contains(&tab.id) {
            return;
        }
        self.tabs.push(tab);
    }

    fn set_active_tab(&mut self, id: &str) {
        if self.contains(id) {
            self.active = Some(id.to_string());
        } else {
            log::debug!("ignoring activation of unknown tab {id}");
        }
    }

    fn active_tab_id(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

/// Why a close request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CloseRefused {
    #[error("tab is not open")]
    Unknown,
    #[error("tab cannot be closed")]
    Pinned,
}
