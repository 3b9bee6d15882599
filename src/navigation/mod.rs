//! Path-based navigation: routes, open tabs, breadcrumbs

pub mod breadcrumbs;
pub mod routes;
pub mod sync;
pub mod tabs;

pub use breadcrumbs::{breadcrumbs, Breadcrumb};
pub use routes::{Icon, Route, ROUTES};
pub use sync::{sync_tabs, SyncOutcome};
pub use tabs::{CloseRefused, Tab, TabManager, TabsStore};

/// Current location plus back history
///
/// Every path change goes through [`Navigator::navigate`], which feeds the
/// tab synchronizer.
#[derive(Debug)]
pub struct Navigator {
    current: String,
    history: Vec<String>,
    max_history: usize,
}

impl Navigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            current: normalize(&start.into()),
            history: Vec::new(),
            max_history: 64,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Sync tabs for the starting location
    pub fn mount<S: TabsStore + ?Sized>(&self, store: &mut S) -> SyncOutcome {
        sync_tabs(store, &self.current)
    }

    pub fn navigate<S: TabsStore + ?Sized>(&mut self, path: &str, store: &mut S) -> SyncOutcome {
        let path = normalize(path);
        if path != self.current {
            let previous = std::mem::replace(&mut self.current, path);
            self.history.push(previous);
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
        sync_tabs(store, &self.current)
    }

    pub fn back<S: TabsStore + ?Sized>(&mut self, store: &mut S) -> Option<SyncOutcome> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(sync_tabs(store, &self.current))
    }
}

/// Ensure a leading slash and strip surrounding whitespace
fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let mut tabs = TabManager::new();
        let mut nav = Navigator::new("/");
        nav.mount(&mut tabs);

        nav.navigate("reports", &mut tabs);
        assert_eq!(nav.current(), "/reports");
        assert_eq!(tabs.active_tab_id(), Some("/reports"));

        nav.back(&mut tabs);
        assert_eq!(nav.current(), "/");
        assert_eq!(tabs.active_tab_id(), Some("/"));
        assert!(nav.back(&mut tabs).is_none());
    }

    #[test]
    fn test_same_path_not_recorded() {
        let mut tabs = TabManager::new();
        let mut nav = Navigator::new("/");
        nav.navigate("/", &mut tabs);
        assert!(!nav.can_go_back());
    }
}
