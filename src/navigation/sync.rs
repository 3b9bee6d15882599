//! Keeps the open tabs in step with the current path

use super::routes::{self, Icon};
use super::tabs::{Tab, TabsStore};

/// Result of synchronising one path change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new tab was appended and activated
    Opened(String),
    /// An existing tab was activated
    Activated(String),
    /// Path is not mapped; nothing changed
    Ignored,
}

/// Build the tab a path would open, if the path is known
pub fn tab_for_path(path: &str) -> Option<Tab> {
    if let Some(id) = routes::action_detail_id(path) {
        return Some(Tab {
            id: format!("action-{}", id),
            title: format!("Acción #{}", id),
            path: path.to_string(),
            icon: Icon::Preview,
            closable: true,
        });
    }

    routes::lookup(path).map(|route| Tab {
        id: route.path.to_string(),
        title: route.title.to_string(),
        path: route.path.to_string(),
        icon: route.icon,
        closable: route.closable,
    })
}

/// Open-or-reuse the tab for `path` and make it active
pub fn sync_tabs<S: TabsStore + ?Sized>(store: &mut S, path: &str) -> SyncOutcome {
    let Some(tab) = tab_for_path(path) else {
        log::debug!("no tab for unmapped path {path}");
        return SyncOutcome::Ignored;
    };

    let id = tab.id.clone();
    let opened = !store.contains(&id);
    if opened {
        store.open_tab(tab);
    }
    if store.contains(&id) {
        store.set_active_tab(&id);
    }

    if opened {
        log::info!("opened tab {id}");
        SyncOutcome::Opened(id)
    } else {
        SyncOutcome::Activated(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::tabs::TabManager;

    #[test]
    fn test_detail_tab_shape() {
        let tab = tab_for_path("/actions/42").unwrap();
        assert_eq!(tab.id, "action-42");
        assert!(tab.title.contains("42"));
        assert_eq!(tab.icon, Icon::Preview);
        assert!(tab.closable);
    }

    #[test]
    fn test_reuse_does_not_overwrite() {
        let mut manager = TabManager::new();
        manager.open_tab(Tab {
            id: "/reports".to_string(),
            title: "Renamed".to_string(),
            path: "/reports".to_string(),
            icon: Icon::Chart,
            closable: true,
        });

        let outcome = sync_tabs(&mut manager, "/reports");
        assert_eq!(outcome, SyncOutcome::Activated("/reports".to_string()));
        assert_eq!(manager.tabs()[0].title, "Renamed");
        assert_eq!(manager.active_tab_id(), Some("/reports"));
    }

    #[test]
    fn test_unmapped_leaves_active() {
        let mut manager = TabManager::new();
        sync_tabs(&mut manager, "/users");
        assert_eq!(sync_tabs(&mut manager, "/nope"), SyncOutcome::Ignored);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.active_tab_id(), Some("/users"));
    }
}
