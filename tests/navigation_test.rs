//! Tab synchronizer and breadcrumb behaviour through the public API

use capa::navigation::{
    breadcrumbs, sync_tabs, Breadcrumb, Navigator, SyncOutcome, TabManager, TabsStore, ROUTES,
};

#[test]
fn test_every_known_path_opens_one_active_tab() {
    for route in ROUTES.iter() {
        let mut tabs = TabManager::new();
        sync_tabs(&mut tabs, route.path);

        let matching: Vec<_> = tabs.tabs().iter().filter(|t| t.id == route.path).collect();
        assert_eq!(matching.len(), 1, "path {}", route.path);
        assert_eq!(tabs.active_tab_id(), Some(route.path));
    }
}

#[test]
fn test_repeated_navigation_is_idempotent() {
    let mut tabs = TabManager::new();
    assert_eq!(
        sync_tabs(&mut tabs, "/centres"),
        SyncOutcome::Opened("/centres".to_string())
    );
    assert_eq!(
        sync_tabs(&mut tabs, "/centres"),
        SyncOutcome::Activated("/centres".to_string())
    );
    assert_eq!(tabs.tabs().len(), 1);
}

#[test]
fn test_detail_path_tab() {
    let mut tabs = TabManager::new();
    sync_tabs(&mut tabs, "/actions/42");

    let tab = &tabs.tabs()[0];
    assert_eq!(tab.id, "action-42");
    assert!(tab.title.contains("42"));
    assert!(tab.closable);
    assert_eq!(tab.path, "/actions/42");
    assert_eq!(tabs.active_tab_id(), Some("action-42"));
}

#[test]
fn test_unmapped_path_changes_nothing() {
    let mut tabs = TabManager::new();
    sync_tabs(&mut tabs, "/users");
    let before = tabs.tabs().to_vec();

    assert_eq!(sync_tabs(&mut tabs, "/unknown"), SyncOutcome::Ignored);
    assert_eq!(tabs.tabs(), before.as_slice());
    assert_eq!(tabs.active_tab_id(), Some("/users"));
}

#[test]
fn test_reopening_keeps_open_order() {
    let mut tabs = TabManager::new();
    for path in ["/", "/reports", "/actions/1", "/reports", "/settings"] {
        sync_tabs(&mut tabs, path);
    }
    let ids: Vec<_> = tabs.tabs().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["/", "/reports", "action-1", "/settings"]);
}

#[test]
fn test_breadcrumbs() {
    assert_eq!(
        breadcrumbs("/reports"),
        vec![Breadcrumb {
            path: "/reports".to_string(),
            label: "Informes".to_string(),
            is_last: true,
        }]
    );
    assert!(breadcrumbs("/").is_empty());

    let trail = breadcrumbs("/actions/17");
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].label, "Acciones");
    assert!(!trail[0].is_last);
    assert_eq!(trail[1].path, "/actions/17");
    assert_eq!(trail[1].label, "17");
}

#[test]
fn test_navigator_back_reactivates_previous_tab() {
    let mut tabs = TabManager::new();
    let mut nav = Navigator::new("/");
    nav.mount(&mut tabs);
    nav.navigate("/actions/3", &mut tabs);
    nav.navigate("/reports", &mut tabs);

    assert_eq!(
        nav.back(&mut tabs),
        Some(SyncOutcome::Activated("action-3".to_string()))
    );
    assert_eq!(nav.current(), "/actions/3");
    assert_eq!(tabs.active_tab_id(), Some("action-3"));
    assert_eq!(tabs.tabs().len(), 3);
}
