//! Static route table for the dashboard

/// Symbolic icon shown next to a tab or menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    List,
    Building,
    Users,
    Chart,
    Settings,
    Preview,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::List => "☰",
            Icon::Building => "▦",
            Icon::Users => "☺",
            Icon::Chart => "▤",
            Icon::Settings => "⚙",
            Icon::Preview => "◉",
        }
    }
}

/// Display metadata for a known path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub icon: Icon,
    pub closable: bool,
}

pub const HOME_PATH: &str = "/";
pub const ACTIONS_PATH: &str = "/actions";

pub const ROUTES: [Route; 6] = [
    Route {
        path: HOME_PATH,
        title: "Inicio",
        icon: Icon::Home,
        closable: false,
    },
    Route {
        path: ACTIONS_PATH,
        title: "Acciones correctivas",
        icon: Icon::List,
        closable: true,
    },
    Route {
        path: "/centres",
        title: "Centros",
        icon: Icon::Building,
        closable: true,
    },
    Route {
        path: "/users",
        title: "Usuarios",
        icon: Icon::Users,
        closable: true,
    },
    Route {
        path: "/reports",
        title: "Informes",
        icon: Icon::Chart,
        closable: true,
    },
    Route {
        path: "/settings",
        title: "Configuración",
        icon: Icon::Settings,
        closable: true,
    },
];

/// Exact-match lookup; no prefix or trailing-slash normalisation.
pub fn lookup(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}

/// Extract `{id}` from `/actions/{id}`.
///
/// The id must be a single non-empty segment, so `/actions`, `/actions/`
/// and `/actions/1/edit` do not match.
pub fn action_detail_id(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(ACTIONS_PATH)?.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest)
}

pub fn action_detail_path(id: &str) -> String {
    format!("{}/{}", ACTIONS_PATH, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact() {
        assert_eq!(lookup("/reports").map(|r| r.title), Some("Informes"));
        assert!(lookup("/reports/").is_none());
        assert!(lookup("/unknown").is_none());
    }

    #[test]
    fn test_home_is_the_only_fixed_route() {
        let fixed: Vec<_> = ROUTES.iter().filter(|r| !r.closable).collect();
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].path, HOME_PATH);
    }

    #[test]
    fn test_action_detail_id() {
        assert_eq!(action_detail_id("/actions/42"), Some("42"));
        assert_eq!(action_detail_id("/actions/AC-7"), Some("AC-7"));
        assert_eq!(action_detail_id("/actions"), None);
        assert_eq!(action_detail_id("/actions/"), None);
        assert_eq!(action_detail_id("/actions/1/edit"), None);
        assert_eq!(action_detail_id("/actionsx/1"), None);
    }
}
