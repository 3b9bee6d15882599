//! Sidebar: navigation menu plus persisted expand/collapse state
//!
//! Persistence rules:
//! - on first mount the live state is reconciled with the stored one by
//!   issuing at most one toggle;
//! - after mount every state change is written back unconditionally;
//! - a viewport narrower than [`COLLAPSE_BELOW`] units forces a collapse.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Action, Context, Module};
use crate::navigation::routes::{Route, ROUTES};
use crate::store::{LocalStore, SIDEBAR_KEY};

/// Viewport width (units) under which an expanded sidebar collapses
pub const COLLAPSE_BELOW: u32 = 768;

/// Units per terminal column when the terminal does not report pixels
pub const UNITS_PER_COLUMN: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub fn toggled(self) -> Self {
        match self {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        }
    }

    fn as_stored(self) -> &'static str {
        match self {
            SidebarState::Expanded => "false",
            SidebarState::Collapsed => "true",
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(SidebarState::Collapsed),
            "false" => Some(SidebarState::Expanded),
            _ => None,
        }
    }
}

/// Ctrl+B, or Cmd+B where the terminal reports the super modifier
pub fn is_toggle_shortcut(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('b') | KeyCode::Char('B'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Viewport width in units, preferring the pixel width when known
pub fn viewport_units(columns: u16, pixel_width: u16) -> u32 {
    if pixel_width > 0 {
        u32::from(pixel_width)
    } else {
        u32::from(columns) * UNITS_PER_COLUMN
    }
}

#[derive(Debug)]
pub struct Sidebar {
    state: SidebarState,
    mounted: bool,
    selected: usize,
}

impl Sidebar {
    pub fn new(initial: SidebarState) -> Self {
        Self {
            state: initial,
            mounted: false,
            selected: 0,
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_collapsed(&self) -> bool {
        self.state == SidebarState::Collapsed
    }

    /// Stored state, if any and readable
    pub fn persisted(store: &LocalStore) -> Option<SidebarState> {
        match store.get(SIDEBAR_KEY) {
            Ok(value) => value.as_deref().and_then(SidebarState::from_stored),
            Err(err) => {
                log::warn!("could not read sidebar state: {err:#}");
                None
            }
        }
    }

    /// First mount; returns how many toggles were issued (0 or 1)
    pub fn mount(&mut self, store: &LocalStore) -> usize {
        if self.mounted {
            return 0;
        }
        self.mounted = true;

        match Self::persisted(store) {
            Some(stored) if stored != self.state => {
                if let Err(err) = self.toggle(store) {
                    log::warn!("could not persist sidebar state: {err:#}");
                }
                1
            }
            _ => 0,
        }
    }

    /// Flip the state; persisted once mounted
    pub fn toggle(&mut self, store: &LocalStore) -> Result<SidebarState> {
        self.state = self.state.toggled();
        log::debug!("sidebar {:?}", self.state);
        if self.mounted {
            store.set(SIDEBAR_KEY, self.state.as_stored())?;
        }
        Ok(self.state)
    }

    /// Responsive rule; returns true if the sidebar was collapsed
    pub fn apply_viewport(&mut self, width_units: u32, store: &LocalStore) -> Result<bool> {
        if width_units < COLLAPSE_BELOW && self.state == SidebarState::Expanded {
            self.toggle(store)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn selected_route(&self) -> &'static Route {
        &ROUTES[self.selected % ROUTES.len()]
    }

    /// Move the menu cursor onto `path`, if it is a menu entry
    pub fn select_path(&mut self, path: &str) {
        if let Some(idx) = ROUTES.iter().position(|route| route.path == path) {
            self.selected = idx;
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

impl Module for Sidebar {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(ROUTES.len() - 1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ROUTES.len();
                Action::None
            }
            KeyCode::Enter => {
                let path = self.selected_route().path;
                if path == ctx.current_path {
                    Action::None
                } else {
                    Action::Navigate(path.to_string())
                }
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_detection() {
        let ctrl_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL);
        let cmd_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::SUPER);
        let plain_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert!(is_toggle_shortcut(&ctrl_b));
        assert!(is_toggle_shortcut(&cmd_b));
        assert!(!is_toggle_shortcut(&plain_b));
        assert!(!is_toggle_shortcut(&ctrl_f));
    }

    #[test]
    fn test_viewport_units() {
        assert_eq!(viewport_units(80, 0), 640);
        assert_eq!(viewport_units(80, 1200), 1200);
    }

    #[test]
    fn test_toggle_before_mount_is_not_persisted() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut sidebar = Sidebar::new(SidebarState::Expanded);
        sidebar.toggle(&store).unwrap();
        assert!(Sidebar::persisted(&store).is_none());
    }

    #[test]
    fn test_menu_wraps() {
        let mut sidebar = Sidebar::new(SidebarState::Expanded);
        let mut ctx = Context::new();
        sidebar.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), &mut ctx);
        assert_eq!(sidebar.selected_index(), ROUTES.len() - 1);
        sidebar.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), &mut ctx);
        assert_eq!(sidebar.selected_index(), 0);
    }

    #[test]
    fn test_enter_navigates_elsewhere_only() {
        let mut sidebar = Sidebar::new(SidebarState::Expanded);
        let mut ctx = Context::new();
        ctx.current_path = "/".to_string();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(sidebar.handle_key(enter, &mut ctx), Action::None);

        sidebar.select_path("/reports");
        assert_eq!(
            sidebar.handle_key(enter, &mut ctx),
            Action::Navigate("/reports".to_string())
        );
    }
}
