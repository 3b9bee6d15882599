use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width in columns when expanded
pub const SIDEBAR_EXPANDED: u16 = 26;
/// Sidebar width in columns when collapsed to icons
pub const SIDEBAR_COLLAPSED: u16 = 5;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub tab_bar: Rect,
    pub main: Rect,
    pub sidebar: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect, sidebar_collapsed: bool) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let sidebar_width = if sidebar_collapsed {
        SIDEBAR_COLLAPSED
    } else {
        SIDEBAR_EXPANDED
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(vertical[2]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[3]);

    UiAreas {
        size,
        header: vertical[0],
        tab_bar: vertical[1],
        main: vertical[2],
        sidebar: main_chunks[0],
        content: main_chunks[1],
        footer: vertical[3],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}
