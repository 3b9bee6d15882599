//! Tab bar rendering

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs as RataTabs;
use ratatui::Frame;

use crate::app::App;
use crate::navigation::{Tab, TabsStore};

const TITLE_MAX: usize = 18;

fn tab_title(tab: &Tab) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", tab.icon.glyph()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(tab.short_title(TITLE_MAX)),
    ];
    if tab.closable {
        spans.push(Span::styled(" ×", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

/// Draw the open tabs, highlighting the active one
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app.tabs.tabs().iter().map(tab_title).collect();
    let selected = app.tabs.active_index().unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::sync::tab_for_path;

    #[test]
    fn test_home_title_has_no_close_marker() {
        let home = tab_for_path("/").unwrap();
        let line = tab_title(&home);
        assert_eq!(line.spans.len(), 2);

        let detail = tab_for_path("/actions/12").unwrap();
        let line = tab_title(&detail);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "Acción #12");
    }
}
