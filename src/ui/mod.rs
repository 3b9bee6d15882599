use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, Focus, InputMode, StatusLevel};
use crate::config::EndpointKind;
use crate::domain::taxonomy::{variant_for, TAXONOMY};
use crate::domain::Badge;
use crate::infrastructure::ProbeReport;
use crate::navigation::routes::{self, ACTIONS_PATH, HOME_PATH};
use crate::navigation::{TabsStore, ROUTES};
use widgets::{badge_spans, BadgeRow};

/// What the content pane shows for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Home,
    Actions,
    ActionDetail(String),
    Centres,
    Users,
    Reports,
    Settings,
    NotFound,
}

impl ContentView {
    pub fn for_path(path: &str) -> Self {
        match path {
            HOME_PATH => ContentView::Home,
            ACTIONS_PATH => ContentView::Actions,
            "/centres" => ContentView::Centres,
            "/users" => ContentView::Users,
            "/reports" => ContentView::Reports,
            "/settings" => ContentView::Settings,
            _ => match routes::action_detail_id(path) {
                Some(id) => ContentView::ActionDetail(id.to_string()),
                None => ContentView::NotFound,
            },
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let areas = layout::areas(size, app.sidebar.is_collapsed());

    draw_header(f, areas.header, app);
    tabs::draw_tab_bar(f, areas.tab_bar, app);
    draw_sidebar(f, areas.sidebar, app);
    draw_content(f, areas.content, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), label_style()),
        Span::raw(value.into()),
    ])
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut spans = vec![
        Span::styled(
            "CAPA",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    let crumbs = app.breadcrumbs();
    if crumbs.is_empty() {
        spans.push(Span::styled("Inicio", Style::default().add_modifier(Modifier::BOLD)));
    } else {
        spans.push(Span::styled("Inicio", label_style()));
        for crumb in crumbs {
            spans.push(Span::styled(" › ", label_style()));
            let style = if crumb.is_last {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(crumb.label, style));
        }
    }

    let left = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let right_line = Line::from(vec![
        Span::styled("API ", label_style()),
        Span::raw(app.api.base_url.clone()),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let collapsed = app.sidebar.is_collapsed();
    let current = app.current_path();

    let items: Vec<ListItem> = ROUTES
        .iter()
        .map(|route| {
            let is_current = route.path == current
                || (route.path == ACTIONS_PATH && routes::action_detail_id(current).is_some());
            let text = if collapsed {
                route.icon.glyph().to_string()
            } else {
                format!("{} {}", route.icon.glyph(), route.title)
            };
            let style = if is_current {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(text)).style(style)
        })
        .collect();

    let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
    if !collapsed {
        block = block.title("Menú");
    }

    let mut list = List::new(items).block(block);
    if app.focus == Focus::Sidebar {
        list = list
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(if collapsed { "" } else { "> " });
    }

    let mut state = ListState::default();
    state.select(Some(app.sidebar.selected_index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_content(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Content {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let view = ContentView::for_path(app.current_path());
    let title = match (&view, app.tabs.active()) {
        (ContentView::NotFound, _) | (_, None) => "No encontrado".to_string(),
        (_, Some(tab)) => tab.title.clone(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if let ContentView::ActionDetail(id) = &view {
        draw_action_detail(f, area, block, app, id);
        return;
    }

    let lines = match view {
        ContentView::Home => home_lines(app),
        ContentView::Actions => actions_lines(app),
        ContentView::Centres => endpoint_lines(app, EndpointKind::Centres, "Centros"),
        ContentView::Users => endpoint_lines(app, EndpointKind::Users, "Usuarios"),
        ContentView::Reports => vec![
            Line::from(""),
            heading("INFORMES"),
            Line::from(""),
            Line::from(Span::styled(" (Sin informes disponibles)", label_style())),
        ],
        ContentView::Settings => settings_lines(app),
        ContentView::NotFound | ContentView::ActionDetail(_) => not_found_lines(app),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn home_lines(app: &App) -> Vec<Line<'static>> {
    let sidebar = if app.sidebar.is_collapsed() {
        "contraída"
    } else {
        "expandida"
    };
    vec![
        Line::from(""),
        heading("PANEL DE ACCIONES CORRECTIVAS"),
        Line::from(""),
        field("Pestañas", app.tabs.tabs().len().to_string()),
        field("Lateral", sidebar),
        field("API", app.api.base_url.clone()),
        field("Clasific.", app.classifications.len().to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Pulsa "),
            Span::styled(":", Style::default().fg(Color::Yellow)),
            Span::raw(" para comandos, "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" para ayuda"),
        ]),
    ]
}

fn actions_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        heading("ACCIONES CORRECTIVAS"),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Abre una acción con "),
            Span::styled(":action <id>", Style::default().fg(Color::Green)),
        ]),
        field("Endpoint", app.api.endpoint_url(EndpointKind::Actions)),
    ];

    if !app.classifications.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Clasificadas"));
        for (id, selection) in &app.classifications {
            let mut spans = vec![Span::styled(format!("  #{:<6}", id), label_style())];
            spans.extend(badge_spans(&selection.badges()));
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    lines.push(heading("Tipos"));
    for action_type in TAXONOMY {
        let badge = Badge {
            text: action_type.label.to_string(),
            variant: variant_for(action_type.code),
        };
        let mut spans = vec![Span::styled(
            format!("  {:<14}", action_type.code),
            Style::default().fg(Color::Yellow),
        )];
        spans.extend(badge_spans(std::slice::from_ref(&badge)));
        let categories: Vec<&str> = action_type.categories.iter().map(|c| c.id).collect();
        if !categories.is_empty() {
            spans.push(Span::styled(
                format!("  {}", categories.join(", ")),
                label_style(),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_action_detail(f: &mut Frame, area: Rect, block: Block, app: &App, id: &str) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(heading(&format!("ACCIÓN #{}", id))),
        chunks[0],
    );

    let badges = app.current_badges();
    if badges.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(" Sin clasificar", label_style())),
            chunks[1],
        );
    } else {
        let row = Rect {
            x: chunks[1].x.saturating_add(1),
            width: chunks[1].width.saturating_sub(1),
            ..chunks[1]
        };
        f.render_widget(BadgeRow::new(&badges), row);
    }

    let lines = vec![
        Line::from(""),
        field(
            "Recurso",
            format!("{}/{}", app.api.endpoint_url(EndpointKind::Actions), id),
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Clasifica con "),
            Span::styled(
                ":classify <tipo> [categoría] [subcategoría]",
                Style::default().fg(Color::Green),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[2]);
}

fn probe_line(report: Option<&ProbeReport>) -> Line<'static> {
    match report {
        Some(report) => {
            let (mark, color, text) = if report.reachable {
                ("●", Color::Green, "accesible")
            } else {
                ("●", Color::Red, "sin respuesta")
            };
            Line::from(vec![
                Span::styled(format!(" {:<10}", "Estado"), label_style()),
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(format!(" {}  ", text)),
                Span::styled(
                    report.checked_at.format("%H:%M:%S").to_string(),
                    label_style(),
                ),
            ])
        }
        None => Line::from(vec![
            Span::styled(format!(" {:<10}", "Estado"), label_style()),
            Span::styled("sin comprobar (p)", label_style()),
        ]),
    }
}

fn endpoint_lines(app: &App, kind: EndpointKind, title: &str) -> Vec<Line<'static>> {
    let report = app.probe_results.iter().find(|r| r.target == kind.name());
    vec![
        Line::from(""),
        heading(&title.to_uppercase()),
        Line::from(""),
        field("Endpoint", app.api.endpoint_url(kind)),
        probe_line(report),
    ]
}

fn settings_lines(app: &App) -> Vec<Line<'static>> {
    let api = &app.api;
    let mut lines = vec![
        Line::from(""),
        heading("API"),
        Line::from(""),
        field("Base URL", api.base_url.clone()),
        field("Timeout", format!("{} ms", api.timeout)),
        field("Reintentos", api.retries.to_string()),
        Line::from(""),
        heading("Endpoints"),
    ];
    for kind in EndpointKind::ALL {
        lines.push(field(kind.name(), api.endpoint(kind).to_string()));
    }

    lines.push(Line::from(""));
    lines.push(heading("Conectividad"));
    if app.probe_results.is_empty() {
        lines.push(Line::from(Span::styled(
            " Pulsa p o :probe para comprobar",
            label_style(),
        )));
    }
    for report in &app.probe_results {
        let color = if report.reachable {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<10}", report.target), label_style()),
            Span::styled("● ", Style::default().fg(color)),
            Span::raw(format!("{}  ", report.url)),
            Span::styled(
                report.checked_at.format("%H:%M:%S").to_string(),
                label_style(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" :set base-url|timeout|retries|endpoint", Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(":reset-config", Style::default().fg(Color::Green)),
    ]));
    lines
}

fn not_found_lines(app: &App) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            " Página no encontrada",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", app.current_path()),
            label_style(),
        )),
    ]
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let focus = match app.focus {
        Focus::Sidebar => "menú",
        Focus::Content => "contenido",
        Focus::Command => "comando",
    };
    let line = Line::from(vec![
        Span::styled("Ruta ", label_style()),
        Span::raw(format!("{}  ", app.current_path())),
        Span::styled("Pestañas ", label_style()),
        Span::raw(format!("{}  ", app.tabs.tabs().len())),
        Span::styled("Foco ", label_style()),
        Span::raw(focus),
    ]);

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("go", "Ir a una ruta"),
        ("action", "Abrir una acción"),
        ("back", "Volver atrás"),
        ("close", "Cerrar pestaña"),
        ("classify", "Clasificar la acción abierta"),
        ("set", "base-url | timeout | retries | endpoint"),
        ("reset-config", "Restablecer la configuración"),
        ("probe", "Comprobar conexión"),
        ("sidebar", "Mostrar/ocultar menú"),
        ("quit", "Salir"),
    ];

    commands
        .iter()
        .find(|(cmd, _)| cmd.starts_with(&input) || input.starts_with(cmd))
        .map(|(_, desc)| *desc)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint_text = command_hint(&app.command.input).unwrap_or("go | action | probe | set");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(format!("  {}", hint_text), label_style()),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", label_style()),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            } else {
                Line::from(Span::styled(
                    "Tab foco  [/] pestañas  x cerrar  Esc atrás  Ctrl-b menú  : comando  ? ayuda",
                    label_style(),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navegación"),
        Line::from("  Tab        Cambiar foco"),
        Line::from("  j / k      Mover en el menú"),
        Line::from("  Enter      Abrir entrada del menú"),
        Line::from("  [ / ]      Pestaña anterior/siguiente"),
        Line::from("  x          Cerrar pestaña"),
        Line::from("  Esc / ⌫    Volver atrás"),
        Line::from("  Ctrl-b     Mostrar/ocultar menú"),
        Line::from(""),
        Line::from("Acciones"),
        Line::from("  p          Comprobar conexión"),
        Line::from("  :          Modo comando"),
        Line::from("  ?          Ayuda"),
        Line::from("  q          Salir"),
        Line::from(""),
        Line::from("Comandos"),
        Line::from("  :go /reports"),
        Line::from("  :action 42"),
        Line::from("  :classify lopd brecha acceso"),
        Line::from("  :set timeout 5000"),
        Line::from("  :set endpoint users /v2/users"),
        Line::from("  :probe [url]"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Ayuda"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_content_view_for_path() {
        assert_eq!(ContentView::for_path("/"), ContentView::Home);
        assert_eq!(ContentView::for_path("/settings"), ContentView::Settings);
        assert_eq!(
            ContentView::for_path("/actions/9"),
            ContentView::ActionDetail("9".to_string())
        );
        assert_eq!(ContentView::for_path("/actions/9/edit"), ContentView::NotFound);
    }

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("pro"), Some("Comprobar conexión"));
        assert_eq!(command_hint(""), None);
    }

    #[test]
    fn test_draw_every_route() {
        let mut app = App::new(LocalStore::open_in_memory().unwrap(), "/");
        app.mount(1280);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        for path in ["/", "/actions", "/actions/3", "/centres", "/users", "/reports", "/settings", "/nowhere"] {
            app.navigate(path);
            terminal.draw(|f| draw(f, &app)).unwrap();
        }
        app.help_open = true;
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
