//! Keyboard dispatch for the terminal loop

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus, InputMode};
use crate::core::Module;
use crate::modules::sidebar::is_toggle_shortcut;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global shortcut, handled ahead of every mode
    if is_toggle_shortcut(&key) {
        app.toggle_sidebar();
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(':') | KeyCode::Char('/') => app.enter_command(),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Char(']') => app.next_tab(),
        KeyCode::Char('[') => app.prev_tab(),
        KeyCode::Char('x') => app.close_active_tab(),
        KeyCode::Char('p') => app.request_probe(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),
        _ if app.focus == Focus::Sidebar => {
            let action = app.sidebar.handle_key(key, &mut app.ctx);
            app.apply_action(action);
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}
