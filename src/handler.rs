use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::app::{App, Focus};
use crate::components::help::HelpOverlay;
use crate::remote::Request;

/// Lines moved per PageUp/PageDown in the terminal and detail panels.
const PAGE_LINES: usize = 10;
/// Terminal lines moved per wheel notch.
const WHEEL_LINES: usize = 3;

/// Handle a key event. Returns work for the event loop to dispatch.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Request> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return None;
    }
    if app.show_help {
        handle_help_keys(app, key);
        return None;
    }
    match app.focus {
        Focus::Explorer => handle_explorer_keys(app, key),
        Focus::Terminal => handle_terminal_keys(app, key),
    }
}

fn handle_help_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => {
            let last = HelpOverlay::total_lines().saturating_sub(1);
            app.help_scroll = (app.help_scroll + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        _ => {}
    }
}

fn handle_explorer_keys(app: &mut App, key: KeyEvent) -> Option<Request> {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('R') | KeyCode::F(5) => return app.request_reload(),
        KeyCode::Char('j') | KeyCode::Down => app.explorer.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.explorer.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.explorer.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.explorer.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.explorer.activate_cursor(),
        KeyCode::Char('l') | KeyCode::Right => app.explorer.expand_cursor(),
        KeyCode::Char('h') | KeyCode::Left => app.explorer.collapse_cursor(),
        KeyCode::Char('J') => app.explorer.scroll_detail_down(1),
        KeyCode::Char('K') => app.explorer.scroll_detail_up(1),
        KeyCode::PageDown => app.explorer.scroll_detail_down(PAGE_LINES),
        KeyCode::PageUp => app.explorer.scroll_detail_up(PAGE_LINES),
        _ => {}
    }
    None
}

fn handle_terminal_keys(app: &mut App, key: KeyEvent) -> Option<Request> {
    match key.code {
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Esc => app.focus = Focus::Explorer,
        KeyCode::Enter => return app.submit_command(),
        KeyCode::Backspace => app.terminal.input.delete_char(),
        KeyCode::Delete => app.terminal.input.delete_forward(),
        KeyCode::Left => app.terminal.input.move_left(),
        KeyCode::Right => app.terminal.input.move_right(),
        KeyCode::Home => app.terminal.input.home(),
        KeyCode::End => app.terminal.input.end(),
        KeyCode::Up => app.terminal.input.history_previous(),
        KeyCode::Down => app.terminal.input.history_next(),
        KeyCode::PageUp => app.terminal.scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.terminal.scroll_down(PAGE_LINES),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.terminal.input.insert_char(c)
        }
        _ => {}
    }
    None
}

/// Handle a mouse event: left click on a tree row activates it, the wheel
/// moves the tree cursor or scrolls the terminal under the pointer.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(app.tree_area, pos) {
                app.focus = Focus::Explorer;
                let line = (pos.y - app.tree_area.y) as usize;
                if let Some(index) = app.explorer.row_at_line(line) {
                    app.explorer.activate(index);
                }
            } else if contains(app.terminal_area, pos) {
                app.focus = Focus::Terminal;
            }
        }
        MouseEventKind::ScrollUp => {
            if contains(app.terminal_area, pos) {
                app.terminal.scroll_up(WHEEL_LINES);
            } else {
                app.explorer.select_previous();
            }
        }
        MouseEventKind::ScrollDown => {
            if contains(app.terminal_area, pos) {
                app.terminal.scroll_down(WHEEL_LINES);
            } else {
                app.explorer.select_next();
            }
        }
        _ => {}
    }
}

fn contains(area: Rect, pos: Position) -> bool {
    area.width > 0 && area.height > 0 && area.contains(pos)
}
