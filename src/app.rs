use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::explorer::model::Snapshot;
use crate::explorer::path::ExplorerPath;
use crate::explorer::ExplorerView;
use crate::remote::Request;
use crate::terminal::{CommandTerminal, Submission};
use crate::theme::{resolve_theme, ThemeColors};

/// How long a status notice stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Which panel receives key input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Explorer,
    Terminal,
}

/// Where the disk snapshot stands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// A transient status bar notice.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
pub struct App {
    pub explorer: ExplorerView,
    pub terminal: CommandTerminal,
    pub focus: Focus,
    pub load_state: LoadState,
    /// A `getfs` fetch has been dispatched and not answered yet.
    pub fetch_in_flight: bool,
    pub status_message: Option<StatusMessage>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: ThemeColors,
    pub use_icons: bool,
    pub terminal_height_percent: u16,
    /// Inner area of the tree panel from the last draw, for mouse hit-testing.
    pub tree_area: Rect,
    /// Area of the terminal panel from the last draw.
    pub terminal_area: Rect,
    pub server_url: String,
    /// Node to open and select once the next snapshot arrives (`--select`).
    pub reveal_on_load: Option<ExplorerPath>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            explorer: ExplorerView::default(),
            terminal: CommandTerminal::new(config.terminal_max_lines()),
            focus: Focus::Explorer,
            load_state: LoadState::Loading,
            fetch_in_flight: false,
            status_message: None,
            show_help: false,
            help_scroll: 0,
            theme: resolve_theme(&config.theme),
            use_icons: config.use_icons(),
            terminal_height_percent: config.terminal_height_percent(),
            tree_area: Rect::default(),
            terminal_area: Rect::default(),
            server_url: config.server_url().to_string(),
            reveal_on_load: None,
            should_quit: false,
        }
    }

    /// Start a snapshot fetch unless one is already running.
    pub fn request_reload(&mut self) -> Option<Request> {
        if self.fetch_in_flight {
            self.set_status_message("Refresh already in progress".to_string());
            return None;
        }
        self.fetch_in_flight = true;
        self.load_state = LoadState::Loading;
        Some(Request::FetchSnapshot)
    }

    /// Replace the view with a fresh one over the fetched snapshot. A failed
    /// fetch leaves an empty tree and an error notice.
    pub fn handle_snapshot_loaded(&mut self, result: Result<Snapshot>) {
        self.fetch_in_flight = false;
        match result {
            Ok(snapshot) => {
                let disks = snapshot.disks().len();
                let empty = snapshot.is_empty();
                tracing::info!(disks, nodes = snapshot.node_count(), "snapshot loaded");
                self.explorer = ExplorerView::new(snapshot);
                self.load_state = LoadState::Loaded;
                if empty {
                    self.set_status_message("Server has no disks yet".to_string());
                } else {
                    self.set_status_message(format!("Loaded {} disk(s)", disks));
                }
                if let Some(path) = self.reveal_on_load.take() {
                    if let Err(e) = self.explorer.reveal(&path) {
                        tracing::warn!(%path, error = %e, "cannot reveal path");
                        self.set_error_message(format!("No node at {}", path));
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "snapshot load failed");
                self.explorer = ExplorerView::default();
                self.load_state = LoadState::Failed(e.to_string());
                self.set_error_message(load_error_notice(&e));
            }
        }
    }

    /// Enter on the terminal input line.
    pub fn submit_command(&mut self) -> Option<Request> {
        match self.terminal.submit() {
            Submission::Execute(command) => Some(Request::Execute(command)),
            Submission::Busy => {
                self.set_status_message("A command is still running".to_string());
                None
            }
            Submission::Cleared | Submission::Ignored => None,
        }
    }

    pub fn handle_command_finished(&mut self, command: &str, result: Result<String>) {
        match &result {
            Ok(output) => tracing::debug!(command, bytes = output.len(), "command finished"),
            Err(e) => tracing::warn!(command, error = %e, "command failed"),
        }
        self.terminal.finish(&result);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Explorer => Focus::Terminal,
            Focus::Terminal => Focus::Explorer,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll = 0;
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    pub fn set_error_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message once it has been displayed for `STATUS_TTL`.
    pub fn clear_expired_status(&mut self) {
        if let Some(msg) = &self.status_message {
            if msg.created.elapsed() > STATUS_TTL {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn load_error_notice(err: &AppError) -> String {
    match err {
        AppError::Transport(_) => "Could not reach the server; press R to retry".to_string(),
        AppError::MalformedSnapshot(_) => "Server sent an unreadable disk list".to_string(),
        other => format!("Load failed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::model::fixtures;
    use crate::terminal::EXECUTE_ERROR_LINE;

    fn setup_app() -> App {
        App::new(&AppConfig::default())
    }

    fn loaded_app() -> App {
        let mut app = setup_app();
        let req = app.request_reload();
        assert_eq!(req, Some(Request::FetchSnapshot));
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        app
    }

    #[test]
    fn new_app_waits_for_snapshot() {
        let app = setup_app();
        assert_eq!(app.load_state, LoadState::Loading);
        assert!(app.explorer.rows.is_empty());
        assert_eq!(app.focus, Focus::Explorer);
        assert_eq!(app.server_url, "http://localhost:8000");
    }

    #[test]
    fn only_one_fetch_in_flight() {
        let mut app = setup_app();
        assert!(app.request_reload().is_some());
        assert!(app.request_reload().is_none());
        assert!(app.status_message.is_some());
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        assert!(!app.fetch_in_flight);
        assert!(app.request_reload().is_some());
    }

    #[test]
    fn loaded_snapshot_builds_rows() {
        let app = loaded_app();
        assert_eq!(app.load_state, LoadState::Loaded);
        assert_eq!(app.explorer.rows.len(), 2);
        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "Loaded 2 disk(s)");
        assert!(!msg.is_error);
    }

    #[test]
    fn failed_load_leaves_empty_tree_and_error_notice() {
        let mut app = loaded_app();
        app.request_reload();
        app.handle_snapshot_loaded(Err(AppError::Transport("refused".into())));
        assert!(app.explorer.rows.is_empty());
        assert!(matches!(app.load_state, LoadState::Failed(_)));
        let msg = app.status_message.as_ref().unwrap();
        assert!(msg.is_error);
        assert!(msg.text.contains("R to retry"));
    }

    #[test]
    fn malformed_snapshot_notice() {
        let mut app = setup_app();
        app.request_reload();
        app.handle_snapshot_loaded(Err(AppError::MalformedSnapshot("eof".into())));
        assert_eq!(
            app.status_message.as_ref().unwrap().text,
            "Server sent an unreadable disk list"
        );
    }

    #[test]
    fn reload_gives_fresh_view() {
        let mut app = loaded_app();
        app.explorer.activate(0);
        assert!(app.explorer.selection.current().is_some());
        app.request_reload();
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        assert!(app.explorer.selection.current().is_none());
        assert_eq!(app.explorer.expansion.len(), 0);
    }

    #[test]
    fn first_load_reveals_requested_path_once() {
        let mut app = setup_app();
        app.reveal_on_load = Some(ExplorerPath::parse("disk-0/partition-0/%2F/home").unwrap());
        app.request_reload();
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        let current = app.explorer.selection.current().unwrap();
        assert_eq!(current.path.to_string(), "disk-0/partition-0/%2F/home");
        assert_eq!(app.explorer.rows[app.explorer.cursor].name, "home");
        assert!(app.reveal_on_load.is_none());

        app.request_reload();
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        assert!(app.explorer.selection.current().is_none());
    }

    #[test]
    fn reveal_of_unknown_path_posts_error() {
        let mut app = setup_app();
        app.reveal_on_load = Some(ExplorerPath::disk(9));
        app.request_reload();
        app.handle_snapshot_loaded(Ok(fixtures::nested()));
        let msg = app.status_message.as_ref().unwrap();
        assert!(msg.is_error);
        assert_eq!(msg.text, "No node at disk-9");
        assert_eq!(app.explorer.rows.len(), 2);
    }

    #[test]
    fn submit_command_dispatches_and_reports() {
        let mut app = setup_app();
        for c in "mkdisk -size=3".chars() {
            app.terminal.input.insert_char(c);
        }
        assert_eq!(
            app.submit_command(),
            Some(Request::Execute("mkdisk -size=3".into()))
        );
        app.handle_command_finished("mkdisk -size=3", Ok("Disk created\n".into()));
        let lines: Vec<&str> = app.terminal.lines().collect();
        assert_eq!(lines, vec!["> mkdisk -size=3", "Disk created"]);
    }

    #[test]
    fn busy_terminal_sets_notice() {
        let mut app = setup_app();
        app.terminal.input.insert_char('a');
        app.submit_command();
        app.terminal.input.insert_char('b');
        assert_eq!(app.submit_command(), None);
        assert_eq!(
            app.status_message.as_ref().unwrap().text,
            "A command is still running"
        );
    }

    #[test]
    fn failed_command_appends_error_line() {
        let mut app = setup_app();
        app.terminal.input.insert_char('x');
        app.submit_command();
        app.handle_command_finished("x", Err(AppError::Transport("down".into())));
        assert_eq!(app.terminal.lines().last(), Some(EXECUTE_ERROR_LINE));
    }

    #[test]
    fn toggle_focus_cycles() {
        let mut app = setup_app();
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Terminal);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Explorer);
    }

    #[test]
    fn clear_expired_status_keeps_recent() {
        let mut app = setup_app();
        app.set_status_message("fresh".to_string());
        app.clear_expired_status();
        assert!(app.status_message.is_some());
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let mut app = setup_app();
        app.status_message = Some(StatusMessage {
            text: "old".to_string(),
            is_error: false,
            created: Instant::now() - Duration::from_secs(5),
        });
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = setup_app();
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }
}
