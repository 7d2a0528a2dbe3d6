use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, Focus, LoadState};
use crate::components::detail::DetailWidget;
use crate::components::help::HelpOverlay;
use crate::components::status_bar::StatusBarWidget;
use crate::components::terminal::CommandTerminalWidget;
use crate::components::tree::TreeWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let terminal_pct = app.terminal_height_percent;
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100 - terminal_pct),
            Constraint::Percentage(terminal_pct),
            Constraint::Length(1),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[0]);

    let theme = &app.theme;
    let border = |focused: bool| {
        let fg = if focused {
            theme.border_focused_fg
        } else {
            theme.border_fg
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fg))
    };

    // Tree: record the inner area for mouse hit-testing, then keep the
    // cursor in view.
    let tree_block = border(app.focus == Focus::Explorer).title(" Disks ");
    let tree_inner = tree_block.inner(top[0]);
    app.tree_area = tree_inner;
    app.terminal_area = outer[1];
    app.explorer.update_scroll(tree_inner.height as usize);

    let empty_message = match &app.load_state {
        LoadState::Loading => "Loading disks…",
        LoadState::Loaded => "No disks. Create one with mkdisk in the terminal.",
        LoadState::Failed(_) => "Could not load disks. Press R to retry.",
    };
    let tree = TreeWidget::new(&app.explorer, theme, app.use_icons)
        .focused(app.focus == Focus::Explorer)
        .empty_message(empty_message)
        .block(tree_block);
    frame.render_widget(tree, top[0]);

    let detail = app.explorer.detail();
    let detail_block = border(false).title(format!(" {} ", detail.title()));
    frame.render_widget(
        DetailWidget::new(&detail, theme)
            .scroll(app.explorer.detail_scroll)
            .block(detail_block),
        top[1],
    );

    let terminal_block = border(app.focus == Focus::Terminal).title(" Terminal ");
    frame.render_widget(
        CommandTerminalWidget::new(&app.terminal, theme, app.focus == Focus::Terminal)
            .block(terminal_block),
        outer[1],
    );

    let selection = app
        .explorer
        .selection
        .current()
        .map(|s| s.path.to_string())
        .unwrap_or_default();
    let mut status = StatusBarWidget::new(&app.server_url, &app.load_state, app.focus, theme)
        .selection(&selection);
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, outer[2]);

    if app.show_help {
        frame.render_widget(HelpOverlay::new(theme, app.help_scroll), area);
    }
}
