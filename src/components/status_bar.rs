use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::{Focus, LoadState};
use crate::theme::ThemeColors;

const EXPLORER_HINTS: &str = " ⏎:open  l/h:expand/collapse  R:reload  Tab:terminal  ?:help ";
const TERMINAL_HINTS: &str = " ⏎:run  ↑/↓:history  PgUp/PgDn:scroll  Tab/Esc:explorer ";

/// Status bar: server and load state on the left, the selected path, and key
/// hints for the focused panel. A transient notice replaces the whole bar.
pub struct StatusBarWidget<'a> {
    server: &'a str,
    load_state: &'a LoadState,
    selection: &'a str,
    focus: Focus,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(
        server: &'a str,
        load_state: &'a LoadState,
        focus: Focus,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            server,
            load_state,
            selection: "",
            focus,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    /// Display form of the selected node's path.
    pub fn selection(mut self, selection: &'a str) -> Self {
        self.selection = selection;
        self
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    fn load_span(&self) -> Span<'static> {
        match self.load_state {
            LoadState::Loading => Span::styled(
                "◌ loading",
                Style::default().fg(self.theme.warning_fg),
            ),
            LoadState::Loaded => {
                Span::styled("● online", Style::default().fg(self.theme.success_fg))
            }
            LoadState::Failed(_) => Span::styled(
                "✕ offline",
                Style::default()
                    .fg(self.theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Keep at most `width` characters, marking a cut with a leading ellipsis.
fn truncate_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("…{}", tail)
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        buf.set_style(area, Style::default().bg(self.theme.status_bg));

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };
            let display = format!("{:<width$}", msg, width = width);
            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        let hints = match self.focus {
            Focus::Explorer => EXPLORER_HINTS,
            Focus::Terminal => TERMINAL_HINTS,
        };
        let hints_len = hints.chars().count();

        let load = self.load_span();
        let left = format!(" {} ", self.server);
        let used = left.chars().count() + load.content.chars().count() + 2;
        let path_budget = width.saturating_sub(used + hints_len);
        let path = truncate_left(self.selection, path_budget);

        let mut spans = vec![
            Span::styled(left, Style::default().fg(self.theme.status_fg)),
            load,
            Span::raw("  "),
            Span::styled(
                path,
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = width.saturating_sub(used).saturating_sub(hints_len);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(
            hints,
            Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::DIM),
        ));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn render_line(widget: StatusBarWidget, width: u16) -> (Buffer, String) {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let content: String = (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        (buf, content)
    }

    #[test]
    fn test_normal_bar_rendering() {
        let tc = theme::dark_theme();
        let state = LoadState::Loaded;
        let widget = StatusBarWidget::new("http://localhost:8000", &state, Focus::Explorer, &tc)
            .selection("disk-0/partition-1");
        let (_, content) = render_line(widget, 140);
        assert!(content.contains("http://localhost:8000"));
        assert!(content.contains("online"));
        assert!(content.contains("disk-0/partition-1"));
        assert!(content.contains("R:reload"));
    }

    #[test]
    fn test_hints_follow_focus() {
        let tc = theme::dark_theme();
        let state = LoadState::Loading;
        let widget = StatusBarWidget::new("http://sim", &state, Focus::Terminal, &tc);
        let (_, content) = render_line(widget, 120);
        assert!(content.contains("history"));
        assert!(content.contains("loading"));
        assert!(!content.contains("R:reload"));
    }

    #[test]
    fn test_failed_state_shows_offline() {
        let tc = theme::dark_theme();
        let state = LoadState::Failed("refused".into());
        let widget = StatusBarWidget::new("http://sim", &state, Focus::Explorer, &tc);
        let (_, content) = render_line(widget, 120);
        assert!(content.contains("offline"));
    }

    #[test]
    fn test_status_message_error() {
        let tc = theme::dark_theme();
        let state = LoadState::Loaded;
        let widget = StatusBarWidget::new("http://sim", &state, Focus::Explorer, &tc)
            .status_message("Could not reach the server", true);
        let (buf, content) = render_line(widget, 80);
        assert!(content.contains("Could not reach the server"));
        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.bg, tc.error_fg);
        assert_eq!(cell.fg, tc.status_fg);
    }

    #[test]
    fn test_status_message_success() {
        let tc = theme::dark_theme();
        let state = LoadState::Loaded;
        let widget = StatusBarWidget::new("http://sim", &state, Focus::Explorer, &tc)
            .status_message("Loaded 2 disk(s)", false);
        let (buf, content) = render_line(widget, 80);
        assert!(content.contains("Loaded 2 disk(s)"));
        assert_eq!(buf.cell((0, 0)).unwrap().fg, tc.success_fg);
    }

    #[test]
    fn test_truncate_left() {
        assert_eq!(truncate_left("abcdef", 10), "abcdef");
        assert_eq!(truncate_left("abcdef", 4), "…def");
        assert_eq!(truncate_left("abcdef", 0), "");
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let state = LoadState::Loaded;
        let widget = StatusBarWidget::new("http://sim", &state, Focus::Explorer, &tc);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
