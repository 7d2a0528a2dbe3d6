//! Command terminal panel: output log above a single prompt line.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};

use crate::terminal::CommandTerminal;
use crate::theme::ThemeColors;

const PROMPT: &str = "> ";

/// Widget that renders the command log and the input line.
pub struct CommandTerminalWidget<'a> {
    state: &'a CommandTerminal,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
    show_cursor: bool,
}

impl<'a> CommandTerminalWidget<'a> {
    pub fn new(state: &'a CommandTerminal, theme: &'a ThemeColors, show_cursor: bool) -> Self {
        Self {
            state,
            theme,
            block: None,
            show_cursor,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> Widget for CommandTerminalWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Last row is the prompt; everything above is log.
        let log_height = inner.height.saturating_sub(1) as usize;
        let log_style = Style::default().fg(self.theme.terminal_fg);
        for (i, text) in self.state.visible_lines(log_height).into_iter().enumerate() {
            let style = if text.starts_with(PROMPT) {
                log_style.add_modifier(Modifier::BOLD)
            } else {
                log_style
            };
            buf.set_line(
                inner.x,
                inner.y + i as u16,
                &Line::from(Span::styled(text, style)),
                inner.width,
            );
        }

        let prompt_y = inner.y + inner.height - 1;
        let mut spans = vec![
            Span::styled(
                PROMPT,
                Style::default()
                    .fg(self.theme.terminal_prompt_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.state.input.text.as_str(), log_style),
        ];
        if self.state.pending {
            spans.push(Span::styled(
                "  (running…)",
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        buf.set_line(inner.x, prompt_y, &Line::from(spans), inner.width);

        if self.state.scroll_offset > 0 {
            let marker = format!(" ↑{} ", self.state.scroll_offset);
            let x = inner.x + inner.width.saturating_sub(marker.chars().count() as u16);
            buf.set_string(x, inner.y, marker, Style::default().fg(self.theme.warning_fg));
        }

        if self.show_cursor {
            let input = &self.state.input;
            let column = PROMPT.len() + input.text[..input.cursor].chars().count();
            let cursor_x = inner.x + column as u16;
            if cursor_x < inner.x + inner.width {
                if let Some(cell) = buf.cell_mut((cursor_x, prompt_y)) {
                    cell.set_style(
                        Style::default()
                            .fg(self.theme.status_bg)
                            .bg(self.theme.border_focused_fg)
                            .add_modifier(Modifier::BOLD),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn test_log_above_prompt() {
        let mut state = CommandTerminal::default();
        state.push_line("> mkdisk -size=5");
        state.push_line("Disk created");
        state.input.insert_char('l');
        state.input.insert_char('s');
        let tc = theme::dark_theme();

        let widget = CommandTerminalWidget::new(&state, &tc, false);
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("> mkdisk -size=5"));
        assert!(row_text(&buf, 1).starts_with("Disk created"));
        assert!(row_text(&buf, 3).starts_with("> ls"));
    }

    #[test]
    fn test_log_keeps_newest_lines_visible() {
        let mut state = CommandTerminal::default();
        for i in 0..10 {
            state.push_line(format!("out {}", i));
        }
        let tc = theme::dark_theme();
        let widget = CommandTerminalWidget::new(&state, &tc, false);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("out 8"));
        assert!(row_text(&buf, 1).starts_with("out 9"));
    }

    #[test]
    fn test_pending_indicator() {
        let mut state = CommandTerminal::default();
        state.pending = true;
        let tc = theme::dark_theme();
        let widget = CommandTerminalWidget::new(&state, &tc, false);
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("running"));
    }

    #[test]
    fn test_cursor_cell_highlighted() {
        let mut state = CommandTerminal::default();
        state.input.insert_char('a');
        state.input.insert_char('b');
        state.input.move_left();
        let tc = theme::dark_theme();
        let widget = CommandTerminalWidget::new(&state, &tc, true);
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        // "> ab" with the cursor on 'b'.
        assert_eq!(buf.cell((3, 1)).unwrap().bg, tc.border_focused_fg);
    }

    #[test]
    fn test_zero_area_no_panic() {
        let state = CommandTerminal::default();
        let tc = theme::dark_theme();
        let widget = CommandTerminalWidget::new(&state, &tc, true);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
