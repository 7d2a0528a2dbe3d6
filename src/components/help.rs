use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::theme::ThemeColors;

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

macro_rules! keys {
    ($($key:expr => $desc:expr),* $(,)?) => {
        &[$(KeyEntry { key: $key, description: $desc }),*]
    };
}

const EXPLORER_KEYS: &[KeyEntry] = keys![
    "j / ↓" => "Move cursor down",
    "k / ↑" => "Move cursor up",
    "g / Home" => "First row",
    "G / End" => "Last row",
    "Enter / Space" => "Select row and toggle it open",
    "l / →" => "Expand",
    "h / ←" => "Collapse, or go to parent row",
    "J / K" => "Scroll details by one line",
    "PgUp / PgDn" => "Scroll details by a page",
    "R / F5" => "Reload disks from the server",
    "Click" => "Select and toggle the row",
];

const TERMINAL_KEYS: &[KeyEntry] = keys![
    "Enter" => "Run command",
    "↑ / ↓" => "Command history",
    "PgUp / PgDn" => "Scroll output",
    "clear / cls" => "Clear output",
    "Esc" => "Back to explorer",
];

const GENERAL_KEYS: &[KeyEntry] = keys![
    "Tab" => "Switch panel",
    "?" => "Toggle this help overlay",
    "q" => "Quit (explorer)",
    "Ctrl+C" => "Quit",
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Explorer",
        entries: EXPLORER_KEYS,
    },
    KeyCategory {
        name: "Terminal",
        entries: TERMINAL_KEYS,
    },
    KeyCategory {
        name: "General",
        entries: GENERAL_KEYS,
    },
];

/// Help overlay widget showing all keybindings.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            theme,
            scroll_offset,
        }
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(" Keybinding Reference ", heading)),
            Line::from(""),
        ];

        for category in CATEGORIES {
            lines.push(Line::from(vec![
                Span::styled(format!("── {} ", category.name), heading),
                Span::styled("─".repeat(30), Style::default().fg(self.theme.dim_fg)),
            ]));
            for entry in category.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<16}", entry.key),
                        Style::default()
                            .fg(self.theme.warning_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(entry.description, Style::default().fg(self.theme.tree_fg)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(self.theme.dim_fg),
        )));
        lines
    }

    /// Total number of content lines; the handler clamps the scroll to it.
    pub fn total_lines() -> usize {
        // title + blank, per category header + entries + blank, footer
        2 + CATEGORIES
            .iter()
            .map(|c| c.entries.len() + 2)
            .sum::<usize>()
            + 1
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_width = (area.width as f32 * 0.70).min(64.0) as u16;
        let overlay_height = (area.height as f32 * 0.80).min(40.0) as u16;
        let x = area.x + area.width.saturating_sub(overlay_width) / 2;
        let y = area.y + area.height.saturating_sub(overlay_height) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg))
            .style(Style::default().bg(self.theme.overlay_bg));
        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let content_lines = self.build_content_lines();
        let scroll = self
            .scroll_offset
            .min(content_lines.len().saturating_sub(1));
        for (i, line) in content_lines
            .iter()
            .skip(scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            buf.set_line(
                inner.x + 1,
                inner.y + i as u16,
                line,
                inner.width.saturating_sub(2),
            );
        }
    }
}
