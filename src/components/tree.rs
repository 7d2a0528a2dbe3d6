use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::explorer::model::NodeKind;
use crate::explorer::rows::TreeRow;
use crate::explorer::ExplorerView;
use crate::theme::ThemeColors;

/// Explorer tree widget: disks, partitions, directories and files drawn with
/// box-drawing connectors.
pub struct TreeWidget<'a> {
    view: &'a ExplorerView,
    theme: &'a ThemeColors,
    use_icons: bool,
    focused: bool,
    empty_message: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(view: &'a ExplorerView, theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            view,
            theme,
            use_icons,
            focused: false,
            empty_message: "",
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Highlight the cursor row (only when the panel has focus).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown when there are no rows.
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Build the indentation prefix for `rows[index]`.
    ///
    /// Each ancestor level gets a continuation bar unless that ancestor was
    /// the last of its siblings.
    fn build_prefix(rows: &[TreeRow], index: usize) -> String {
        let row = &rows[index];
        if row.depth == 0 {
            return String::new();
        }

        let mut prefix = String::new();
        for d in 1..row.depth {
            let mut ancestor_is_last = false;
            for earlier in rows[..index].iter().rev() {
                if earlier.depth == d {
                    ancestor_is_last = earlier.is_last_sibling;
                    break;
                }
                if earlier.depth < d {
                    break;
                }
            }
            prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
        }
        prefix.push_str(if row.is_last_sibling { "└──" } else { "├──" });
        prefix
    }

    fn row_indicator(&self, row: &TreeRow) -> &'static str {
        if self.use_icons {
            match row.kind {
                NodeKind::Disk => "\u{f0a0} ",
                NodeKind::Partition => "\u{f1c0} ",
                NodeKind::Directory if row.is_expanded => "\u{f07c} ",
                NodeKind::Directory => "\u{f07b} ",
                NodeKind::File => "\u{f15c} ",
            }
        } else {
            match row.kind {
                NodeKind::Disk => "[D] ",
                NodeKind::Partition => "[P] ",
                NodeKind::Directory if row.is_expanded => "[-] ",
                NodeKind::Directory => "[+] ",
                NodeKind::File => "[F] ",
            }
        }
    }

    fn row_style(&self, row: &TreeRow, is_cursor: bool) -> Style {
        let base = match row.kind {
            NodeKind::Disk => Style::default()
                .fg(self.theme.disk_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::Partition => Style::default().fg(self.theme.partition_fg),
            NodeKind::Directory => Style::default()
                .fg(self.theme.dir_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::File => Style::default().fg(self.theme.file_fg),
        };
        let base = if row.is_selected {
            base.bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            base
        };
        match (is_cursor, row.is_selected) {
            (true, true) => base.add_modifier(Modifier::UNDERLINED),
            (true, false) => base.bg(self.theme.tree_cursor_bg),
            _ => base,
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = &self.view.rows;
        let visible_height = inner_area.height as usize;
        if visible_height == 0 || inner_area.width == 0 {
            return;
        }

        if rows.is_empty() {
            let line = Line::from(Span::styled(
                self.empty_message,
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
            return;
        }

        let visible = rows
            .iter()
            .enumerate()
            .skip(self.view.scroll_offset)
            .take(visible_height);

        for (i, (idx, row)) in visible.enumerate() {
            let y = inner_area.y + i as u16;
            let is_cursor = self.focused && idx == self.view.cursor;

            let mut spans = vec![
                Span::styled(
                    Self::build_prefix(rows, idx),
                    Style::default().fg(self.theme.dim_fg),
                ),
                Span::styled(
                    format!("{}{}", self.row_indicator(row), row.name),
                    self.row_style(row, is_cursor),
                ),
            ];
            if let Some(info) = &row.info {
                spans.push(Span::styled(
                    format!("  {}", info),
                    Style::default().fg(self.theme.info_fg),
                ));
            }
            buf.set_line(inner_area.x, y, &Line::from(spans), inner_area.width);
        }
    }
}
