use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::explorer::detail::{Detail, FileBody};
use crate::theme::ThemeColors;

/// Detail panel widget for the selected node.
pub struct DetailWidget<'a> {
    detail: &'a Detail,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
    scroll_offset: usize,
}

impl<'a> DetailWidget<'a> {
    pub fn new(detail: &'a Detail, theme: &'a ThemeColors) -> Self {
        Self {
            detail,
            theme,
            block: None,
            scroll_offset: 0,
        }
    }

    /// First body line to show.
    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn styled_line(&self, text: String) -> Line<'static> {
        // Field lines are "Label:     value"; files show raw content.
        let is_file = matches!(self.detail, Detail::File { .. });
        let is_indicator = matches!(
            self.detail,
            Detail::Placeholder
                | Detail::File {
                    body: FileBody::Empty | FileBody::NoContent,
                    ..
                }
        );
        if is_indicator {
            return Line::from(Span::styled(
                text,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        if !is_file {
            if let Some(colon) = text.find(':').filter(|_| !text.starts_with(' ')) {
                let (label, value) = text.split_at(colon + 1);
                return Line::from(vec![
                    Span::styled(
                        label.to_string(),
                        Style::default().fg(self.theme.detail_label_fg),
                    ),
                    Span::styled(value.to_string(), Style::default().fg(self.theme.detail_fg)),
                ]);
            }
        }
        Line::from(Span::styled(text, Style::default().fg(self.theme.detail_fg)))
    }
}

impl<'a> Widget for DetailWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.detail.lines();
        let start = self.scroll_offset.min(lines.len().saturating_sub(1));
        for (i, text) in lines
            .into_iter()
            .skip(start)
            .take(inner.height as usize)
            .enumerate()
        {
            let line = self.styled_line(text);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }

        if start > 0 {
            let marker = format!(" ↑{} ", start);
            let x = inner.x + inner.width.saturating_sub(marker.chars().count() as u16);
            buf.set_string(x, inner.y, marker, Style::default().fg(self.theme.warning_fg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::detail::PLACEHOLDER_TEXT;
    use crate::explorer::model::{FitStrategy, PartitionKind};
    use crate::theme;
    use ratatui::widgets::Borders;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_placeholder_inside_border() {
        let tc = theme::dark_theme();
        let detail = Detail::Placeholder;
        let widget = DetailWidget::new(&detail, &tc)
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 1).contains(PLACEHOLDER_TEXT));
        assert_eq!(buf.cell((1, 1)).unwrap().fg, tc.dim_fg);
    }

    #[test]
    fn test_partition_fields_use_label_color() {
        let tc = theme::dark_theme();
        let detail = Detail::Partition {
            name: "Part1".into(),
            kind: PartitionKind::Primary,
            size_bytes: 5 * 1024 * 1024,
            fit: FitStrategy::Worst,
            start_offset: 153,
            id: "341A".into(),
        };
        let widget = DetailWidget::new(&detail, &tc);
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("Name:       Part1"));
        assert!(row_text(&buf, 5).starts_with("ID:         341A"));
        assert_eq!(buf.cell((0, 0)).unwrap().fg, tc.detail_label_fg);
        assert_eq!(buf.cell((12, 0)).unwrap().fg, tc.detail_fg);
    }

    #[test]
    fn test_file_lines_render_verbatim() {
        let tc = theme::dark_theme();
        let detail = Detail::File {
            name: "a.txt".into(),
            body: FileBody::Lines(vec!["key: value".into(), "world".into()]),
        };
        let widget = DetailWidget::new(&detail, &tc);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("key: value"));
        assert_eq!(buf.cell((0, 0)).unwrap().fg, tc.detail_fg);
        assert!(row_text(&buf, 1).starts_with("world"));
    }

    #[test]
    fn test_lines_clipped_to_height() {
        let tc = theme::dark_theme();
        let detail = Detail::File {
            name: "big".into(),
            body: FileBody::Lines((0..10).map(|i| format!("line {}", i)).collect()),
        };
        let widget = DetailWidget::new(&detail, &tc);
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("line 1"));
    }

    #[test]
    fn test_scroll_reaches_last_line() {
        let tc = theme::dark_theme();
        let detail = Detail::File {
            name: "long".into(),
            body: FileBody::Lines((1..=30).map(|i| format!("line{}", i)).collect()),
        };
        let area = Rect::new(0, 0, 20, 10);

        let mut buf = Buffer::empty(area);
        DetailWidget::new(&detail, &tc).scroll(20).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("line21"));
        assert!(row_text(&buf, 9).starts_with("line30"));
        assert!(row_text(&buf, 0).contains("↑20"));

        let mut buf = Buffer::empty(area);
        DetailWidget::new(&detail, &tc).scroll(500).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("line30"));
    }

    #[test]
    fn test_zero_area_no_panic() {
        let tc = theme::dark_theme();
        let detail = Detail::Placeholder;
        let widget = DetailWidget::new(&detail, &tc);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
