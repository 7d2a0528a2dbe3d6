//! Explorer view state: the loaded snapshot plus the overlay state the user
//! builds on top of it (expanded paths, the selection, the row cursor).

pub mod detail;
pub mod expansion;
pub mod model;
pub mod path;
pub mod rows;
pub mod selection;

use crate::explorer::detail::{describe, Detail};
use crate::explorer::expansion::ExpansionState;
use crate::explorer::model::Snapshot;
use crate::error::Result;
use crate::explorer::path::{resolve, ExplorerPath};
use crate::explorer::rows::{project_rows, TreeRow};
use crate::explorer::selection::SelectionState;

/// Sole owner of the snapshot and its overlay state for one view.
#[derive(Debug, Default)]
pub struct ExplorerView {
    snapshot: Snapshot,
    pub expansion: ExpansionState,
    pub selection: SelectionState,
    /// Visible rows, recomputed after every state change.
    pub rows: Vec<TreeRow>,
    /// Keyboard cursor into `rows`. Independent of the selection.
    pub cursor: usize,
    pub scroll_offset: usize,
    /// First visible line of the detail panel. Reset when the selection moves.
    pub detail_scroll: usize,
}

impl ExplorerView {
    /// A fresh view over `snapshot`: everything collapsed, nothing selected.
    pub fn new(snapshot: Snapshot) -> Self {
        let mut view = Self {
            snapshot,
            ..Self::default()
        };
        view.reproject();
        view
    }

    /// Rebuild `rows` from the current state and clamp the cursor.
    pub fn reproject(&mut self) {
        self.rows = project_rows(&self.snapshot, &self.expansion, &self.selection);
        if self.rows.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
    }

    /// Click on the row at `index`: select it, and toggle it unless it is a file.
    pub fn activate(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let kind = row.kind;
        let path = row.path.clone();
        self.cursor = index;
        if !self.selection.is_selected(&path) {
            self.detail_scroll = 0;
        }
        if kind.is_expandable() {
            let expanded = self.expansion.toggle(&path);
            tracing::debug!(%path, expanded, total = self.expansion.len(), "toggled");
        }
        self.selection.select(kind, path);
        self.reproject();
    }

    /// Activate the row under the cursor.
    pub fn activate_cursor(&mut self) {
        self.activate(self.cursor);
    }

    /// Expand the row under the cursor if it is collapsed.
    pub fn expand_cursor(&mut self) {
        if let Some(row) = self.rows.get(self.cursor) {
            if row.kind.is_expandable() && !row.is_expanded {
                let path = row.path.clone();
                self.expansion.toggle(&path);
                self.reproject();
            }
        }
    }

    /// Collapse the row under the cursor, or move to its parent row when it
    /// is already collapsed (or a file).
    pub fn collapse_cursor(&mut self) {
        let Some(row) = self.rows.get(self.cursor) else {
            return;
        };
        if row.is_expanded {
            let path = row.path.clone();
            self.expansion.toggle(&path);
            self.reproject();
            return;
        }
        if let Some(parent) = row.path.parent() {
            if let Some(index) = self.find_row(&parent) {
                self.cursor = index;
            }
        }
    }

    /// Expand every ancestor of `path`, select it and put the cursor on it.
    pub fn reveal(&mut self, path: &ExplorerPath) -> Result<()> {
        let kind = resolve(path, &self.snapshot)?.kind();
        let mut ancestor = path.parent();
        while let Some(current) = ancestor {
            if !self.expansion.is_expanded(&current) {
                self.expansion.toggle(&current);
            }
            ancestor = current.parent();
        }
        if !self.selection.is_selected(path) {
            self.detail_scroll = 0;
        }
        self.selection.select(kind, path.clone());
        self.reproject();
        if let Some(index) = self.find_row(path) {
            self.cursor = index;
        }
        Ok(())
    }

    pub fn find_row(&self, path: &ExplorerPath) -> Option<usize> {
        self.rows.iter().position(|row| &row.path == path)
    }

    /// Move the cursor down by one row.
    pub fn select_next(&mut self) {
        let len = self.rows.len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    /// Move the cursor up by one row.
    pub fn select_previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = self.rows.len() - 1;
        }
    }

    /// Update the scroll offset to keep the cursor visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor - visible_height + 1;
        }
    }

    /// Row index displayed at line `line` of the viewport, if any.
    pub fn row_at_line(&self, line: usize) -> Option<usize> {
        let index = self.scroll_offset + line;
        (index < self.rows.len()).then_some(index)
    }

    /// Scroll the detail panel down, stopping at its last line.
    pub fn scroll_detail_down(&mut self, amount: usize) {
        let last = self.detail().lines().len().saturating_sub(1);
        self.detail_scroll = (self.detail_scroll + amount).min(last);
    }

    pub fn scroll_detail_up(&mut self, amount: usize) {
        self.detail_scroll = self.detail_scroll.saturating_sub(amount);
    }

    /// Detail panel content for the current selection.
    pub fn detail(&self) -> Detail {
        describe(&self.selection, &self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::detail::EMPTY_FILE_TEXT;
    use crate::explorer::model::{fixtures, NodeKind};

    fn names(view: &ExplorerView) -> Vec<&str> {
        view.rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn activate_named(view: &mut ExplorerView, name: &str) {
        let index = view
            .rows
            .iter()
            .position(|r| r.name == name)
            .unwrap_or_else(|| panic!("no row named {}", name));
        view.activate(index);
    }

    #[test]
    fn new_view_is_collapsed_and_unselected() {
        let view = ExplorerView::new(fixtures::nested());
        assert_eq!(names(&view), vec!["d1.smia", "d2.smia"]);
        assert!(view.selection.current().is_none());
        assert_eq!(view.detail(), Detail::Placeholder);
    }

    #[test]
    fn empty_view_has_no_rows() {
        let mut view = ExplorerView::default();
        assert!(view.rows.is_empty());
        view.activate_cursor();
        view.select_next();
        view.collapse_cursor();
        assert_eq!(view.cursor, 0);
        assert_eq!(view.detail(), Detail::Placeholder);
    }

    #[test]
    fn scenario_expand_to_file_and_show_lines() {
        let mut view = ExplorerView::new(fixtures::single_file());
        assert_eq!(view.rows[0].info.as_deref(), Some("10 MB"));

        activate_named(&mut view, "d1.smia");
        activate_named(&mut view, "Part1");
        activate_named(&mut view, "/");
        activate_named(&mut view, "a.txt");

        assert_eq!(names(&view), vec!["d1.smia", "Part1", "/", "a.txt"]);
        assert_eq!(view.detail().lines(), vec!["hello".to_string(), "world".to_string()]);
        assert!(view.rows[3].is_selected);
    }

    #[test]
    fn activating_file_selects_without_toggling() {
        let mut view = ExplorerView::new(fixtures::single_file());
        activate_named(&mut view, "d1.smia");
        activate_named(&mut view, "Part1");
        activate_named(&mut view, "/");
        let expanded_before = view.expansion.len();
        activate_named(&mut view, "a.txt");
        activate_named(&mut view, "a.txt");
        assert_eq!(view.expansion.len(), expanded_before);
        assert_eq!(view.selection.current().unwrap().kind, NodeKind::File);
    }

    #[test]
    fn activating_directory_twice_collapses_but_keeps_selection() {
        let mut view = ExplorerView::new(fixtures::single_file());
        activate_named(&mut view, "d1.smia");
        activate_named(&mut view, "d1.smia");
        assert_eq!(names(&view), vec!["d1.smia"]);
        assert_eq!(view.selection.current().unwrap().path, ExplorerPath::disk(0));
    }

    #[test]
    fn collapsing_ancestor_keeps_hidden_selection() {
        let mut view = ExplorerView::new(fixtures::nested());
        activate_named(&mut view, "d1.smia");
        activate_named(&mut view, "Boot");
        activate_named(&mut view, "/");
        activate_named(&mut view, "zero.txt");
        let selected = view.selection.clone();

        // Collapse the disk with the keyboard so the selection is not replaced.
        view.cursor = 0;
        view.collapse_cursor();
        assert_eq!(names(&view), vec!["d1.smia", "d2.smia"]);
        assert_eq!(view.selection, selected);
        assert_eq!(view.detail().lines(), vec![EMPTY_FILE_TEXT.to_string()]);

        // Re-expanding restores the earlier shape.
        view.expand_cursor();
        assert!(names(&view).contains(&"zero.txt"));
    }

    #[test]
    fn expand_and_collapse_cursor() {
        let mut view = ExplorerView::new(fixtures::nested());
        view.expand_cursor();
        assert_eq!(names(&view), vec!["d1.smia", "Boot", "Logic", "d2.smia"]);
        view.expand_cursor();
        assert_eq!(view.rows.len(), 4);

        view.select_next();
        view.collapse_cursor();
        assert_eq!(view.cursor, 0, "collapsed partition moves to parent row");
        view.collapse_cursor();
        assert_eq!(names(&view), vec!["d1.smia", "d2.smia"]);
        assert!(view.selection.current().is_none());
    }

    #[test]
    fn cursor_movement_clamps() {
        let mut view = ExplorerView::new(fixtures::nested());
        view.select_previous();
        assert_eq!(view.cursor, 0);
        view.select_next();
        view.select_next();
        assert_eq!(view.cursor, 1);
        view.select_first();
        assert_eq!(view.cursor, 0);
        view.select_last();
        assert_eq!(view.cursor, 1);
    }

    #[test]
    fn cursor_clamped_after_rows_shrink() {
        let mut view = ExplorerView::new(fixtures::nested());
        view.expand_cursor();
        view.select_last();
        assert_eq!(view.cursor, 3);
        view.cursor = 0;
        view.expansion.toggle(&ExplorerPath::disk(0));
        view.cursor = 3;
        view.reproject();
        assert_eq!(view.cursor, 1);
    }

    #[test]
    fn update_scroll_keeps_cursor_visible() {
        let mut view = ExplorerView::new(fixtures::nested());
        view.expand_cursor();
        view.cursor = 3;
        view.update_scroll(2);
        assert_eq!(view.scroll_offset, 2);
        view.cursor = 0;
        view.update_scroll(2);
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn detail_scroll_clamps_and_resets_on_new_selection() {
        let mut view = ExplorerView::new(fixtures::nested());
        activate_named(&mut view, "d1.smia");
        let last = view.detail().lines().len() - 1;
        assert!(last > 0);

        view.scroll_detail_down(1000);
        assert_eq!(view.detail_scroll, last);
        view.scroll_detail_up(1);
        assert_eq!(view.detail_scroll, last - 1);

        // Re-activating the selected row collapses it but keeps the offset.
        activate_named(&mut view, "d1.smia");
        assert_eq!(view.detail_scroll, last - 1);

        activate_named(&mut view, "d2.smia");
        assert_eq!(view.detail_scroll, 0);
        view.scroll_detail_up(5);
        assert_eq!(view.detail_scroll, 0);
    }

    #[test]
    fn reveal_expands_ancestors_and_selects() {
        let mut view = ExplorerView::new(fixtures::nested());
        let path = ExplorerPath::parse("disk-0/partition-0/%2F/users.txt").unwrap();
        view.reveal(&path).unwrap();
        assert_eq!(
            names(&view),
            vec!["d1.smia", "Boot", "/", "home", "zero.txt", "users.txt", "Logic", "d2.smia"]
        );
        assert_eq!(view.cursor, 5);
        assert!(view.rows[5].is_selected);
        assert_eq!(view.selection.current().unwrap().kind, NodeKind::File);
    }

    #[test]
    fn reveal_of_missing_path_changes_nothing() {
        let mut view = ExplorerView::new(fixtures::nested());
        let path = ExplorerPath::disk(0).partition(0).child("/").child("nope");
        assert!(matches!(
            view.reveal(&path),
            Err(crate::error::AppError::NotFound(_))
        ));
        assert_eq!(names(&view), vec!["d1.smia", "d2.smia"]);
        assert!(view.selection.current().is_none());
    }

    #[test]
    fn row_at_line_accounts_for_scroll() {
        let mut view = ExplorerView::new(fixtures::nested());
        view.expand_cursor();
        view.scroll_offset = 1;
        assert_eq!(view.row_at_line(0), Some(1));
        assert_eq!(view.row_at_line(2), Some(3));
        assert_eq!(view.row_at_line(3), None);
    }
}
