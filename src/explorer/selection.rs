use crate::explorer::model::NodeKind;
use crate::explorer::path::ExplorerPath;

/// The node the detail panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: NodeKind,
    pub path: ExplorerPath,
}

/// At most one current selection. Hiding the selected row (by collapsing an
/// ancestor) does not clear it; only a new selection or a fresh view does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    /// Replace the current selection unconditionally.
    pub fn select(&mut self, kind: NodeKind, path: ExplorerPath) {
        self.current = Some(Selection { kind, path });
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, path: &ExplorerPath) -> bool {
        self.current.as_ref().is_some_and(|s| &s.path == path)
    }
}
