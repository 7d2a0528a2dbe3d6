//! Projection of (snapshot, expansion, selection) into the visible tree rows.
//!
//! Only expanded nodes are descended into, so the cost is proportional to the
//! number of visible rows. Children keep the order they arrived in.

use crate::explorer::expansion::ExpansionState;
use crate::explorer::model::{format_size, Disk, FsNode, NodeKind, Partition, Snapshot};
use crate::explorer::path::ExplorerPath;
use crate::explorer::selection::SelectionState;

/// One visible line of the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: ExplorerPath,
    pub kind: NodeKind,
    pub depth: usize,
    pub name: String,
    /// Secondary text: size for disks, kind and size for partitions.
    pub info: Option<String>,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub is_last_sibling: bool,
}

/// Build the visible rows. Pure: equal inputs give equal rows, and the
/// selection only affects `is_selected`, never which rows exist.
pub fn project_rows(
    snapshot: &Snapshot,
    expansion: &ExpansionState,
    selection: &SelectionState,
) -> Vec<TreeRow> {
    let mut projector = Projector {
        snapshot,
        expansion,
        selection,
        rows: Vec::new(),
    };
    let disks = snapshot.disks();
    for (i, disk) in disks.iter().enumerate() {
        projector.disk(disk, ExplorerPath::disk(i), i + 1 == disks.len());
    }
    projector.rows
}

struct Projector<'s> {
    snapshot: &'s Snapshot,
    expansion: &'s ExpansionState,
    selection: &'s SelectionState,
    rows: Vec<TreeRow>,
}

impl<'s> Projector<'s> {
    fn push(
        &mut self,
        path: ExplorerPath,
        kind: NodeKind,
        depth: usize,
        name: &str,
        info: Option<String>,
        is_last: bool,
    ) -> bool {
        let is_expanded = kind.is_expandable() && self.expansion.is_expanded(&path);
        let is_selected = self.selection.is_selected(&path);
        self.rows.push(TreeRow {
            path,
            kind,
            depth,
            name: name.to_string(),
            info,
            is_expanded,
            is_selected,
            is_last_sibling: is_last,
        });
        is_expanded
    }

    fn disk(&mut self, disk: &Disk, path: ExplorerPath, is_last: bool) {
        let info = Some(format_size(disk.size_bytes));
        if !self.push(
            path.clone(),
            NodeKind::Disk,
            0,
            disk.display_name(),
            info,
            is_last,
        ) {
            return;
        }
        let count = disk.partitions.len();
        for (j, partition) in disk.partitions.iter().enumerate() {
            self.partition(partition, path.partition(j), j + 1 == count);
        }
    }

    fn partition(&mut self, partition: &Partition, path: ExplorerPath, is_last: bool) {
        let info = Some(format!(
            "{} · {}",
            partition.kind.label(),
            format_size(partition.size_bytes)
        ));
        if !self.push(
            path.clone(),
            NodeKind::Partition,
            1,
            &partition.name,
            info,
            is_last,
        ) {
            return;
        }
        if let Some(root) = &partition.fs {
            self.fs_node(root, path.child(root.name()), 2, true);
        }
    }

    fn fs_node(&mut self, node: &FsNode, path: ExplorerPath, depth: usize, is_last: bool) {
        if !self.push(path.clone(), node.kind(), depth, node.name(), None, is_last) {
            return;
        }
        let children = self.snapshot.children_of(node);
        for (k, child) in children.iter().enumerate() {
            self.fs_node(
                child,
                path.child(child.name()),
                depth + 1,
                k + 1 == children.len(),
            );
        }
    }
}
