//! Detail panel content for the selected node, dispatched on node kind.

use crate::explorer::model::{format_size, FitStrategy, FsNode, PartitionKind, Snapshot};
use crate::explorer::path::{resolve, NodeRef};
use crate::explorer::selection::SelectionState;

pub const PLACEHOLDER_TEXT: &str = "Select a disk, partition, directory or file to see its details.";
pub const EMPTY_FILE_TEXT: &str = "(empty file)";
pub const NO_CONTENT_TEXT: &str = "(no content)";

/// One line of a disk's partition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub name: String,
    pub kind: PartitionKind,
    pub size_bytes: u64,
}

/// What a selected file has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    Lines(Vec<String>),
    /// Content present but zero lines.
    Empty,
    /// The payload had no content field for this file.
    NoContent,
}

/// Detail panel model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Placeholder,
    Disk {
        path: String,
        size_bytes: u64,
        signature: String,
        fit: FitStrategy,
        partitions: Vec<PartitionSummary>,
    },
    Partition {
        name: String,
        kind: PartitionKind,
        size_bytes: u64,
        fit: FitStrategy,
        start_offset: i64,
        id: String,
    },
    Directory {
        name: String,
        child_count: usize,
    },
    File {
        name: String,
        body: FileBody,
    },
}

/// Resolve the selection with the same addressing the tree uses and describe
/// the node. Anything that no longer resolves, or resolves to a different
/// kind than was selected, falls back to the placeholder.
pub fn describe(selection: &SelectionState, snapshot: &Snapshot) -> Detail {
    let Some(current) = selection.current() else {
        return Detail::Placeholder;
    };
    let node = match resolve(&current.path, snapshot) {
        Ok(node) if node.kind() == current.kind => node,
        Ok(node) => {
            tracing::debug!(
                path = %current.path,
                selected = current.kind.label(),
                found = node.kind().label(),
                "selection kind no longer matches"
            );
            return Detail::Placeholder;
        }
        Err(e) => {
            tracing::debug!(error = %e, "selection did not resolve");
            return Detail::Placeholder;
        }
    };

    match node {
        NodeRef::Disk(disk) => Detail::Disk {
            path: disk.path.clone(),
            size_bytes: disk.size_bytes,
            signature: disk.signature.clone(),
            fit: disk.fit,
            partitions: disk
                .partitions
                .iter()
                .map(|p| PartitionSummary {
                    name: p.name.clone(),
                    kind: p.kind,
                    size_bytes: p.size_bytes,
                })
                .collect(),
        },
        NodeRef::Partition(p) => Detail::Partition {
            name: p.name.clone(),
            kind: p.kind,
            size_bytes: p.size_bytes,
            fit: p.fit,
            start_offset: p.start_offset,
            id: p.id.clone(),
        },
        NodeRef::Fs(FsNode::Directory { name, children }) => Detail::Directory {
            name: name.clone(),
            child_count: children.len(),
        },
        NodeRef::Fs(FsNode::File { name, content }) => Detail::File {
            name: name.clone(),
            body: match content {
                Some(lines) if !lines.is_empty() => FileBody::Lines(lines.clone()),
                Some(_) => FileBody::Empty,
                None => FileBody::NoContent,
            },
        },
    }
}

impl Detail {
    /// Panel title.
    pub fn title(&self) -> String {
        match self {
            Detail::Placeholder => "Details".to_string(),
            Detail::Disk { path, .. } => format!("Disk {}", path),
            Detail::Partition { name, .. } => format!("Partition {}", name),
            Detail::Directory { name, .. } => format!("Directory {}", name),
            Detail::File { name, .. } => format!("File {}", name),
        }
    }

    /// Body lines in display order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Detail::Placeholder => vec![PLACEHOLDER_TEXT.to_string()],
            Detail::Disk {
                path,
                size_bytes,
                signature,
                fit,
                partitions,
            } => {
                let mut lines = vec![
                    field("Path", path),
                    field("Size", &format_size(*size_bytes)),
                    field("Signature", signature),
                    field("Fit", fit.label()),
                    field("Partitions", &partitions.len().to_string()),
                ];
                let width = partitions.iter().map(|p| p.name.len()).max().unwrap_or(0);
                lines.extend(partitions.iter().map(|p| {
                    format!(
                        "  {:<width$}  {:<8}  {}",
                        p.name,
                        p.kind.label(),
                        format_size(p.size_bytes),
                        width = width
                    )
                }));
                lines
            }
            Detail::Partition {
                name,
                kind,
                size_bytes,
                fit,
                start_offset,
                id,
            } => vec![
                field("Name", name),
                field("Type", kind.label()),
                field("Size", &format_size(*size_bytes)),
                field("Fit", fit.label()),
                field("Start", &start_offset.to_string()),
                field("ID", id),
            ],
            Detail::Directory { name, child_count } => vec![
                field("Name", name),
                field("Children", &child_count.to_string()),
            ],
            Detail::File { body, .. } => match body {
                FileBody::Lines(lines) => lines.clone(),
                FileBody::Empty => vec![EMPTY_FILE_TEXT.to_string()],
                FileBody::NoContent => vec![NO_CONTENT_TEXT.to_string()],
            },
        }
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{:<12}{}", format!("{}:", label), value)
}
