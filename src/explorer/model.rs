//! Snapshot data model: disks, partitions and the directory/file tree.
//!
//! The snapshot arrives once as JSON from the simulator's `getfs` command and
//! is never mutated afterwards. Everything the explorer keeps on top of it
//! (expansion, selection, rows) is overlay state.

use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};

/// Bytes per mebibyte, used for every size label.
pub const MIB: u64 = 1024 * 1024;

/// Allocation policy attached to disks and partitions. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FitStrategy {
    First,
    Best,
    Worst,
}

impl FitStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            FitStrategy::First => "First fit",
            FitStrategy::Best => "Best fit",
            FitStrategy::Worst => "Worst fit",
        }
    }
}

impl FromStr for FitStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "ff" | "f" => Ok(FitStrategy::First),
            "best" | "bf" | "b" => Ok(FitStrategy::Best),
            "worst" | "wf" | "w" => Ok(FitStrategy::Worst),
            other => Err(format!("unknown fit strategy `{}`", other)),
        }
    }
}

impl TryFrom<String> for FitStrategy {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Partition table entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PartitionKind {
    Primary,
    Extended,
    /// Unallocated space reported as a slot in the table.
    Available,
}

impl PartitionKind {
    pub fn label(&self) -> &'static str {
        match self {
            PartitionKind::Primary => "Primary",
            PartitionKind::Extended => "Extended",
            PartitionKind::Available => "Free",
        }
    }
}

impl FromStr for PartitionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "p" => Ok(PartitionKind::Primary),
            "extended" | "e" => Ok(PartitionKind::Extended),
            "available" | "free" | "n" => Ok(PartitionKind::Available),
            other => Err(format!("unknown partition kind `{}`", other)),
        }
    }
}

impl TryFrom<String> for PartitionKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// The four kinds of node the explorer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Disk,
    Partition,
    Directory,
    File,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Disk => "Disk",
            NodeKind::Partition => "Partition",
            NodeKind::Directory => "Directory",
            NodeKind::File => "File",
        }
    }

    /// Whether activating a row of this kind also flips its expansion.
    pub fn is_expandable(&self) -> bool {
        !matches!(self, NodeKind::File)
    }
}

/// A virtual disk and its partition table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub path: String,
    pub size_bytes: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub signature: String,
    #[serde(rename = "fitStrategy")]
    pub fit: FitStrategy,
    pub partitions: Vec<Partition>,
}

impl Disk {
    /// Last segment of the disk's path, e.g. `d1.smia` for `/disks/d1.smia`.
    pub fn display_name(&self) -> &str {
        self.path
            .rsplit(|c: char| c == '/' || c == '\\')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.path)
    }
}

/// A partition slot on a disk, optionally carrying a formatted file system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub name: String,
    pub kind: PartitionKind,
    pub size_bytes: u64,
    pub start_offset: i64,
    #[serde(rename = "fitStrategy")]
    pub fit: FitStrategy,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Root directory; only present once the partition has been formatted.
    #[serde(default)]
    pub fs: Option<FsNode>,
}

/// A directory or file inside a partition's file system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawFsNode")]
pub enum FsNode {
    Directory {
        name: String,
        children: Vec<FsNode>,
    },
    File {
        name: String,
        /// `Some(vec![])` is an empty file; `None` means the payload carried
        /// no content at all.
        content: Option<Vec<String>>,
    },
}

impl FsNode {
    pub fn name(&self) -> &str {
        match self {
            FsNode::Directory { name, .. } | FsNode::File { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FsNode::Directory { .. } => NodeKind::Directory,
            FsNode::File { .. } => NodeKind::File,
        }
    }

    /// Immediate children; always empty for files.
    pub fn children(&self) -> &[FsNode] {
        match self {
            FsNode::Directory { children, .. } => children,
            FsNode::File { .. } => &[],
        }
    }
}

/// Wire shape of a file-system node before the kind is decided.
///
/// Accepts an explicit `kind` tag, the simulator's numeric `type` (0 = dir,
/// 1 = file), or infers the kind from which fields are present.
#[derive(Deserialize)]
struct RawFsNode {
    name: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default, rename = "type")]
    type_code: Option<u8>,
    #[serde(default)]
    children: Option<Vec<FsNode>>,
    #[serde(default)]
    content: Option<serde_json::Value>,
}

impl TryFrom<RawFsNode> for FsNode {
    type Error = String;

    fn try_from(raw: RawFsNode) -> std::result::Result<Self, Self::Error> {
        let is_directory = match (raw.kind.as_deref(), raw.type_code) {
            (Some(kind), _) => match kind.trim().to_ascii_lowercase().as_str() {
                "directory" | "dir" | "folder" => true,
                "file" => false,
                other => return Err(format!("unknown node kind `{}`", other)),
            },
            (None, Some(0)) => true,
            (None, Some(1)) => false,
            (None, Some(code)) => return Err(format!("unknown node type {}", code)),
            (None, None) => raw.children.is_some(),
        };

        let content = raw.content.filter(|value| !value.is_null());
        if is_directory {
            let children = match (raw.children, content) {
                (Some(children), _) => children,
                (None, Some(content)) => {
                    Vec::<FsNode>::deserialize(serde_stacker::Deserializer::new(content))
                        .map_err(|e| format!("directory `{}`: {}", raw.name, e))?
                }
                (None, None) => Vec::new(),
            };
            Ok(FsNode::Directory {
                name: raw.name,
                children,
            })
        } else {
            if raw.children.is_some() {
                return Err(format!("file `{}` cannot have children", raw.name));
            }
            let content = content
                .map(serde_json::from_value::<Vec<String>>)
                .transpose()
                .map_err(|e| format!("file `{}`: {}", raw.name, e))?;
            Ok(FsNode::File {
                name: raw.name,
                content,
            })
        }
    }
}

/// Accept both `"1234"` and `1234` for identifiers the simulator emits as numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// The whole disk forest returned by `getfs`. Load once, read many.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    disks: Vec<Disk>,
}

impl Snapshot {
    /// Parse the `output` string of a `getfs` response.
    pub fn from_json(payload: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(payload);
        deserializer.disable_recursion_limit();
        let disks = Vec::<Disk>::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        for (i, disk) in disks.iter().enumerate() {
            for (j, partition) in disk.partitions.iter().enumerate() {
                if let Some(FsNode::File { name, .. }) = &partition.fs {
                    return Err(AppError::MalformedSnapshot(format!(
                        "disk {} partition {}: root `{}` is a file, expected a directory",
                        i, j, name
                    )));
                }
            }
        }
        Ok(Self { disks })
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn disk_at(&self, index: usize) -> Option<&Disk> {
        self.disks.get(index)
    }

    pub fn partition_at(&self, disk: usize, partition: usize) -> Option<&Partition> {
        self.disk_at(disk)?.partitions.get(partition)
    }

    pub fn children_of<'a>(&self, node: &'a FsNode) -> &'a [FsNode] {
        node.children()
    }

    /// Total number of nodes of every kind, for log lines.
    pub fn node_count(&self) -> usize {
        fn count(node: &FsNode) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        self.disks
            .iter()
            .map(|disk| {
                1 + disk
                    .partitions
                    .iter()
                    .map(|p| 1 + p.fs.as_ref().map(count).unwrap_or(0))
                    .sum::<usize>()
            })
            .sum()
    }
}

/// Whole mebibytes, rounded to the nearest integer.
pub fn size_in_mib(bytes: u64) -> u64 {
    bytes.saturating_add(MIB / 2) / MIB
}

/// Size label used by rows and the detail panel, e.g. `10 MB`.
pub fn format_size(bytes: u64) -> String {
    format!("{} MB", size_in_mib(bytes))
}
