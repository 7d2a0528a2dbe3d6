//! Explorer paths: position-based identifiers for every node in a snapshot.
//!
//! A path is `disk-<i>`, then `partition-<j>`, then the chain of node names
//! from the partition's root directory down. Disks and partitions are
//! addressed by index, directories and files by name. Names are escaped in the
//! string form (`%` → `%25`, `/` → `%2F`) so the root directory `/` cannot be
//! mistaken for a separator.
//!
//! Sibling name collisions are not disambiguated: [`resolve`] takes the first
//! sibling with a matching name.

use std::fmt;

use crate::error::{AppError, Result};
use crate::explorer::model::{Disk, FsNode, NodeKind, Partition, Snapshot};

const SEPARATOR: char = '/';
const DISK_PREFIX: &str = "disk-";
const PARTITION_PREFIX: &str = "partition-";

/// One step of an explorer path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Disk(usize),
    Partition(usize),
    Node(String),
}

/// Identifier of a node's position within one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExplorerPath {
    segments: Vec<Segment>,
}

impl ExplorerPath {
    /// Path of the disk at `index` in the top-level sequence.
    pub fn disk(index: usize) -> Self {
        Self {
            segments: vec![Segment::Disk(index)],
        }
    }

    /// Path of the `index`-th partition of the disk at `self`.
    pub fn partition(&self, index: usize) -> Self {
        self.with(Segment::Partition(index))
    }

    /// Path of the directory or file named `name` below `self`.
    pub fn child(&self, name: &str) -> Self {
        self.with(Segment::Node(name.to_string()))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Read the string form produced by `Display`. Unknown prefixes, bad
    /// indices, empty names and stray `%` escapes are `NotFound`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || AppError::NotFound(text.to_string());
        let index = |raw: &str, prefix: &str| -> Result<usize> {
            raw.strip_prefix(prefix)
                .filter(|digits| {
                    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
                })
                .and_then(|digits| digits.parse().ok())
                .ok_or_else(invalid)
        };

        let mut segments = Vec::new();
        for (position, raw) in text.split(SEPARATOR).enumerate() {
            segments.push(match position {
                0 => Segment::Disk(index(raw, DISK_PREFIX)?),
                1 => Segment::Partition(index(raw, PARTITION_PREFIX)?),
                _ => Segment::Node(unescape(raw).ok_or_else(invalid)?),
            });
        }
        Ok(Self { segments })
    }

    /// Path of the enclosing node, or `None` for a disk.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for ExplorerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            match segment {
                Segment::Disk(index) => write!(f, "{}{}", DISK_PREFIX, index)?,
                Segment::Partition(index) => write!(f, "{}{}", PARTITION_PREFIX, index)?,
                Segment::Node(name) => f.write_str(&escape(name))?,
            }
        }
        Ok(())
    }
}

fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let code = rest.get(at + 1..at + 3)?;
        out.push(match code {
            "25" => '%',
            "2F" | "2f" => '/',
            _ => return None,
        });
        rest = &rest[at + 3..];
    }
    out.push_str(rest);
    Some(out)
}

/// A node reached by resolving an [`ExplorerPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Disk(&'a Disk),
    Partition(&'a Partition),
    Fs(&'a FsNode),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Disk(_) => NodeKind::Disk,
            NodeRef::Partition(_) => NodeKind::Partition,
            NodeRef::Fs(node) => node.kind(),
        }
    }
}

/// Walk `snapshot` from the disk sequence down, following each segment.
pub fn resolve<'a>(path: &ExplorerPath, snapshot: &'a Snapshot) -> Result<NodeRef<'a>> {
    let not_found = || AppError::NotFound(path.to_string());
    let mut segments = path.segments().iter();

    let disk = match segments.next() {
        Some(Segment::Disk(i)) => snapshot.disk_at(*i).ok_or_else(not_found)?,
        _ => return Err(not_found()),
    };

    let partition = match segments.next() {
        None => return Ok(NodeRef::Disk(disk)),
        Some(Segment::Partition(j)) => disk.partitions.get(*j).ok_or_else(not_found)?,
        Some(_) => return Err(not_found()),
    };

    let mut current = match segments.next() {
        None => return Ok(NodeRef::Partition(partition)),
        Some(Segment::Node(name)) => partition
            .fs
            .as_ref()
            .filter(|root| root.name() == name)
            .ok_or_else(not_found)?,
        Some(_) => return Err(not_found()),
    };

    for segment in segments {
        let Segment::Node(name) = segment else {
            return Err(not_found());
        };
        current = current
            .children()
            .iter()
            .find(|child| child.name() == name)
            .ok_or_else(not_found)?;
    }

    Ok(NodeRef::Fs(current))
}
