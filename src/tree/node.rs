//! Tree node and statistics types

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// One filesystem entry visited during the walk.
///
/// `children` is `None` for files and for directories that were not
/// expanded (depth cap, unreadable, loop guard). An expanded directory with
/// nothing left after filtering has `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBuf,
    pub is_directory: bool,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_time"
    )]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        is_directory: bool,
        depth: usize,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory,
            depth,
            size: None,
            modified_time: None,
            children: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_children(mut self, children: Vec<FileNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// True if this directory was listed and recursed into.
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Children of an expanded directory, empty otherwise.
    pub fn child_nodes(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// This node and all its descendants in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &FileNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.child_nodes().iter().rev());
            Some(node)
        })
    }

    /// Find a descendant (or self) by its path.
    pub fn find(&self, path: &Path) -> Option<&FileNode> {
        self.iter().find(|n| n.path == path)
    }
}

/// Aggregate counts for one build.
///
/// `total_size` only accumulates when sizes are being read, so it stays zero
/// unless `show_size` was set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_files: usize,
    pub total_directories: usize,
    pub total_size: u64,
}

impl TreeStats {
    pub(crate) fn record(&mut self, node: &FileNode) {
        if node.is_directory {
            self.total_directories += 1;
        } else {
            self.total_files += 1;
            if let Some(size) = node.size {
                self.total_size += size;
            }
        }
    }
}

fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn serialize_time<S: Serializer>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}
