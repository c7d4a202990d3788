//! Tree model shared by the walker, collector and renderers

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One filesystem object seen during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Base name, never empty.
    pub name: String,
    pub kind: EntryKind,
    /// Absolute path, unique within one walk.
    pub path: PathBuf,
    /// Last modification time, when the platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            kind,
            path,
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Name of a path, falling back to the whole path for roots like `/`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Head/tail split recorded when a run of files was shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Truncation {
    /// Number of kept files before the omission marker.
    pub head: usize,
    /// Number of files dropped between head and tail.
    pub omitted: usize,
}

/// A visited directory, or a file leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub entry: Entry,
    /// Distance from the walk root (root = 0).
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
    /// Set when the directory listing failed; the node then has no children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unreadable: Option<String>,
    /// Set when the directory held too many files and was only sampled.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pruned: bool,
}

impl Node {
    pub fn new(entry: Entry, depth: usize) -> Self {
        Self {
            entry,
            depth,
            children: Vec::new(),
            truncation: None,
            unreadable: None,
            pruned: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(Node::name).collect()
    }

    /// All nodes of the subtree in pre-order, this node first.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Directories in this subtree whose listing failed.
    pub fn unreadable_dirs(&self) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.unreadable.is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, depth: usize) -> Node {
        Node::new(Entry::new(format!("/r/{name}"), EntryKind::File), depth)
    }

    #[test]
    fn test_display_name_falls_back_to_path() {
        assert_eq!(display_name(Path::new("/r/proj")), "proj");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut sub = Node::new(Entry::new("/r/sub", EntryKind::Directory), 1);
        sub.children.push(file("sub/b", 2));
        let mut root = Node::new(Entry::new("/r", EntryKind::Directory), 0);
        root.children.push(file("a", 1));
        root.children.push(sub);

        let names: Vec<_> = root.descendants().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["r", "a", "sub", "b"]);
    }

    #[test]
    fn test_unreadable_dirs() {
        let mut locked = Node::new(Entry::new("/r/locked", EntryKind::Directory), 1);
        locked.unreadable = Some("Permission denied".to_string());
        let mut root = Node::new(Entry::new("/r", EntryKind::Directory), 0);
        root.children.push(locked);
        root.children.push(file("a", 1));

        let bad = root.unreadable_dirs();
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].name(), "locked");
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let node = file("a.txt", 1);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["name"], "a.txt");
        assert_eq!(json["kind"], "file");
        assert!(json.get("children").is_none());
        assert!(json.get("pruned").is_none());
        assert!(json.get("truncation").is_none());
    }
}
