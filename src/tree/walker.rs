//! TreeWalker - builds the raw tree in memory
//!
//! The walk is iterative: an explicit stack drives the depth-first descent
//! and nodes live in a flat arena until the walk finishes, so directory depth
//! is bounded by memory rather than by the call stack. Children are attached
//! in filesystem enumeration order; sorting and truncation are left to the
//! collector.

use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};

use super::filter::ExcludeFilter;
use super::node::{Entry, EntryKind, Node};

type DescendFilter<'a> = Box<dyn Fn(&Node) -> bool + 'a>;

/// Walks one root directory according to a [`Config`].
pub struct TreeWalker<'a> {
    config: &'a Config,
    filter: ExcludeFilter,
    descend: Option<DescendFilter<'a>>,
}

/// A node waiting in the arena, with the index of its parent.
struct Slot {
    node: Node,
    parent: usize,
    /// Directory that may be listed later (not a symlink).
    listable: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            filter: ExcludeFilter::new(&config.exclude),
            descend: None,
        }
    }

    /// Consult `filter` before listing any directory below the root.
    ///
    /// Directories it rejects stay in the tree as leaves.
    pub fn with_descend_filter(mut self, filter: impl Fn(&Node) -> bool + 'a) -> Self {
        self.descend = Some(Box::new(filter));
        self
    }

    pub fn walk(&self) -> Result<Node> {
        let root_path = resolve_root(&self.config.root)?;
        let modified = fs::metadata(&root_path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);
        let root = Node::new(
            Entry::new(root_path.clone(), EntryKind::Directory).with_modified(modified),
            0,
        );

        let mut slots = vec![Slot {
            node: root,
            parent: 0,
            listable: true,
        }];
        let mut stack = vec![0usize];

        while let Some(id) = stack.pop() {
            if !self.should_list(&slots[id].node) {
                continue;
            }

            let listing = self.list_dir(&root_path, &slots[id].node);
            let node = &mut slots[id].node;
            node.unreadable = listing.error;
            node.pruned = listing.pruned;

            let first_child = slots.len();
            for (child, listable) in listing.children {
                slots.push(Slot {
                    node: child,
                    parent: id,
                    listable,
                });
            }
            // Reversed so the first subdirectory is listed next.
            for child_id in (first_child..slots.len()).rev() {
                if slots[child_id].listable {
                    stack.push(child_id);
                }
            }
        }

        Ok(assemble(slots))
    }

    fn should_list(&self, node: &Node) -> bool {
        // The root is always listed; below it, only children of directories
        // shallower than the limit.
        if self.config.max_depth.is_some_and(|max| node.depth > max) {
            debug!("depth limit reached at {}", node.entry.path.display());
            return false;
        }
        if node.depth > 0 {
            if let Some(descend) = &self.descend {
                if !descend(node) {
                    debug!("descend filter skipped {}", node.entry.path.display());
                    return false;
                }
            }
        }
        true
    }

    fn list_dir(&self, root: &Path, dir: &Node) -> Listing {
        let mut listing = Listing::default();
        let entries = match fs::read_dir(&dir.entry.path) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("cannot list {}: {}", dir.entry.path.display(), err);
                listing.error = Some(err.to_string());
                return listing;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    listing.error = Some(err.to_string());
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            if self.filter.is_excluded(&name, &relative_slash(root, &path)) {
                debug!("excluded {}", path.display());
                continue;
            }

            let (kind, modified, is_symlink) = inspect(&entry);
            let child = Node::new(
                Entry {
                    name,
                    kind,
                    path,
                    modified,
                },
                dir.depth + 1,
            );
            let listable = kind == EntryKind::Directory && !is_symlink;
            listing.children.push((child, listable));
        }

        if let Some(limit) = self.config.prune_large_dirs {
            let files = listing.children.iter().filter(|(c, _)| !c.is_dir()).count();
            if files >= limit {
                debug!(
                    "pruning {} ({} files, limit {})",
                    dir.entry.path.display(),
                    files,
                    limit
                );
                listing.children.retain(|(c, _)| !c.is_dir());
                listing.pruned = true;
            }
        }

        listing
    }
}

#[derive(Default)]
struct Listing {
    children: Vec<(Node, bool)>,
    error: Option<String>,
    pruned: bool,
}

/// Resolve the root to an absolute directory path.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(root).map_err(|e| Error::from_io(root, e))?;
    let metadata = fs::metadata(&resolved).map_err(|e| Error::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }
    Ok(strip_verbatim(resolved))
}

/// `canonicalize` returns `\\?\C:\...` on Windows; keep the familiar form.
#[cfg(windows)]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    match text.strip_prefix(r"\\?\") {
        Some(rest) if !rest.starts_with("UNC\\") => PathBuf::from(rest),
        _ => path,
    }
}

#[cfg(not(windows))]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    path
}

/// Kind, modification time and symlink flag of a listed entry.
///
/// Symlinks are classified by their target but never listed.
fn inspect(entry: &DirEntry) -> (EntryKind, Option<DateTime<Utc>>, bool) {
    let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
    let metadata = if is_symlink {
        fs::metadata(entry.path())
    } else {
        entry.metadata()
    };

    match metadata {
        Ok(meta) => {
            let kind = if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let modified = meta.modified().ok().map(DateTime::<Utc>::from);
            (kind, modified, is_symlink)
        }
        // Dangling symlinks and vanished entries show up as files.
        Err(_) => (EntryKind::File, None, is_symlink),
    }
}

/// Root-relative path with `/` separators, for pattern matching.
fn relative_slash(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Fold the arena back into a tree.
///
/// Parents always sit at lower indices than their children, so popping from
/// the end hands over complete subtrees.
fn assemble(mut slots: Vec<Slot>) -> Node {
    while slots.len() > 1 {
        let parent = slots[slots.len() - 1].parent;
        if let Some(mut slot) = slots.pop() {
            slot.node.children.reverse();
            slots[parent].node.children.push(slot.node);
        }
    }
    let mut root = slots.swap_remove(0).node;
    root.children.reverse();
    root
}
