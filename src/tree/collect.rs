//! Collection strategies and truncation
//!
//! The collector turns a raw walked tree into its final listed form: each
//! directory's children are sorted, filtered by the collection strategy and
//! shortened by the truncation policy. A node's result depends only on its
//! own children, so directories are visited top-down, and running the
//! collector again on its output with the same config changes nothing.
//!
//! Truncation drops files for good. To collect one walk under several
//! policies, keep the raw tree from [`TreeWalker::walk`] and collect a clone
//! of it each time.
//!
//! [`TreeWalker::walk`]: super::TreeWalker::walk

use clap::ValueEnum;

use crate::config::Config;
use crate::sort::SortKey;

use super::node::{Node, Truncation};

/// Which children of a directory are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollectStrategy {
    /// Every file and directory
    #[default]
    All,
    /// Directories only
    DirsOnly,
    /// Directories, plus the first and last file of each
    #[value(name = "dirs-1st-last-file")]
    DirsFirstLastFile,
    /// Files only; directories just group them
    FilesOnly,
}

impl CollectStrategy {
    /// Whether directories appear as entries of their own in the output.
    pub fn lists_dirs(self) -> bool {
        self != CollectStrategy::FilesOnly
    }
}

/// Finalize every directory in the tree, parents before children.
///
/// Expects a raw tree or one collected with the same config. A truncation
/// left by an earlier pass is kept as is.
pub fn collect(root: &mut Node, config: &Config) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        collect_node(node, config);
        stack.extend(node.children.iter_mut().filter(|c| c.is_dir()));
    }
}

/// Sort, filter and truncate the children of one directory.
///
/// Files come first, then subdirectories, each group in sort order.
pub fn collect_node(node: &mut Node, config: &Config) {
    if !node.is_dir() {
        return;
    }

    let mode = config.sort;
    let (mut files, mut dirs): (Vec<Node>, Vec<Node>) = std::mem::take(&mut node.children)
        .into_iter()
        .partition(|c| !c.is_dir());
    files.sort_by_cached_key(|n| SortKey::for_entry(&n.entry, mode));
    dirs.sort_by_cached_key(|n| SortKey::for_entry(&n.entry, mode));

    match config.collect {
        CollectStrategy::All | CollectStrategy::FilesOnly => {}
        CollectStrategy::DirsOnly => files.clear(),
        CollectStrategy::DirsFirstLastFile => keep_first_and_last(&mut files),
    }
    if node.pruned {
        keep_first_and_last(&mut files);
    }

    if node.truncation.is_none() {
        if let Some(limit) = config.collect_limit {
            let min = config.collect_limit_min.unwrap_or(1);
            node.truncation = truncate(&mut files, limit, min);
        }
    }

    files.append(&mut dirs);
    node.children = files;
}

fn keep_first_and_last(files: &mut Vec<Node>) {
    if files.len() > 2 {
        files.drain(1..files.len() - 1);
    }
}

/// Keep `min` files from each end of a run longer than `limit`.
fn truncate(files: &mut Vec<Node>, limit: usize, min: usize) -> Option<Truncation> {
    let count = files.len();
    if count <= limit || min.saturating_mul(2) >= count {
        return None;
    }
    files.drain(min..count - min);
    Some(Truncation {
        head: min,
        omitted: count - 2 * min,
    })
}
