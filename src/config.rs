//! Resolved configuration for one listing run
//!
//! The CLI builds a [`Config`] per root directory; every pass reads it and
//! nothing mutates it afterwards.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::output::{Decorators, FormatMode, PathStyle};
use crate::sort::SortMode;
use crate::tree::CollectStrategy;

const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to list.
    pub root: PathBuf,
    /// Directories deeper than this are shown but not listed (root = 0).
    pub max_depth: Option<usize>,
    /// Glob patterns; matching entries are skipped and never descended into.
    pub exclude: Vec<String>,
    pub sort: SortMode,
    pub collect: CollectStrategy,
    pub path_style: PathStyle,
    pub decorators: Decorators,
    pub format: FormatMode,
    /// Close summary braces on the last child's line.
    pub compact_braces: bool,
    /// Spaces per nesting level in summary output (at most [`MAX_INDENT`]).
    pub indent: usize,
    /// Truncate runs of more than this many files.
    pub collect_limit: Option<usize>,
    /// Files kept at each end of a truncated run (default 1).
    pub collect_limit_min: Option<usize>,
    /// Fail instead of falling back to absolute paths across drives.
    pub strict_rel: bool,
    /// Replaces the root's own name in `rel-base` paths.
    pub base_label: Option<String>,
    /// Directories with at least this many files keep only their first and
    /// last file and are not descended into.
    pub prune_large_dirs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_depth: None,
            exclude: Vec::new(),
            sort: SortMode::default(),
            collect: CollectStrategy::default(),
            path_style: PathStyle::default(),
            decorators: Decorators::default(),
            format: FormatMode::default(),
            compact_braces: false,
            indent: DEFAULT_INDENT,
            collect_limit: None,
            collect_limit_min: None,
            strict_rel: false,
            base_label: None,
            prune_large_dirs: None,
        }
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Check cross-field invariants before any filesystem access.
    pub fn validate(&self) -> Result<()> {
        if self.collect_limit == Some(0) {
            return Err(Error::Config("collect limit must be at least 1".into()));
        }
        if self.collect_limit_min == Some(0) {
            return Err(Error::Config("collect limit min must be at least 1".into()));
        }
        if let (Some(limit), Some(min)) = (self.collect_limit, self.collect_limit_min) {
            if min > limit {
                return Err(Error::Config(format!(
                    "collect limit min ({min}) exceeds collect limit ({limit})"
                )));
            }
        }
        if self.prune_large_dirs == Some(0) {
            return Err(Error::Config("prune threshold must be at least 1".into()));
        }
        if self.indent > MAX_INDENT {
            return Err(Error::Config(format!(
                "indent must be at most {MAX_INDENT}"
            )));
        }
        if self.base_label.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Config("base label must not be empty".into()));
        }
        Ok(())
    }
}
