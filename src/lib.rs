//! listall - Directory listings with natural sorting and brace summaries
//!
//! A listing is built in three steps: [`TreeWalker`] reads the filesystem
//! into a [`Node`] tree, [`collect`] sorts and trims every directory, and
//! [`Renderer`] turns the result into text.

pub mod config;
pub mod error;
pub mod output;
pub mod sort;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::path::PathBuf;

use log::debug;

pub use config::Config;
pub use error::{Error, Result};
pub use output::{
    Decorator, Decorators, FormatMode, OutputTarget, PathFormatter, PathStyle, Renderer, Sink,
    to_json,
};
pub use sort::{SortKey, SortMode, sort_names};
pub use tree::{CollectStrategy, Entry, EntryKind, Node, TreeWalker, collect};

/// A rendered listing of one root directory.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Resolved absolute root.
    pub root: PathBuf,
    /// The collected tree the text was rendered from.
    pub tree: Node,
    pub text: String,
}

/// Validate the configuration, walk the root and collect the result.
pub fn build_tree(config: &Config) -> Result<Node> {
    config.validate()?;
    let mut root = TreeWalker::new(config).walk()?;
    collect(&mut root, config);
    debug!(
        "collected {} nodes under {}",
        root.descendants().len(),
        root.entry.path.display()
    );
    Ok(root)
}

/// Build and render a listing. Nothing is returned unless every line rendered.
pub fn list(config: &Config) -> Result<Listing> {
    let tree = build_tree(config)?;
    let text = Renderer::new(config).render(&tree)?;
    Ok(Listing {
        root: tree.entry.path.clone(),
        tree,
        text,
    })
}
