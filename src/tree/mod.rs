//! Directory tree walking and collection
//!
//! Building a listing happens in two passes over an in-memory tree:
//!
//! - `TreeWalker`: reads the filesystem once, applying exclusion patterns,
//!   the depth limit and the descend filter
//! - `collect`: sorts, filters and truncates each directory's children
//!
//! Keeping the passes separate lets different sort and collection policies
//! be applied to the same walked snapshot.

mod collect;
mod filter;
mod node;
mod walker;

pub use collect::{CollectStrategy, collect, collect_node};
pub use filter::{ExcludeFilter, matches};
pub use node::{Entry, EntryKind, Node, Truncation, display_name};
pub use walker::{TreeWalker, resolve_root};
