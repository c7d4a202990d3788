//! JSON output

use crate::error::Result;
use crate::tree::Node;

/// Serialize a collected tree as pretty-printed JSON.
pub fn to_json(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}
