//! Turning a collected tree into output
//!
//! # Module Structure
//!
//! - `config` - Format selection and shared markers
//! - `path` - Path styles, decorators and the per-walk formatter
//! - `render` - Inline and summary text rendering
//! - `json` - JSON output
//! - `sink` - Stdout and file destinations

mod config;
mod json;
mod path;
mod render;
mod sink;

pub use config::{FormatMode, UNREADABLE_MARKER, omission_marker};
pub use json::to_json;
pub use path::{Decorator, Decorators, PathFormatter, PathStyle};
pub use render::{RenderLine, Renderer};
pub use sink::{OutputTarget, Sink, default_filename};
