//! Output format selection and shared markers

use clap::ValueEnum;

/// Suffix for directories that could not be listed.
pub const UNREADABLE_MARKER: &str = "[unreadable]";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatMode {
    /// One path per line
    #[default]
    Inline,
    /// Nested braces following the directory hierarchy
    Summary,
}

/// Line standing in for the files dropped from a truncated run.
pub fn omission_marker(omitted: usize) -> String {
    format!("... ({omitted} omitted)")
}
