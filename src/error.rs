//! Error types for listing runs
//!
//! Only configuration problems, root resolution failures and strict relative
//! path violations are errors. A directory that cannot be listed mid-walk is
//! recorded on its `Node` instead, so one bad branch never hides the rest of
//! the tree.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a listing run.
#[derive(Debug, Error)]
pub enum Error {
    /// Contradictory or out-of-range option values.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot access '{}': No such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access '{}': Permission denied", .0.display())]
    Permission(PathBuf),

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A relative path was requested across a drive or volume boundary
    /// while strict relative paths are enabled.
    #[error(
        "cannot create relative path across drives: '{}' is not on the same volume as '{}'",
        path.display(),
        root.display()
    )]
    CrossDrive { path: PathBuf, root: PathBuf },

    #[error("failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map an I/O failure on `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path),
            io::ErrorKind::PermissionDenied => Error::Permission(path),
            _ => Error::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_kinds() {
        let err = Error::from_io("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound(_)));

        let err = Error::from_io("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::Permission(_)));

        let err = Error::from_io("/x", io::Error::other("boom"));
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = Error::NotFound(PathBuf::from("/missing"));
        assert_eq!(
            err.to_string(),
            "cannot access '/missing': No such file or directory"
        );
        let err = Error::NotADirectory(PathBuf::from("/a.txt"));
        assert_eq!(err.to_string(), "'/a.txt' is not a directory");
    }
}
