//! Path styles and decorators
//!
//! A [`PathFormatter`] turns an entry into the exact text shown for it:
//! first the path style picks absolute, relative or bare-name form, then the
//! decorators adjust the leading `./` and the separator convention.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use clap::ValueEnum;
use pathdiff::diff_paths;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tree::{Entry, display_name};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PathStyle {
    /// Absolute paths
    Full,
    /// Relative to the listed directory
    Rel,
    /// Relative, prefixed with the listed directory's name
    #[default]
    RelBase,
    /// Bare names only
    FilesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decorator {
    /// Forward slashes
    Unix,
    /// Backslashes
    Windows,
    /// Force a leading ./ on relative paths
    RelLeader,
    /// Strip any leading ./ from relative paths
    NoLeader,
    /// No decoration
    None,
}

/// The set of decorators in effect. Empty means paths are left as built.
///
/// When both are present, `unix` wins over `windows` and `no-leader` wins
/// over `rel-leader`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decorators {
    unix: bool,
    windows: bool,
    rel_leader: bool,
    no_leader: bool,
}

impl Decorators {
    pub fn none() -> Self {
        Self::default()
    }

    /// Separator convention of the running platform.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::none().with(Decorator::Windows)
        } else {
            Self::none().with(Decorator::Unix)
        }
    }

    pub fn with(mut self, decorator: Decorator) -> Self {
        match decorator {
            Decorator::Unix => self.unix = true,
            Decorator::Windows => self.windows = true,
            Decorator::RelLeader => self.rel_leader = true,
            Decorator::NoLeader => self.no_leader = true,
            Decorator::None => {}
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    fn separator(&self) -> Option<char> {
        if self.unix {
            Some('/')
        } else if self.windows {
            Some('\\')
        } else {
            None
        }
    }

    /// Decorate a path string. Leader decorators only touch `relative` paths.
    pub fn apply(&self, path: &str, relative: bool) -> String {
        let mut out = path.to_string();

        if relative {
            if self.no_leader {
                out = strip_leader(&out).to_string();
            } else if self.rel_leader && !has_leader(&out) {
                let sep = self.separator().unwrap_or(MAIN_SEPARATOR);
                out = format!(".{sep}{out}");
            }
        }

        match self.separator() {
            Some('/') => out.replace('\\', "/"),
            Some(sep) => out.replace('/', &sep.to_string()),
            None => out,
        }
    }
}

impl FromIterator<Decorator> for Decorators {
    fn from_iter<I: IntoIterator<Item = Decorator>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

fn has_leader(path: &str) -> bool {
    path == "."
        || path == ".."
        || ["./", ".\\", "../", "..\\"]
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

fn strip_leader(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("./").or_else(|| path.strip_prefix(".\\")) {
        path = rest;
    }
    path
}

/// Drive or UNC prefix, lower-cased; `None` on platforms without volumes.
fn volume(path: &Path) -> Option<String> {
    match path.components().next() {
        Some(Component::Prefix(prefix)) => {
            Some(prefix.as_os_str().to_string_lossy().to_lowercase())
        }
        _ => None,
    }
}

/// Formats entries of one walk according to the configured path style.
pub struct PathFormatter<'a> {
    root: &'a Path,
    style: PathStyle,
    decorators: Decorators,
    strict_rel: bool,
    label: String,
}

impl<'a> PathFormatter<'a> {
    /// `root` is the resolved absolute root of the walk.
    pub fn new(config: &Config, root: &'a Path) -> Self {
        Self {
            root,
            style: config.path_style,
            decorators: config.decorators,
            strict_rel: config.strict_rel,
            label: config
                .base_label
                .clone()
                .unwrap_or_else(|| display_name(root)),
        }
    }

    pub fn format(&self, entry: &Entry) -> Result<String> {
        self.format_path(&entry.path, &entry.name)
    }

    pub fn format_path(&self, path: &Path, name: &str) -> Result<String> {
        match self.style {
            PathStyle::Full => Ok(self.absolute(path)),
            PathStyle::FilesOnly => Ok(self.format_name(name)),
            PathStyle::Rel | PathStyle::RelBase => {
                let Some(relative) = self.relative(path)? else {
                    return Ok(self.absolute(path));
                };
                let text = match (self.style, relative.as_os_str().is_empty()) {
                    (PathStyle::Rel, true) => ".".to_string(),
                    (PathStyle::Rel, false) => relative.to_string_lossy().into_owned(),
                    (_, true) => self.label.clone(),
                    (_, false) => Path::new(&self.label)
                        .join(&relative)
                        .to_string_lossy()
                        .into_owned(),
                };
                Ok(self.decorators.apply(&text, true))
            }
        }
    }

    /// A bare name, as used for children inside summary braces.
    pub fn format_name(&self, name: &str) -> String {
        self.decorators.apply(name, false)
    }

    fn absolute(&self, path: &Path) -> String {
        self.decorators.apply(&path.to_string_lossy(), false)
    }

    /// Path relative to the root, or `None` when it would cross a volume
    /// boundary and strict mode is off.
    fn relative(&self, path: &Path) -> Result<Option<PathBuf>> {
        let relative = if volume(path) == volume(self.root) {
            diff_paths(path, self.root)
        } else {
            None
        };

        match relative {
            Some(relative) => Ok(Some(relative)),
            None if self.strict_rel => Err(Error::CrossDrive {
                path: path.to_path_buf(),
                root: self.root.to_path_buf(),
            }),
            None => Ok(None),
        }
    }
}
