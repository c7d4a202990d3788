//! Exclusion patterns for tree walking
//!
//! Patterns are shell globs matched case-insensitively against an entry's
//! bare name and against its root-relative path. Wildcards never cross a
//! `/`. A pattern that is not a valid glob is compared literally instead of
//! being rejected.

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match one candidate (a name or a relative path) against one pattern.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    Matcher::new(pattern).matches(&normalize(candidate))
}

enum Matcher {
    Glob(Pattern),
    Literal(String),
}

impl Matcher {
    fn new(pattern: &str) -> Self {
        let pattern = normalize(pattern);
        match Pattern::new(&pattern) {
            Ok(glob) => Matcher::Glob(glob),
            Err(_) => Matcher::Literal(pattern.to_lowercase()),
        }
    }

    fn matches(&self, candidate: &str) -> bool {
        match self {
            Matcher::Glob(glob) => glob.matches_with(candidate, MATCH_OPTIONS),
            Matcher::Literal(text) => candidate.to_lowercase() == *text,
        }
    }
}

/// Use `/` throughout and drop a leading `./`, so `.\temp`, `./temp` and
/// `temp` all mean the same thing.
fn normalize(text: &str) -> String {
    let mut text = text.replace('\\', "/");
    while let Some(rest) = text.strip_prefix("./") {
        text = rest.to_string();
    }
    text
}

/// Compiled, ordered set of exclusion patterns.
#[derive(Default)]
pub struct ExcludeFilter {
    matchers: Vec<Matcher>,
}

impl ExcludeFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            matchers: patterns.iter().map(|p| Matcher::new(p.as_ref())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Check an entry by bare name and by its path relative to the walk root.
    pub fn is_excluded(&self, name: &str, relative: &str) -> bool {
        if self.matchers.is_empty() {
            return false;
        }
        let relative = normalize(relative);
        self.matchers
            .iter()
            .any(|m| m.matches(name) || m.matches(&relative))
    }
}
