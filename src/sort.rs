//! Sort keys for sibling entries
//!
//! Every sort mode produces a [`SortKey`] whose `Ord` implementation is a
//! total order. All keys end with the raw, case-sensitive name so that two
//! different siblings never compare equal.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use regex::Regex;

use crate::tree::Entry;

/// Alternating runs of ASCII digits and everything else.
static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("RUNS regex is invalid"));

/// Ordering applied to the children of each directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// Plain text (case-sensitive)
    Name,
    /// Plain text (case-insensitive)
    #[default]
    Iname,
    /// Numbers by value, then text (case-sensitive)
    Sequence,
    /// Numbers by value, then text (case-insensitive)
    Isequence,
    /// Explorer-style: punctuation first, then numbers, then letters
    Winsequence,
    /// Modification time, oldest first
    Date,
}

/// Opaque comparable key for one entry under one sort mode.
///
/// Keys are only meaningful when compared with keys built for the same mode.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    primary: Primary,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Primary {
    Text(String),
    Tokens(Vec<Token>),
    /// Explorer tokens, then the folded name as a code-point tie-break.
    Explorer(Vec<Token>, String),
    Modified(Option<DateTime<Utc>>),
}

impl SortKey {
    pub fn new(name: &str, modified: Option<DateTime<Utc>>, mode: SortMode) -> Self {
        let primary = match mode {
            SortMode::Name => Primary::Text(name.to_string()),
            SortMode::Iname => Primary::Text(name.to_lowercase()),
            SortMode::Sequence => Primary::Tokens(natural_tokens(name)),
            SortMode::Isequence => Primary::Tokens(natural_tokens(&name.to_lowercase())),
            SortMode::Winsequence => {
                let folded = name.to_lowercase();
                Primary::Explorer(explorer_tokens(&folded), folded)
            }
            SortMode::Date => Primary::Modified(modified),
        };

        Self {
            primary,
            name: name.to_string(),
        }
    }

    pub fn for_entry(entry: &Entry, mode: SortMode) -> Self {
        Self::new(&entry.name, entry.modified, mode)
    }
}

/// Sort names in place with the given mode (modification times unknown).
pub fn sort_names<S: AsRef<str>>(names: &mut [S], mode: SortMode) {
    names.sort_by_cached_key(|name| SortKey::new(name.as_ref(), None, mode));
}

/// One character as seen by the token comparison.
///
/// `rank` groups characters before `ch` is consulted, which is how the
/// explorer mode pushes punctuation below alphanumerics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Glyph {
    rank: u8,
    ch: char,
}

#[derive(Debug, Clone)]
enum Token {
    Char(Glyph),
    /// `digits` has leading zeros stripped; `lead` is the glyph the whole
    /// number sorts as when it meets a character.
    Number { lead: Glyph, digits: String },
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Char(a), Token::Char(b)) => a.cmp(b),
            (Token::Number { digits: a, .. }, Token::Number { digits: b, .. }) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Token::Number { lead, .. }, Token::Char(glyph)) => lead.cmp(glyph),
            (Token::Char(glyph), Token::Number { lead, .. }) => glyph.cmp(lead),
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Token {}

fn tokenize(name: &str, lead: Glyph, glyph: impl Fn(char) -> Glyph) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(name.len());
    for run in RUNS.find_iter(name) {
        let text = run.as_str();
        if text.starts_with(|c: char| c.is_ascii_digit()) {
            let trimmed = text.trim_start_matches('0');
            let digits = if trimmed.is_empty() { "0" } else { trimmed };
            tokens.push(Token::Number {
                lead,
                digits: digits.to_string(),
            });
        } else {
            tokens.extend(text.chars().map(|c| Token::Char(glyph(c))));
        }
    }
    tokens
}

fn natural_tokens(name: &str) -> Vec<Token> {
    tokenize(name, Glyph { rank: 0, ch: '0' }, |ch| Glyph { rank: 0, ch })
}

fn explorer_tokens(folded: &str) -> Vec<Token> {
    tokenize(folded, Glyph { rank: 1, ch: '0' }, |ch| {
        if ch.is_alphanumeric() {
            Glyph { rank: 1, ch }
        } else {
            Glyph { rank: 0, ch: ' ' }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ALL_MODES: [SortMode; 6] = [
        SortMode::Name,
        SortMode::Iname,
        SortMode::Sequence,
        SortMode::Isequence,
        SortMode::Winsequence,
        SortMode::Date,
    ];

    const TRICKY: &[&str] = &[
        "file10", "file2", "File2", "file02", "file1", "_init", "-dash", " space", "a", "A", "b",
        "10", "9", "009", "z_1", "z-1", "z1", "zz", "a.b", "a_b", "ab", "Zeta", "éclair", "1a",
        "a1b2", "a1b10", "a01b2",
    ];

    fn sorted(names: &[&str], mode: SortMode) -> Vec<String> {
        let mut out: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        sort_names(&mut out, mode);
        out
    }

    #[test]
    fn test_sequence_orders_numbers_by_value() {
        assert_eq!(
            sorted(&["file2", "file10", "file1"], SortMode::Sequence),
            vec!["file1", "file2", "file10"]
        );
    }

    #[test]
    fn test_sequence_handles_huge_numbers() {
        let big = "n123456789012345678901234567890";
        let bigger = "n1234567890123456789012345678901";
        assert_eq!(
            sorted(&[bigger, big, "n9"], SortMode::Sequence),
            vec!["n9", big, bigger]
        );
    }

    #[test]
    fn test_sequence_is_case_sensitive() {
        assert_eq!(
            sorted(&["b1", "B1", "a1"], SortMode::Sequence),
            vec!["B1", "a1", "b1"]
        );
        assert_eq!(
            sorted(&["b1", "B2", "a1"], SortMode::Isequence),
            vec!["a1", "b1", "B2"]
        );
    }

    #[test]
    fn test_iname_is_case_insensitive() {
        assert_eq!(
            sorted(&["Banana", "apple"], SortMode::Iname),
            vec!["apple", "Banana"]
        );
        assert_eq!(
            sorted(&["Banana", "apple"], SortMode::Name),
            vec!["Banana", "apple"]
        );
    }

    #[test]
    fn test_iname_tie_breaks_on_raw_name() {
        assert_eq!(sorted(&["a", "A"], SortMode::Iname), vec!["A", "a"]);
    }

    #[test]
    fn test_leading_zeros_tie_break_on_name() {
        assert_eq!(
            sorted(&["file2", "file02"], SortMode::Sequence),
            vec!["file02", "file2"]
        );
    }

    #[test]
    fn test_winsequence_punctuation_then_numbers_then_letters() {
        assert_eq!(
            sorted(&["b", "a", "10", "_a", "9", "Ab"], SortMode::Winsequence),
            vec!["_a", "9", "10", "a", "Ab", "b"]
        );
    }

    #[test]
    fn test_winsequence_punctuation_below_alphanumerics_mid_name() {
        assert_eq!(
            sorted(&["ab", "a1", "a~", "a_"], SortMode::Winsequence),
            vec!["a_", "a~", "a1", "ab"]
        );
        assert_eq!(
            sorted(&["ab", "a1", "a~", "a_"], SortMode::Name),
            vec!["a1", "a_", "ab", "a~"]
        );
    }

    #[test]
    fn test_winsequence_punctuation_tie_breaks_by_code_point() {
        // '-' and '_' both compare as a space; the folded name decides.
        assert_eq!(
            sorted(&["z_1", "z-1"], SortMode::Winsequence),
            vec!["z-1", "z_1"]
        );
    }

    #[test]
    fn test_date_ascending_with_name_tie_break() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();

        let mut keys = vec![
            ("new", SortKey::new("new", late, SortMode::Date)),
            ("old_b", SortKey::new("old_b", early, SortMode::Date)),
            ("old_a", SortKey::new("old_a", early, SortMode::Date)),
            ("unknown", SortKey::new("unknown", None, SortMode::Date)),
        ];
        keys.sort_by(|a, b| a.1.cmp(&b.1));
        let names: Vec<_> = keys.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["unknown", "old_a", "old_b", "new"]);
    }

    #[test]
    fn test_every_mode_is_a_total_order() {
        for mode in ALL_MODES {
            let keys: Vec<SortKey> = TRICKY
                .iter()
                .map(|n| SortKey::new(n, None, mode))
                .collect();

            for (i, a) in keys.iter().enumerate() {
                assert_eq!(a.cmp(a), Ordering::Equal, "{mode:?} reflexive");
                for (j, b) in keys.iter().enumerate() {
                    if i != j {
                        assert_ne!(a.cmp(b), Ordering::Equal, "{mode:?} distinct names");
                    }
                    assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{mode:?} antisymmetric");
                    for c in &keys {
                        if a < b && b < c {
                            assert!(a < c, "{mode:?} transitive: {a:?} {b:?} {c:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_sorting_is_deterministic() {
        for mode in ALL_MODES {
            let mut reversed: Vec<&str> = TRICKY.to_vec();
            reversed.reverse();
            assert_eq!(sorted(TRICKY, mode), sorted(&reversed, mode), "{mode:?}");
        }
    }
}
