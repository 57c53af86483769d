//! Wildcard Pattern Matching
//!
//! Matches entity names against admin-typed patterns that use `*` as the only
//! wildcard. Used by the preview and purge commands to select currencies in
//! bulk.
//!
//! ## Pattern Shapes
//! - `Gold` - exact name, case-insensitive
//! - `*Credit` - ends with "Credit" (space-delimited word first, then raw suffix)
//! - `Player*` - starts with "Player" (space-delimited word first, then raw prefix)
//! - `Old*Coin` - starts with "Old" and ends with "Coin" without overlap
//! - `*Test*` - contains "Test"
//! - anything else - every `*` is dropped and the rest must appear somewhere
//!
//! Comparisons fold ASCII case only. No other normalization is applied.
//!
//! ## Examples
//! ```
//! use econadmin::matcher::matches;
//!
//! assert!(matches("Player Credit", "*Credit"));
//! assert!(matches("Goldfinger", "Gold*"));
//! assert!(!matches("Creditable", "*Credit"));
//! ```

use crate::entity::{usable_name, Entity};

/// Classification of a pattern by the count and position of `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternShape<'a> {
    /// No wildcard: whole-name equality.
    Exact(&'a str),
    /// `*suffix`
    Suffix(&'a str),
    /// `prefix*`
    Prefix(&'a str),
    /// `prefix*suffix`
    Surround { prefix: &'a str, suffix: &'a str },
    /// `*text*`
    Contains(&'a str),
    /// Any other arrangement; wildcards removed.
    Loose(String),
}

impl<'a> PatternShape<'a> {
    /// Classify a raw pattern. Never fails: every string has a shape.
    pub fn classify(pattern: &'a str) -> Self {
        let stars = pattern.matches('*').count();
        match stars {
            0 => PatternShape::Exact(pattern),
            1 => {
                let pos = pattern.find('*').unwrap_or(0);
                if pos == 0 {
                    PatternShape::Suffix(pattern[1..].trim_start())
                } else if pos == pattern.len() - 1 {
                    PatternShape::Prefix(pattern[..pos].trim_end())
                } else {
                    PatternShape::Surround {
                        prefix: &pattern[..pos],
                        suffix: &pattern[pos + 1..],
                    }
                }
            }
            2 if pattern.starts_with('*') && pattern.ends_with('*') => {
                PatternShape::Contains(pattern[1..pattern.len() - 1].trim())
            }
            _ => PatternShape::Loose(pattern.replace('*', "").trim().to_string()),
        }
    }

    /// Test a single name against this shape.
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            PatternShape::Exact(text) => eq_ignore_case(name, text),
            PatternShape::Suffix(suffix) => {
                ends_with_ignore_case(name, &format!(" {}", suffix))
                    || ends_with_ignore_case(name, suffix)
            }
            PatternShape::Prefix(prefix) => {
                starts_with_ignore_case(name, &format!("{} ", prefix))
                    || starts_with_ignore_case(name, prefix)
            }
            PatternShape::Surround { prefix, suffix } => {
                starts_with_ignore_case(name, prefix)
                    && ends_with_ignore_case(name, suffix)
                    && name.len() >= prefix.len() + suffix.len()
            }
            PatternShape::Contains(text) => contains_ignore_case(name, text),
            PatternShape::Loose(text) => contains_ignore_case(name, text),
        }
    }

    /// True when the pattern carried at least one `*`.
    pub fn is_wildcard(&self) -> bool {
        !matches!(self, PatternShape::Exact(_))
    }
}

/// Check whether `name` matches `pattern`.
pub fn matches(name: &str, pattern: &str) -> bool {
    PatternShape::classify(pattern).is_match(name)
}

/// Filter `candidates` down to those whose name matches `pattern`.
///
/// Candidates without a usable name are skipped. Output keeps the caller's
/// order.
pub fn match_all<'c, E: Entity>(pattern: &str, candidates: &'c [E]) -> Vec<&'c E> {
    let shape = PatternShape::classify(pattern);
    candidates
        .iter()
        .filter(|candidate| usable_name(*candidate).is_some_and(|name| shape.is_match(name)))
        .collect()
}

/// Select entities for bulk commands.
///
/// A plain name (no `*`) selects at most one entity, the first exact match.
/// A wildcard pattern selects every match via [`match_all`].
pub fn select_by_pattern<'c, E: Entity>(pattern: &str, candidates: &'c [E]) -> Vec<&'c E> {
    let shape = PatternShape::classify(pattern);
    if shape.is_wildcard() {
        return match_all(pattern, candidates);
    }
    candidates
        .iter()
        .find(|candidate| usable_name(*candidate).is_some_and(|name| shape.is_match(name)))
        .into_iter()
        .collect()
}

/// ASCII case-insensitive equality.
///
/// This is the single equality used by both exact patterns and the resolver's
/// exact-name step.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

pub(crate) fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    h.len() >= n.len() && h[..n.len()].eq_ignore_ascii_case(n)
}

pub(crate) fn ends_with_ignore_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    h.len() >= n.len() && h[h.len() - n.len()..].eq_ignore_ascii_case(n)
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() {
        return true;
    }
    h.windows(n.len()).any(|window| window.eq_ignore_ascii_case(n))
}
