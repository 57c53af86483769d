//! Entity Name Resolution
//!
//! Resolves an admin-typed token to a single account or currency, making the
//! admin commands usable without knowing internal IDs.
//!
//! ## Search Priority
//! 1. Numeric ID: a token made of digits (optionally signed) only ever matches
//!    by id, even when it is too large to be one
//! 2. Exact name: case-insensitive, first candidate wins
//! 3. Substring: case-insensitive, must be unique
//!
//! Quoted tokens (`"Player One"`) resolve exactly like the unquoted text.
//!
//! ## Examples
//! ```
//! use econadmin::entity::CurrencyRecord;
//! use econadmin::resolver::{resolve, Resolution};
//!
//! let currencies = vec![CurrencyRecord::new(1, "Gold"), CurrencyRecord::new(2, "Gold Bar")];
//!
//! assert!(matches!(resolve("Gold", &currencies), Resolution::Found(c) if c.id == 1));
//! assert!(matches!(resolve("gold b", &currencies), Resolution::Found(c) if c.id == 2));
//! assert!(matches!(resolve("old", &currencies), Resolution::Ambiguous { total: 2, .. }));
//! assert!(matches!(resolve("7", &currencies), Resolution::NotFound));
//! ```

use log::debug;

use crate::entity::{usable_name, Entity};
use crate::logutil::escape_log;
use crate::matcher::{contains_ignore_case, eq_ignore_case};

/// Maximum number of candidates carried by an ambiguous result.
pub const AMBIGUOUS_PREVIEW_LIMIT: usize = 10;

/// Result of resolving a token
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a, E> {
    /// Single unambiguous match
    Found(&'a E),

    /// Nothing matched (also returned for blank tokens)
    NotFound,

    /// Several substring matches - admin must be more specific
    Ambiguous {
        /// First matches in candidate order, at most [`AMBIGUOUS_PREVIEW_LIMIT`]
        candidates: Vec<&'a E>,
        /// Number of candidates that matched, including those not previewed
        total: usize,
    },
}

impl<'a, E> Resolution<'a, E> {
    /// The matched entity, if exactly one was found.
    pub fn found(&self) -> Option<&'a E> {
        match self {
            Resolution::Found(entity) => Some(*entity),
            _ => None,
        }
    }
}

/// Normalize a raw token
///
/// - Trim surrounding whitespace
/// - Strip one pair of enclosing double quotes
/// - Trim again
pub fn normalize_token(token: &str) -> &str {
    let trimmed = token.trim();
    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.trim()
}

/// Resolve a token against a candidate list
///
/// ## Returns
/// - `Resolution::Found(entity)` - id hit, exact name hit, or unique substring hit
/// - `Resolution::Ambiguous { .. }` - several substring hits
/// - `Resolution::NotFound` - blank token, unknown id, or no name hit
pub fn resolve<'a, E: Entity>(token: &str, candidates: &'a [E]) -> Resolution<'a, E> {
    let query = normalize_token(token);
    if query.is_empty() {
        return Resolution::NotFound;
    }

    if is_numeric(query) {
        let Ok(id) = query.parse::<i64>() else {
            debug!("'{}' is numeric but out of id range", escape_log(query));
            return Resolution::NotFound;
        };
        debug!("resolving '{}' as id {}", escape_log(query), id);
        return match candidates.iter().find(|candidate| candidate.id() == id) {
            Some(entity) => Resolution::Found(entity),
            None => Resolution::NotFound,
        };
    }

    if let Some(entity) = find_by_name(query, candidates) {
        return Resolution::Found(entity);
    }

    let mut matches: Vec<&E> = candidates
        .iter()
        .filter(|candidate| {
            usable_name(*candidate).is_some_and(|name| contains_ignore_case(name, query))
        })
        .collect();

    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Found(matches[0]),
        total => {
            debug!(
                "'{}' is ambiguous across {} candidates",
                escape_log(query),
                total
            );
            matches.truncate(AMBIGUOUS_PREVIEW_LIMIT);
            Resolution::Ambiguous {
                candidates: matches,
                total,
            }
        }
    }
}

/// First candidate whose name equals `name`, ignoring ASCII case.
pub fn find_by_name<'a, E: Entity>(name: &str, candidates: &'a [E]) -> Option<&'a E> {
    candidates
        .iter()
        .find(|candidate| usable_name(*candidate).is_some_and(|n| eq_ignore_case(n, name)))
}

/// Optional sign followed by at least one ASCII digit.
fn is_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(|c| c == '+' || c == '-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Format the disambiguation list for an ambiguous result
///
/// One line per previewed candidate with its id, plus a trailer when the
/// preview was capped.
pub fn format_candidates<E: Entity>(candidates: &[&E], total: usize) -> Vec<String> {
    let mut lines: Vec<String> = candidates
        .iter()
        .map(|candidate| format!("  • {} (id {})", candidate.display_name(), candidate.id()))
        .collect();
    if total > candidates.len() {
        lines.push(format!("  ... and {} more", total - candidates.len()));
    }
    lines
}
