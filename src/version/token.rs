//! Version token model
//!
//! A parsed version is a tree of [`Token`]s. The root is always a list; every
//! `-` in the source string opens a nested list one level deeper.
//!
//! ```text
//! "2.0.1-xyz"          => [2,0,1,[xyz]]
//! "1.0-alpha-1"        => [1,[alpha,[1]]]
//! "2.0-0-SNAPSHOT"     => [2,[snapshot]]
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Qualifiers with a well-known rank, lowest first. The empty string is a release.
const QUALIFIERS: &[&str] = &["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Synonyms collapsed before ranking.
const ALIASES: &[(&str, &str)] = &[("ga", ""), ("final", ""), ("cr", "rc")];

/// Index of the release (empty) qualifier in [`QUALIFIERS`].
const RELEASE_RANK: usize = 5;

/// Qualifier marking a wildcard ("greater or equal") version specifier.
pub const WILDCARD: &str = "+";

/// One node of a parsed version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A run of digits
    Integer(u64),
    /// A run of non-digit characters, already lower-cased and aliased
    String(String),
    /// The whole version or a hyphen-delimited sub-group
    List(Vec<Token>),
}

impl Token {
    /// Build a string token, expanding single-letter shorthands and synonyms.
    ///
    /// `a1` means `alpha-1`, `b1` means `beta-1` and `m1` means `milestone-1`,
    /// but only when the letter is directly followed by a digit.
    pub fn qualifier(value: &str, followed_by_digit: bool) -> Self {
        let value = match value {
            "a" if followed_by_digit => "alpha",
            "b" if followed_by_digit => "beta",
            "m" if followed_by_digit => "milestone",
            other => other,
        };

        let value = ALIASES
            .iter()
            .find(|(alias, _)| *alias == value)
            .map_or(value, |(_, target)| *target);

        Token::String(value.to_string())
    }

    /// Returns true when the token carries the zero value of its variant.
    ///
    /// Such tokens are dropped from the tail of a list by [`normalize_items`].
    pub fn is_null(&self) -> bool {
        match self {
            Token::Integer(value) => *value == 0,
            Token::String(value) => qualifier_rank(value) == (RELEASE_RANK, ""),
            Token::List(items) => items.is_empty(),
        }
    }

    /// Returns true for the `+` wildcard qualifier
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Token::String(value) if value == WILDCARD)
    }

    /// Total order over tokens.
    ///
    /// Integers outrank strings and lists, strings outrank lists, strings are
    /// ranked by qualifier and lists compare position by position.
    pub fn compare(&self, other: &Token) -> Ordering {
        match (self, other) {
            (Token::Integer(a), Token::Integer(b)) => a.cmp(b),
            (Token::Integer(_), _) => Ordering::Greater,
            (Token::String(_), Token::Integer(_)) => Ordering::Less,
            (Token::String(a), Token::String(b)) => qualifier_rank(a).cmp(&qualifier_rank(b)),
            (Token::String(_), Token::List(_)) => Ordering::Greater,
            (Token::List(_), Token::Integer(_) | Token::String(_)) => Ordering::Less,
            (Token::List(a), Token::List(b)) => compare_items(a, b),
        }
    }

    /// Compare against a missing token.
    ///
    /// A missing token behaves like the zero value of the present token's variant:
    /// `0`, the release qualifier, or an empty list.
    pub fn compare_absent(&self) -> Ordering {
        match self {
            Token::Integer(value) => value.cmp(&0),
            Token::String(value) => qualifier_rank(value).cmp(&(RELEASE_RANK, "")),
            Token::List(items) => compare_items(items, &[]),
        }
    }

    /// Recursively drop trailing null items from this token and its children
    pub fn normalize(&mut self) {
        if let Token::List(items) = self {
            for item in items.iter_mut() {
                item.normalize();
            }
            normalize_items(items);
        }
    }
}

/// Compare two optional tokens, treating `None` as an absent position.
pub fn compare_optional(left: Option<&Token>, right: Option<&Token>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.compare(r),
        (Some(l), None) => l.compare_absent(),
        (None, Some(r)) => r.compare_absent().reverse(),
        (None, None) => Ordering::Equal,
    }
}

/// Lexicographic comparison of two item lists, padding the shorter one with absent tokens.
pub fn compare_items(left: &[Token], right: &[Token]) -> Ordering {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| compare_optional(left.get(i), right.get(i)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Remove trailing null items from a list (non-recursive).
pub fn normalize_items(items: &mut Vec<Token>) {
    while items.last().is_some_and(Token::is_null) {
        items.pop();
    }
}

/// Render items as a dotted version string (`1.0-alpha-1`).
pub fn render_items(items: &[Token]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        match item {
            Token::List(sub) => {
                out.push('-');
                out.push_str(&render_items(sub));
            }
            other => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(&other.to_string());
            }
        }
    }
    out
}

/// Rank key of a qualifier.
///
/// Known qualifiers rank by table position; unknown ones come after every known
/// qualifier and order lexically among themselves.
fn qualifier_rank(value: &str) -> (usize, &str) {
    match QUALIFIERS.iter().position(|q| *q == value) {
        Some(index) => (index, ""),
        None => (QUALIFIERS.len(), value),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(value) => write!(f, "{}", value),
            Token::String(value) => f.write_str(value),
            Token::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
