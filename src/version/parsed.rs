//! Parsed, comparable version

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::version::error::VersionError;
use crate::version::token::{Token, compare_items, normalize_items, render_items};
use crate::version::tokenizer::tokenize;

/// A version string parsed into a normalized token tree.
///
/// Equality and hashing use the canonical rendering of the tree, ordering uses
/// the token comparator; both agree for every tree the tokenizer produces.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    raw: String,
    items: Vec<Token>,
    canonical: String,
}

/// Parse a version string
pub fn parse_version(raw: &str) -> Result<ParsedVersion, VersionError> {
    ParsedVersion::parse(raw)
}

/// Compare two parsed versions
pub fn compare(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    a.cmp(b)
}

impl ParsedVersion {
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let items = tokenize(raw)?;
        Ok(Self::with_raw(raw.trim().to_string(), items))
    }

    /// Build a version from an externally constructed token list.
    ///
    /// The list is normalized recursively and the raw string is rendered from it.
    pub fn from_items(mut items: Vec<Token>) -> Self {
        items.iter_mut().for_each(Token::normalize);
        normalize_items(&mut items);
        Self::with_raw(render_items(&items), items)
    }

    fn with_raw(raw: String, items: Vec<Token>) -> Self {
        let canonical = Token::List(items.clone()).to_string();
        Self {
            raw,
            items,
            canonical,
        }
    }

    /// The version string as given (surrounding whitespace trimmed)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Bracketed rendering of the normalized tree, e.g. `[2,0,1,[xyz]]`
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Items of the root list
    pub fn items(&self) -> &[Token] {
        &self.items
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ParsedVersion {}

impl Hash for ParsedVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_items(&self.items, &other.items)
    }
}

impl FromStr for ParsedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
