//! Conventional `major.minor.incremental-build` view of a parsed version
//!
//! This projection exists for display only. Ordering always goes through the
//! full token tree: two versions may project differently and still be equal.

use std::fmt;

use crate::version::parsed::ParsedVersion;
use crate::version::token::Token;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub incremental: u64,
    pub build: u64,
    pub qualifier: Option<String>,
}

/// Derive the semantic projection of a parsed version
pub fn to_semantic(version: &ParsedVersion) -> SemanticVersion {
    SemanticVersion::from(version)
}

impl From<&ParsedVersion> for SemanticVersion {
    fn from(version: &ParsedVersion) -> Self {
        let mut rest = version.items();
        let mut numbers = [0u64; 3];

        for slot in numbers.iter_mut() {
            match rest.split_first() {
                Some((Token::Integer(value), tail)) => {
                    *slot = *value;
                    rest = tail;
                }
                _ => break,
            }
        }

        // Components past the incremental carry no name
        while let Some((Token::Integer(_), tail)) = rest.split_first() {
            rest = tail;
        }

        // A hyphen followed by a lone item is either a build number or a bare qualifier
        let mut build = None;
        if let Some((Token::List(sub), _)) = rest.split_first() {
            if sub.len() == 1 {
                rest = sub.as_slice();
                if let Some((Token::Integer(value), tail)) = rest.split_first() {
                    build = Some(*value);
                    rest = tail;
                }
            }
        }

        let raw = version.raw();
        let qualifier = match (build, raw.split_once('-')) {
            (None, Some((_, suffix))) => Some(suffix.to_string()),
            _ => match rest.first() {
                Some(Token::String(value)) => Some(value.clone()),
                _ => None,
            },
        }
        .filter(|q| !q.is_empty());

        let [major, minor, incremental] = numbers;
        Self {
            major,
            minor,
            incremental,
            build: build.unwrap_or(0),
            qualifier,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.incremental)?;
        if self.build > 0 {
            write!(f, "-{}", self.build)?;
        }
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{}", qualifier)?;
        }
        Ok(())
    }
}
