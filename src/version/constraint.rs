//! Version constraints derived from a requested version string
//!
//! - `1.5.3` is an exact request
//! - `1.5.+` asks for the highest version at or above `1.5` within the `1.5` line
//! - `1.5-SNAPSHOT` names a snapshot, which cannot be resolved from a version list

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::VersionError;
use crate::version::parsed::ParsedVersion;
use crate::version::token::{Token, compare_optional};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    Exact(ParsedVersion),
    Wildcard(ParsedVersion),
    Snapshot(ParsedVersion),
}

impl VersionConstraint {
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        ParsedVersion::parse(raw).map(Self::from)
    }

    /// The requested version, including any wildcard marker
    pub fn target(&self) -> &ParsedVersion {
        match self {
            VersionConstraint::Exact(v)
            | VersionConstraint::Wildcard(v)
            | VersionConstraint::Snapshot(v) => v,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, VersionConstraint::Wildcard(_))
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, VersionConstraint::Snapshot(_))
    }
}

impl From<ParsedVersion> for VersionConstraint {
    fn from(version: ParsedVersion) -> Self {
        if last_leaf(version.items()).is_some_and(Token::is_wildcard) {
            VersionConstraint::Wildcard(version)
        } else if contains_snapshot(version.items()) {
            VersionConstraint::Snapshot(version)
        } else {
            VersionConstraint::Exact(version)
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target())
    }
}

/// The target version with its trailing qualifier removed.
///
/// A trailing string token is dropped, as is a trailing single-item sub-list
/// unless that item is a build number.
pub fn unqualified_floor(version: &ParsedVersion) -> ParsedVersion {
    let mut items = version.items().to_vec();
    match items.last() {
        Some(Token::String(_)) => {
            items.pop();
        }
        Some(Token::List(sub)) if sub.len() == 1 && !matches!(sub[0], Token::Integer(_)) => {
            items.pop();
        }
        _ => {}
    }
    ParsedVersion::from_items(items)
}

/// Compare a candidate against a wildcard target.
///
/// Positions before the wildcard compare as usual; reaching the wildcard means
/// the candidate lies within the requested line, whatever follows.
pub(crate) fn compare_to_wildcard(candidate: &[Token], target: &[Token]) -> Ordering {
    for i in 0..candidate.len().max(target.len()) {
        let ord = match (candidate.get(i), target.get(i)) {
            (_, Some(t)) if t.is_wildcard() => return Ordering::Less,
            (Some(Token::List(c)), Some(Token::List(t))) => compare_to_wildcard(c, t),
            (c, t) => compare_optional(c, t),
        };
        if ord.is_ne() {
            return ord;
        }
    }
    Ordering::Equal
}

fn last_leaf(items: &[Token]) -> Option<&Token> {
    match items.last()? {
        Token::List(sub) => last_leaf(sub),
        leaf => Some(leaf),
    }
}

fn contains_snapshot(items: &[Token]) -> bool {
    items.iter().any(|item| match item {
        Token::String(value) => value == "snapshot",
        Token::List(sub) => contains_snapshot(sub),
        Token::Integer(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parsed::parse_version;
    use rstest::rstest;

    fn v(raw: &str) -> ParsedVersion {
        parse_version(raw).unwrap()
    }

    #[rstest]
    #[case("1.5.3", false, false)]
    #[case("1.5.+", true, false)]
    #[case("1.5+", true, false)]
    #[case("+", true, false)]
    #[case("1.5-+", true, false)]
    #[case("1.5-SNAPSHOT", false, true)]
    #[case("1.0-alpha-1-snapshot", false, true)]
    #[case("1.0-rc1", false, false)]
    fn parse_classifies_constraint(
        #[case] raw: &str,
        #[case] wildcard: bool,
        #[case] snapshot: bool,
    ) {
        let constraint = VersionConstraint::parse(raw).unwrap();

        assert_eq!(constraint.is_wildcard(), wildcard);
        assert_eq!(constraint.is_snapshot(), snapshot);
        assert_eq!(constraint.target().raw(), raw);
    }

    #[rstest]
    #[case("1.5.+", "[1,5]")]
    #[case("1.0.+", "[1]")]
    #[case("1.5-rc", "[1,5]")]
    #[case("1.5-7", "[1,5,[7]]")]
    #[case("1.5-alpha-1", "[1,5,[alpha,[1]]]")]
    #[case("1.5.3", "[1,5,3]")]
    #[case("+", "[]")]
    fn unqualified_floor_strips_trailing_qualifier(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unqualified_floor(&v(raw)).canonical(), expected);
    }

    #[rstest]
    #[case("1.5", "1.5.+", Ordering::Less)]
    #[case("1.5.0", "1.5.+", Ordering::Less)]
    #[case("1.5.99", "1.5.+", Ordering::Less)]
    #[case("1.5.1-rc1", "1.5.+", Ordering::Less)]
    #[case("1.6", "1.5.+", Ordering::Greater)]
    #[case("1.4.9", "1.5.+", Ordering::Less)]
    #[case("1.1", "1.0.+", Ordering::Greater)]
    #[case("1.0.7", "1.0.+", Ordering::Less)]
    #[case("9.9", "+", Ordering::Less)]
    fn compare_to_wildcard_caps_at_marker(
        #[case] candidate: &str,
        #[case] target: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(
            compare_to_wildcard(v(candidate).items(), v(target).items()),
            expected
        );
    }
}
