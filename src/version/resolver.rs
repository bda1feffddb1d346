//! Version selection against a published version list
//!
//! Given the versions a repository publishes for an artifact, pick the single
//! version a constraint asks for.

use std::cmp::Ordering;

use crate::version::constraint::{VersionConstraint, compare_to_wildcard, unqualified_floor};
use crate::version::error::ResolveError;
use crate::version::parsed::ParsedVersion;

/// Resolve a constraint against candidate version strings.
///
/// Exact constraints return the first candidate equal to the target. Wildcard
/// constraints return the highest candidate at or above the unqualified floor
/// and within the wildcard line; among equal candidates the first one wins.
pub fn resolve<I, S>(
    candidates: I,
    constraint: &VersionConstraint,
) -> Result<ParsedVersion, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates = parse_candidates(candidates)?;
    if candidates.is_empty() {
        return Err(ResolveError::EmptyVersionList);
    }

    let found = match constraint {
        VersionConstraint::Snapshot(target) => {
            return Err(ResolveError::UnsupportedSnapshot(target.raw().to_string()));
        }
        VersionConstraint::Exact(target) => candidates.iter().find(|v| *v == target),
        VersionConstraint::Wildcard(target) => {
            let floor = unqualified_floor(target);
            highest(candidates.iter().filter(|v| {
                **v >= floor && compare_to_wildcard(v.items(), target.items()) != Ordering::Greater
            }))
        }
    };

    found.cloned().ok_or_else(|| ResolveError::NoMatchingVersion {
        target: constraint.target().raw().to_string(),
        candidates: candidates.iter().map(|v| v.raw().to_string()).collect(),
    })
}

/// Highest candidate without any constraint
pub fn latest<I, S>(candidates: I) -> Result<ParsedVersion, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates = parse_candidates(candidates)?;
    highest(candidates.iter())
        .cloned()
        .ok_or(ResolveError::EmptyVersionList)
}

fn parse_candidates<I, S>(candidates: I) -> Result<Vec<ParsedVersion>, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|raw| ParsedVersion::parse(raw.as_ref()).map_err(ResolveError::from))
        .collect()
}

/// Maximum by version order, keeping the first of equal maxima
fn highest<'a>(versions: impl Iterator<Item = &'a ParsedVersion>) -> Option<&'a ParsedVersion> {
    versions.fold(None, |best, v| match best {
        Some(b) if *v <= *b => Some(b),
        _ => Some(v),
    })
}
