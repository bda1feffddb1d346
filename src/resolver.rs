//! Artifact resolution across configured repositories
//!
//! Ties the pure version core to the repository layer: fetch the published
//! version list (from cache when fresh), then pick the version the
//! coordinate asks for.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::artifact::Coordinate;
use crate::repository::cache::VersionStorer;
use crate::repository::maven::artifact_url;
use crate::repository::registry::Registry;
use crate::version::{self, ParsedVersion, ResolveError, VersionConstraint};

#[derive(Debug, Error)]
pub enum ArtifactResolveError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No repository serves {artifact}{}", format_reasons(.reasons))]
    NoRepository {
        artifact: String,
        reasons: Vec<String>,
    },
}

fn format_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        String::new()
    } else {
        format!(" ({})", reasons.join("; "))
    }
}

/// A coordinate pinned to a concrete version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    /// Base URL of the repository the version list came from
    pub repository: String,
    pub version: ParsedVersion,
}

impl ResolvedArtifact {
    pub fn url(&self) -> Option<String> {
        artifact_url(&self.repository, &self.coordinate)
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

pub struct ArtifactResolver {
    registries: Vec<Arc<dyn Registry>>,
    storer: Option<Arc<dyn VersionStorer>>,
}

impl ArtifactResolver {
    /// Repositories are tried in the given order
    pub fn new(registries: Vec<Arc<dyn Registry>>) -> Self {
        Self {
            registries,
            storer: None,
        }
    }

    pub fn with_storer(mut self, storer: Arc<dyn VersionStorer>) -> Self {
        self.storer = Some(storer);
        self
    }

    /// Version list of the first repository serving the artifact.
    ///
    /// Returns the repository's base URL together with its versions.
    pub async fn fetch_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<(String, Vec<String>), ArtifactResolveError> {
        let artifact = coordinate.key();
        let mut reasons = Vec::new();

        for registry in &self.registries {
            let origin = registry.origin();

            if let Some(versions) = self.cached_versions(&origin, &artifact) {
                debug!("Using cached versions of {} from {}", artifact, origin);
                return Ok((origin, versions));
            }

            match registry.fetch_all_versions(coordinate).await {
                Ok(found) => {
                    info!(
                        "Fetched {} versions of {} from {}",
                        found.versions.len(),
                        artifact,
                        origin
                    );
                    self.store_versions(&origin, &artifact, found.versions.clone());
                    return Ok((origin, found.versions));
                }
                Err(e) => {
                    warn!("{} is not available from {}: {}", artifact, origin, e);
                    reasons.push(format!("{}: {}", origin, e));
                }
            }
        }

        Err(ArtifactResolveError::NoRepository { artifact, reasons })
    }

    /// Pin the coordinate to a concrete version.
    ///
    /// Snapshot requests are rejected before any repository is contacted. A
    /// coordinate without a version resolves to the latest published one.
    pub async fn resolve(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ResolvedArtifact, ArtifactResolveError> {
        let constraint = coordinate.constraint();
        if let Some(VersionConstraint::Snapshot(target)) = &constraint {
            return Err(ResolveError::UnsupportedSnapshot(target.raw().to_string()).into());
        }

        let (repository, versions) = self.fetch_versions(coordinate).await?;
        let candidates = parseable(&coordinate.key(), &versions);

        let version = match &constraint {
            Some(constraint) => version::resolve(candidates, constraint)?,
            None => version::latest(candidates)?,
        };

        info!(
            "Resolved {} to {} from {}",
            coordinate,
            version.raw(),
            repository
        );

        Ok(ResolvedArtifact {
            coordinate: coordinate.with_version(version.clone()),
            repository,
            version,
        })
    }

    /// Latest published version, ignoring any version in the coordinate
    pub async fn latest(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ResolvedArtifact, ArtifactResolveError> {
        let unversioned = Coordinate {
            version: None,
            ..coordinate.clone()
        };
        self.resolve(&unversioned).await
    }

    fn cached_versions(&self, origin: &str, artifact: &str) -> Option<Vec<String>> {
        let storer = self.storer.as_ref()?;

        let fresh = storer
            .is_fresh(origin, artifact)
            .inspect_err(|e| warn!("Failed to read cache for {}: {}", artifact, e))
            .unwrap_or(false);
        if !fresh {
            return None;
        }

        storer
            .get_versions(origin, artifact)
            .inspect_err(|e| warn!("Failed to read cache for {}: {}", artifact, e))
            .ok()
            .filter(|versions| !versions.is_empty())
    }

    fn store_versions(&self, origin: &str, artifact: &str, versions: Vec<String>) {
        if let Some(storer) = &self.storer {
            let _ = storer
                .replace_versions(origin, artifact, versions)
                .inspect_err(|e| warn!("Failed to cache versions of {}: {}", artifact, e));
        }
    }
}

/// Candidates that parse as versions; the rest are logged and skipped
fn parseable<'a>(artifact: &str, versions: &'a [String]) -> Vec<&'a str> {
    versions
        .iter()
        .filter(|raw| {
            ParsedVersion::parse(raw)
                .inspect_err(|e| warn!("Skipping version of {}: {}", artifact, e))
                .is_ok()
        })
        .map(String::as_str)
        .collect()
}
