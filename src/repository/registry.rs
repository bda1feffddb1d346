//! Registry trait for fetching artifact versions from a repository

#[cfg(test)]
use mockall::automock;

use crate::artifact::Coordinate;
use crate::repository::error::RegistryError;
use crate::repository::types::ArtifactVersions;

/// Trait for fetching the published versions of an artifact
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Base URL identifying this repository (also used as cache key)
    fn origin(&self) -> String;

    /// Fetches all versions published for the coordinate's `group:name`
    ///
    /// # Returns
    /// * `Ok(ArtifactVersions)` - Versions in repository order
    /// * `Err(RegistryError::NotFound)` - The repository does not host the artifact
    async fn fetch_all_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ArtifactVersions, RegistryError>;
}
