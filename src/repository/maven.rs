//! Maven repository (HTTP layout) implementation

use std::time::Duration;

use tracing::{debug, warn};

use crate::artifact::Coordinate;
use crate::config::{FETCH_TIMEOUT_MS, USER_AGENT};
use crate::repository::error::RegistryError;
use crate::repository::metadata::parse_metadata;
use crate::repository::registry::Registry;
use crate::repository::types::ArtifactVersions;

/// Default base URL for Maven Central
pub const DEFAULT_BASE_URL: &str = "https://repo.maven.apache.org/maven2";

/// Registry implementation reading `maven-metadata.xml` from a Maven repository
pub struct MavenRepository {
    client: reqwest::Client,
    base_url: String,
}

impl MavenRepository {
    /// Creates a new MavenRepository with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the artifact's `maven-metadata.xml`
    pub fn metadata_url(&self, coordinate: &Coordinate) -> String {
        format!("{}/{}", self.base_url, coordinate.metadata_path())
    }

    /// Download URL of the artifact file, if the coordinate names a version
    pub fn artifact_url(&self, coordinate: &Coordinate) -> Option<String> {
        artifact_url(&self.base_url, coordinate)
    }
}

/// Download URL of a coordinate's file below a repository base URL
pub fn artifact_url(base_url: &str, coordinate: &Coordinate) -> Option<String> {
    let path = coordinate.path()?;
    Some(format!("{}/{}", base_url.trim_end_matches('/'), path))
}

impl Default for MavenRepository {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for MavenRepository {
    fn origin(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch_all_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ArtifactVersions, RegistryError> {
        let url = self.metadata_url(coordinate);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(coordinate.key()));
        }

        if !status.is_success() {
            warn!("Maven repository returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read maven-metadata.xml response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let metadata = parse_metadata(&body).inspect_err(|e| {
            warn!("Failed to parse {}: {}", url, e);
        })?;

        if metadata.versions().is_empty() {
            return Err(RegistryError::InvalidResponse(format!(
                "{} has no version list",
                url
            )));
        }

        Ok(ArtifactVersions {
            versions: metadata.versions().to_vec(),
            latest: metadata.latest().map(str::to_string),
            release: metadata.release().map(str::to_string),
        })
    }
}
