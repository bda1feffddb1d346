//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use maven_version_resolver::artifact::Coordinate;
use maven_version_resolver::repository::{
    ArtifactVersions, Cache, Registry, RegistryError, VersionStorer,
};

/// Registry serving fixed version lists from memory
pub struct InMemoryRegistry {
    origin: String,
    versions: HashMap<String, Vec<String>>,
    fetches: AtomicUsize,
}

impl InMemoryRegistry {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            versions: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_versions(mut self, artifact: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            artifact.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Number of fetches served so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    async fn fetch_all_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ArtifactVersions, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.versions.get(&coordinate.key()) {
            Some(versions) => Ok(ArtifactVersions::new(versions.clone())),
            None => Err(RegistryError::NotFound(coordinate.key())),
        }
    }
}

/// Create a test cache with pre-populated versions
pub fn create_test_cache(
    repository: &str,
    versions: &[(&str, Vec<&str>)],
) -> (TempDir, Arc<Cache>) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let cache = Cache::new(&db_path, 86400000).unwrap();

    for (artifact, artifact_versions) in versions {
        cache
            .replace_versions(
                repository,
                artifact,
                artifact_versions.iter().map(|v| v.to_string()).collect(),
            )
            .unwrap();
    }

    (temp_dir, Arc::new(cache))
}

/// `maven-metadata.xml` body listing the given versions
pub fn maven_metadata(group: &str, name: &str, versions: &[&str]) -> String {
    let entries: String = versions
        .iter()
        .map(|v| format!("<version>{}</version>", v))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<metadata><groupId>{}</groupId><artifactId>{}</artifactId><versioning><versions>{}</versions><lastUpdated>20240101000000</lastUpdated></versioning></metadata>",
        group, name, entries
    )
}
