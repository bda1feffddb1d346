//! Common types for repository lookups

/// Versions a repository publishes for one artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactVersions {
    /// Versions in the order the repository lists them
    pub versions: Vec<String>,
    /// Repository's own idea of the newest version, if published
    pub latest: Option<String>,
    /// Newest non-snapshot version, if published
    pub release: Option<String>,
}

impl ArtifactVersions {
    pub fn new(versions: Vec<String>) -> Self {
        Self {
            versions,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
