//! `maven-metadata.xml` model

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::repository::error::RegistryError;

/// Artifact-level `maven-metadata.xml` published next to the version directories
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MavenMetadata {
    #[serde(rename = "groupId", default)]
    pub group_id: String,
    #[serde(rename = "artifactId", default)]
    pub artifact_id: String,
    #[serde(default)]
    pub versioning: Option<Versioning>,
}

impl MavenMetadata {
    /// Published versions in document order (empty when missing)
    pub fn versions(&self) -> &[String] {
        self.versioning
            .as_ref()
            .map(|versioning| versioning.versions.items.as_slice())
            .unwrap_or_default()
    }

    pub fn latest(&self) -> Option<&str> {
        self.versioning
            .as_ref()
            .and_then(|versioning| versioning.latest.as_deref())
    }

    pub fn release(&self) -> Option<&str> {
        self.versioning
            .as_ref()
            .and_then(|versioning| versioning.release.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Versioning {
    pub latest: Option<String>,
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Versions,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Versions {
    #[serde(rename = "version", default)]
    pub items: Vec<String>,
}

pub fn parse_metadata(xml: &str) -> Result<MavenMetadata, RegistryError> {
    Ok(from_str(xml)?)
}
