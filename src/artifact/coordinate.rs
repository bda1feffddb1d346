//! Artifact coordinates (`group:name:version[:classifier][@extension]`)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::version::constraint::VersionConstraint;
use crate::version::error::VersionError;
use crate::version::parsed::ParsedVersion;

/// Extension used when the descriptor does not name one
pub const DEFAULT_EXTENSION: &str = "jar";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("Artifact descriptor is empty")]
    Empty,

    #[error(
        "Malformed artifact descriptor {0:?}: expected <group>:<name>[:<version>[:<classifier>]][@<extension>]"
    )]
    TooFewFields(String),

    #[error("Malformed artifact descriptor {0:?}: more than one '@' extension")]
    MultipleExtensions(String),

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// A parsed artifact descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub version: Option<ParsedVersion>,
    pub classifier: Option<String>,
    pub extension: String,
}

impl Coordinate {
    pub fn parse(descriptor: &str) -> Result<Self, CoordinateError> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(CoordinateError::Empty);
        }

        let (body, extension) = match descriptor.split('@').collect::<Vec<_>>().as_slice() {
            [body] => (*body, DEFAULT_EXTENSION),
            [body, extension] => (*body, *extension),
            _ => return Err(CoordinateError::MultipleExtensions(descriptor.to_string())),
        };

        let fields: Vec<&str> = body.split(':').collect();
        if fields.len() < 2 {
            return Err(CoordinateError::TooFewFields(descriptor.to_string()));
        }
        if fields.len() > 4 {
            debug!(
                "Ignoring extra fields in artifact descriptor {}: {}",
                descriptor,
                fields[4..].join(":")
            );
        }

        let version = fields
            .get(2)
            .filter(|v| !v.is_empty())
            .map(|v| ParsedVersion::parse(v))
            .transpose()?;

        Ok(Self {
            group: fields[0].to_string(),
            name: fields[1].to_string(),
            version,
            classifier: fields
                .get(3)
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string()),
            extension: extension.to_string(),
        })
    }

    /// Same artifact with a different version
    pub fn with_version(&self, version: ParsedVersion) -> Self {
        Self {
            version: Some(version),
            ..self.clone()
        }
    }

    /// `group:name`, the key a repository publishes versions under
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }

    /// Version constraint requested by this coordinate, if it names a version
    pub fn constraint(&self) -> Option<VersionConstraint> {
        self.version.clone().map(VersionConstraint::from)
    }

    pub fn is_wildcard(&self) -> bool {
        self.constraint().is_some_and(|c| c.is_wildcard())
    }

    pub fn is_snapshot(&self) -> bool {
        self.constraint().is_some_and(|c| c.is_snapshot())
    }

    /// File name inside the repository, e.g. `jsr305-3.0.1.jar`
    pub fn file_name(&self) -> Option<String> {
        let version = self.version.as_ref()?;
        let mut file = format!("{}-{}", self.name, version);
        if let Some(classifier) = &self.classifier {
            file.push('-');
            file.push_str(classifier);
        }
        if !self.extension.is_empty() {
            file.push('.');
            file.push_str(&self.extension);
        }
        Some(file)
    }

    /// Repository-relative path of the artifact file
    pub fn path(&self) -> Option<String> {
        let version = self.version.as_ref()?;
        Some(format!(
            "{}/{}/{}/{}",
            self.group_path(),
            self.name,
            version,
            self.file_name()?
        ))
    }

    /// Repository-relative path of `maven-metadata.xml`
    pub fn metadata_path(&self) -> String {
        format!("{}/{}/maven-metadata.xml", self.group_path(), self.name)
    }

    fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        if self.extension != DEFAULT_EXTENSION {
            write!(f, "@{}", self.extension)?;
        }
        Ok(())
    }
}
