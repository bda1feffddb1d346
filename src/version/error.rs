use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Malformed version {raw:?} at offset {offset} near {fragment:?}: {reason}")]
    MalformedVersion {
        raw: String,
        offset: usize,
        fragment: String,
        reason: String,
    },
}

impl VersionError {
    pub(crate) fn malformed(raw: &str, offset: usize, fragment: &str, reason: &str) -> Self {
        VersionError::MalformedVersion {
            raw: raw.to_string(),
            offset,
            fragment: fragment.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No versions available")]
    EmptyVersionList,

    #[error("No version matching {target} among [{list}]", list = .candidates.join(", "))]
    NoMatchingVersion {
        target: String,
        candidates: Vec<String>,
    },

    #[error("Snapshot version {0} cannot be resolved from a version list")]
    UnsupportedSnapshot(String),

    #[error(transparent)]
    Version(#[from] VersionError),
}
