//! Repository access for artifact version lists
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Cache    │
//! │  (fetch)    │     │  (storage)  │
//! └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    Maven    │
//! │ (metadata)  │
//! └─────────────┘
//! ```
//!
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`maven`]: HTTP Maven repository reading `maven-metadata.xml`
//! - [`metadata`]: `maven-metadata.xml` model
//! - [`cache`]: SQLite-based version list cache
//! - [`error`]: Error types for cache and registry operations
//! - [`types`]: Common types like `ArtifactVersions`

pub mod cache;
pub mod error;
pub mod maven;
pub mod metadata;
pub mod registry;
pub mod types;

pub use cache::{Cache, VersionStorer};
pub use error::{CacheError, RegistryError};
pub use maven::MavenRepository;
pub use registry::Registry;
pub use types::ArtifactVersions;
