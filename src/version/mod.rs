//! Maven-compatible version model
//!
//! Turns version strings into comparable token trees and selects versions from
//! a published list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Tokenizer  │────▶│ParsedVersion│────▶│  Resolver   │
//! │  (string)   │     │ (token tree)│     │ (selection) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   ▲
//!                            ▼                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Semantic   │     │ Constraint  │
//!                     │  (display)  │     │(exact, 1.+) │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`token`]: Token variants, normalization and the total order
//! - [`tokenizer`]: String to token tree
//! - [`parsed`]: `ParsedVersion`, the comparable value type
//! - [`semantic`]: major/minor/incremental/build/qualifier projection
//! - [`constraint`]: Exact, wildcard and snapshot requests
//! - [`resolver`]: Picking one version from a candidate list
//! - [`error`]: Parse and resolution errors

pub mod constraint;
pub mod error;
pub mod parsed;
pub mod resolver;
pub mod semantic;
pub mod token;
pub mod tokenizer;

pub use constraint::{VersionConstraint, unqualified_floor};
pub use error::{ResolveError, VersionError};
pub use parsed::{ParsedVersion, compare, parse_version};
pub use resolver::{latest, resolve};
pub use semantic::{SemanticVersion, to_semantic};
pub use token::Token;
