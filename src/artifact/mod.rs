//! Artifact descriptors and repository layout

pub mod coordinate;

pub use coordinate::{Coordinate, CoordinateError};
