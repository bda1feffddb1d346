pub mod artifact;
pub mod config;
pub mod logging;
pub mod repository;
pub mod resolver;
pub mod version;
