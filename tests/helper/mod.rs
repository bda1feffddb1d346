pub mod registry;

#[allow(unused_imports)]
pub use registry::{InMemoryRegistry, create_test_cache, maven_metadata};
