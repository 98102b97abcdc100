//! Service registry parser: JSON registry -> sorted non-runtime services
pub mod registry;

pub use registry::{parse_registry, RegistryError, ServiceDefinition, ServiceVersions};
