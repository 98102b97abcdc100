//! confgen core: data model, configuration, pipeline states and errors.
//!
//! Shared by the parsers, the renderer and the driver. Nothing in here does I/O
//! except loading a configuration file.

pub mod context;
pub mod data_model;
pub mod error;
pub mod stage;

pub use context::{GeneratorConfig, OutputTarget, Source};
pub use data_model::{Diagnostic, ExtensionRecord, ExtensionTable, ServiceRecord, VersionColumn};
pub use error::GeneratorError;
pub use stage::{PipelineState, StageReport};

/// Name stamped into the "generated" banner of every artifact.
pub const GENERATOR_NAME: &str = "platformsh_config_generator";
