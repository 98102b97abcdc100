//! Registry document model and filtering
use std::collections::BTreeMap;

use confgen_core::ServiceRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One entry of the registry, as published. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    /// Language runtimes share the registry with attachable services
    #[serde(default)]
    pub runtime: Option<bool>,
    #[serde(default)]
    pub versions: Option<ServiceVersions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceVersions {
    #[serde(default)]
    pub deprecated: Option<Vec<String>>,
    #[serde(default)]
    pub supported: Option<Vec<String>>,
}

impl ServiceDefinition {
    pub fn is_runtime(&self) -> bool {
        self.runtime.unwrap_or(false)
    }

    fn into_record(self, name: String) -> ServiceRecord {
        let versions = self.versions.unwrap_or_default();
        ServiceRecord {
            name,
            service_type: self.service_type.unwrap_or_default(),
            deprecated_versions: versions.deprecated.unwrap_or_default(),
            supported_versions: versions.supported.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed registry JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<RegistryError> for confgen_core::GeneratorError {
    fn from(err: RegistryError) -> Self {
        confgen_core::GeneratorError::DecodeError(err.to_string())
    }
}

/// Decode the registry and keep non-runtime services, sorted by key (byte-wise).
pub fn parse_registry(bytes: &[u8]) -> Result<Vec<ServiceRecord>, RegistryError> {
    let services: BTreeMap<String, ServiceDefinition> = serde_json::from_slice(bytes)?;

    let mut records = Vec::with_capacity(services.len());
    for (name, definition) in services {
        if definition.is_runtime() {
            debug!(service = %name, "skipping runtime entry");
            continue;
        }
        let record = definition.into_record(name);
        if record.name != record.service_type {
            // the key is not emitted, only the type survives
            debug!(
                service = %record.name,
                service_type = %record.service_type,
                "registry key differs from service type"
            );
        }
        records.push(record);
    }

    Ok(records)
}
