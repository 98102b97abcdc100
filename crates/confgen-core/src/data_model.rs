//! Data Model: ExtensionRecord, ServiceRecord, Diagnostic
use serde::{Deserialize, Serialize};

/// One row of the extension availability table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Lower-cased extension name (ex: "intl")
    pub name: String,
    /// Version labels in the table's column order
    pub supported_versions: Vec<String>,
}

/// Header-derived mapping from a cell position to a version label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionColumn {
    /// Position among the marker cells (0 = first column after the name)
    pub index: usize,
    /// Version label (ex: "8.1")
    pub label: String,
}

/// Non-fatal anomalies recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// An extension name appeared again; the later definition was dropped.
    DuplicateExtension { name: String, line: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::DuplicateExtension { name, line } => write!(
                f,
                "the {} extension is listed twice (line {}), ignoring extra definition",
                name, line
            ),
        }
    }
}

/// Parsed extension table, records in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionTable {
    pub records: Vec<ExtensionRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtensionTable {
    pub fn get(&self, name: &str) -> Option<&ExtensionRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A non-runtime service from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Registry key. Used for ordering and logs, never emitted.
    pub name: String,
    /// Service type (ex: "redis")
    pub service_type: String,
    pub deprecated_versions: Vec<String>,
    pub supported_versions: Vec<String>,
}
