//! Generator configuration: where the documents come from and where the artifact goes.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::GeneratorError;

pub const DEFAULT_EXTENSIONS_URL: &str =
    "https://raw.githubusercontent.com/platformsh/platformsh-docs/master/docs/src/languages/php/extensions.md";
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/platformsh/platformsh-docs/master/docs/data/registry.json";
pub const DEFAULT_DESTINATION: &str = "local/platformsh/platformsh_config.go";
pub const DEFAULT_PACKAGE_NAME: &str = "platformsh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Attribution block placed under the "generated" banner, one entry per line.
pub const DEFAULT_LICENSE_HEADER: &str = "\
Copyright (c) 2021-present Fabien Potencier <fabien@symfony.com>

This file is part of Symfony CLI project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as
published by the Free Software Foundation, either version 3 of the
License, or (at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program. If not, see <http://www.gnu.org/licenses/>.";

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    /// `http://` or `https://` endpoint
    Url(String),
    /// Local file, with or without a `file://` prefix
    Path(PathBuf),
}

impl Source {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::Path(PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw)))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<String> for Source {
    fn from(raw: String) -> Self {
        Source::parse(&raw)
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        source.to_string()
    }
}

/// Language of the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Go,
    Rust,
}

impl OutputTarget {
    /// Name of the template that renders this target.
    pub fn template_name(&self) -> &'static str {
        match self {
            OutputTarget::Go => "go",
            OutputTarget::Rust => "rust",
        }
    }
}

impl FromStr for OutputTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(OutputTarget::Go),
            "rust" | "rs" => Ok(OutputTarget::Rust),
            other => Err(format!("unknown output target '{}' (expected go or rust)", other)),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

/// Everything a run needs, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Markdown document holding the extension availability table
    pub extensions_source: Source,
    /// JSON service registry
    pub registry_source: Source,
    /// Generated file, overwritten on every run
    pub destination: PathBuf,
    pub target: OutputTarget,
    /// Go package clause of the generated file
    pub package_name: String,
    /// Per-request timeout for remote sources
    pub timeout_secs: u64,
    /// Attribution block; `None` omits it
    pub license_header: Option<String>,
    /// Replaces the builtin template of `target`
    pub template_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extensions_source: Source::parse(DEFAULT_EXTENSIONS_URL),
            registry_source: Source::parse(DEFAULT_REGISTRY_URL),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            target: OutputTarget::Go,
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            license_header: Some(DEFAULT_LICENSE_HEADER.to_string()),
            template_path: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file; missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, GeneratorError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::ConfigError(format!("invalid configuration: {}", e)))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
