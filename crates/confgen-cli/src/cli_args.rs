//! CLI argument definitions and configuration layering.
//!
//! Precedence, lowest first: builtin defaults, the YAML file given with
//! `--config`, then flags (each flag can also come from its env var).

use std::path::PathBuf;

use clap::Parser;
use confgen_core::{GeneratorConfig, GeneratorError, OutputTarget, Source};
use confgen_stages::RunMode;

/// Regenerate the platform.sh extension and service tables
#[derive(Parser, Debug)]
#[command(name = "platformsh-config-generator")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "CONFGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extension availability document (URL or local path)
    #[arg(long, env = "CONFGEN_EXTENSIONS_URL")]
    pub extensions_url: Option<String>,

    /// Service registry document (URL or local path)
    #[arg(long, env = "CONFGEN_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Generated file
    #[arg(short, long, env = "CONFGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output language (go, rust)
    #[arg(long)]
    pub target: Option<OutputTarget>,

    /// Package clause of the generated Go file
    #[arg(long)]
    pub package: Option<String>,

    /// Template replacing the builtin one for the selected target
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Leave out the license block
    #[arg(long)]
    pub no_license: bool,

    /// Print the artifact instead of writing it
    #[arg(long, conflicts_with = "check")]
    pub stdout: bool,

    /// Exit non-zero when the output file is out of date
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.stdout {
            RunMode::Stdout
        } else {
            RunMode::Write
        }
    }

    pub fn resolve_config(&self) -> Result<GeneratorConfig, GeneratorError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(url) = &self.extensions_url {
            config.extensions_source = Source::parse(url);
        }
        if let Some(url) = &self.registry_url {
            config.registry_source = Source::parse(url);
        }
        if let Some(output) = &self.output {
            config.destination = output.clone();
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(package) = &self.package {
            config.package_name = package.clone();
        }
        if let Some(template) = &self.template {
            config.template_path = Some(template.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.no_license {
            config.license_header = None;
        }

        Ok(config)
    }
}
