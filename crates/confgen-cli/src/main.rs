//! Binary entrypoint for the platform.sh config generator.
mod cli_args;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use confgen_core::GeneratorError;
use confgen_stages::{Generator, RunMode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli_args::Cli;

/// Exit code when `--check` finds a stale file
const EXIT_STALE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log level can be overridden with CONFGEN_LOG
    let filter = EnvFilter::try_from_env("CONFGEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            match err.downcast_ref::<GeneratorError>() {
                Some(GeneratorError::StaleError(_)) => ExitCode::from(EXIT_STALE),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let mode = cli.mode();
    let destination = config.destination.clone();

    let generator = Generator::http(config).context("failed to set up the generator")?;
    let summary = generator.run(mode).await?;

    if !summary.diagnostics.is_empty() {
        info!(warnings = summary.diagnostics.len(), "completed with warnings");
    }
    match mode {
        RunMode::Write => info!(
            path = %destination.display(),
            hash = %summary.artifact_hash(),
            extensions = summary.extension_count,
            services = summary.service_count,
            "artifact written"
        ),
        RunMode::Check => info!(path = %destination.display(), "artifact is up to date"),
        RunMode::Stdout => {}
    }
    Ok(())
}
