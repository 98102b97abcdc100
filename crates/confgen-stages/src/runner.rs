//! Generator: drives one run through Fetching → Parsing → Rendering → Writing.
use std::io::Write;
use std::time::Instant;

use confgen_core::{
    Diagnostic, ExtensionTable, GeneratorConfig, GeneratorError, PipelineState, ServiceRecord,
    StageReport,
};
use confgen_out::renderer::TemplateRenderer;
use confgen_out::templates::TemplateSet;
use confgen_out::{RenderRequest, RenderedArtifact};
use tracing::{info, info_span, warn, Instrument};

use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::writer;

/// What the Writing state does with the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Replace the destination file
    #[default]
    Write,
    /// Print to stdout, leave the destination alone
    Stdout,
    /// Fail with `StaleError` when the destination differs
    Check,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state: PipelineState,
    pub reports: Vec<StageReport>,
    pub artifact: RenderedArtifact,
    pub diagnostics: Vec<Diagnostic>,
    pub extension_count: usize,
    pub service_count: usize,
}

impl RunSummary {
    pub fn artifact_hash(&self) -> String {
        confgen_core::stage::hash_bytes(self.artifact.text.as_bytes())
    }
}

struct Documents {
    extensions: Vec<u8>,
    registry: Vec<u8>,
}

struct Parsed {
    table: ExtensionTable,
    services: Vec<ServiceRecord>,
}

/// Tracks the current state and the reports of completed ones.
struct StateTracker {
    state: PipelineState,
    reports: Vec<StageReport>,
    started: Instant,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            state: PipelineState::Fetching,
            reports: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Close the current state with `result`; `output` gives the bytes to digest.
    fn finish<T>(
        &mut self,
        result: Result<T, GeneratorError>,
        output: impl FnOnce(&T) -> Vec<u8>,
    ) -> Result<T, GeneratorError> {
        match result {
            Ok(value) => {
                let latency_ms = self.started.elapsed().as_millis() as u64;
                let report = StageReport::new(self.state, &output(&value), latency_ms);
                info!(
                    stage = %self.state,
                    out_hash = %report.out_hash,
                    latency_ms,
                    "stage complete"
                );
                self.reports.push(report);
                self.state = self.state.next();
                self.started = Instant::now();
                Ok(value)
            }
            Err(err) => {
                warn!(stage = %self.state, category = err.category(), "stage failed");
                self.state = PipelineState::Failed;
                Err(err)
            }
        }
    }
}

pub struct Generator<F: DocumentFetcher> {
    config: GeneratorConfig,
    fetcher: F,
}

impl Generator<HttpFetcher> {
    /// Generator fetching over HTTP with the configured timeout.
    pub fn http(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let fetcher = HttpFetcher::new(config.timeout())?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: DocumentFetcher> Generator<F> {
    pub fn new(config: GeneratorConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run the whole pipeline once. Any error aborts the run.
    pub async fn run(&self, mode: RunMode) -> Result<RunSummary, GeneratorError> {
        let run_id = uuid::Uuid::new_v4();
        self.run_states(mode)
            .instrument(info_span!("generate", run_id = %run_id))
            .await
    }

    async fn run_states(&self, mode: RunMode) -> Result<RunSummary, GeneratorError> {
        let mut tracker = StateTracker::new();

        let documents = tracker.finish(self.fetch_documents().await, |d| {
            [d.extensions.as_slice(), d.registry.as_slice()].concat()
        })?;

        let parsed = tracker.finish(parse_documents(&documents), |p| {
            serde_json::to_vec(&(&p.table.records, &p.services)).unwrap_or_default()
        })?;
        let Parsed { table, services } = parsed;
        let diagnostics = table.diagnostics.clone();
        let extension_count = table.len();
        let service_count = services.len();
        info!(extension_count, service_count, warnings = diagnostics.len(), "documents parsed");

        let artifact = tracker.finish(self.render(table, services), |a| {
            a.text.clone().into_bytes()
        })?;

        tracker.finish(self.emit(mode, &artifact), |_| {
            artifact.text.clone().into_bytes()
        })?;

        info!(
            destination = %self.config.destination.display(),
            mode = ?mode,
            "generation done"
        );

        Ok(RunSummary {
            state: tracker.state,
            reports: tracker.reports,
            artifact,
            diagnostics,
            extension_count,
            service_count,
        })
    }

    /// Two fetches, one after the other.
    async fn fetch_documents(&self) -> Result<Documents, GeneratorError> {
        info!(source = %self.config.extensions_source, "fetching extensions table");
        let extensions = self.fetcher.fetch(&self.config.extensions_source).await?;

        info!(source = %self.config.registry_source, "fetching service registry");
        let registry = self.fetcher.fetch(&self.config.registry_source).await?;

        Ok(Documents {
            extensions,
            registry,
        })
    }

    fn render(
        &self,
        table: ExtensionTable,
        services: Vec<ServiceRecord>,
    ) -> Result<RenderedArtifact, GeneratorError> {
        let target = self.config.target;
        let mut templates = TemplateSet::builtin();
        if let Some(path) = &self.config.template_path {
            templates.load_file(target.template_name(), path)?;
        }
        let renderer = TemplateRenderer::new(templates)?;

        let request = RenderRequest::new(table.records, services)
            .target(target)
            .package_name(self.config.package_name.clone())
            .license_header(self.config.license_header.clone());

        Ok(confgen_out::render_with(&renderer, request)?)
    }

    fn emit(&self, mode: RunMode, artifact: &RenderedArtifact) -> Result<(), GeneratorError> {
        let destination = &self.config.destination;
        match mode {
            RunMode::Write => writer::write_atomic(destination, artifact.text.as_bytes()),
            RunMode::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(artifact.text.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| GeneratorError::write("<stdout>", e))
            }
            RunMode::Check => {
                if writer::is_up_to_date(destination, artifact.text.as_bytes())? {
                    Ok(())
                } else {
                    Err(GeneratorError::StaleError(destination.display().to_string()))
                }
            }
        }
    }
}

fn parse_documents(documents: &Documents) -> Result<Parsed, GeneratorError> {
    let table = confgen_extensions::parse_extensions_bytes(&documents.extensions)?;
    let services = confgen_registry::parse_registry(&documents.registry)?;
    Ok(Parsed { table, services })
}
