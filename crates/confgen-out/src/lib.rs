//! confgen-out: normalized records to generated source text
//!
//! Builds a serializable view of the two collections and hands it to a fixed
//! Handlebars template. The body of the output depends only on the records:
//! no timestamps, no random identifiers, no unordered iteration.
//!
//! # Example
//!
//! ```ignore
//! use confgen_out::{render_artifact, RenderRequest};
//!
//! let request = RenderRequest::new(extensions, services);
//! let artifact = render_artifact(request).unwrap();
//! std::fs::write("platformsh_config.go", artifact.text).unwrap();
//! ```

pub mod renderer;
pub mod templates;

use confgen_core::{ExtensionRecord, OutputTarget, ServiceRecord, GENERATOR_NAME};
use renderer::TemplateRenderer;
use serde::Serialize;
use thiserror::Error;

/// Everything the emitter needs; records are moved in and never mutated.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub target: OutputTarget,
    /// Go package clause (ignored by the Rust target)
    pub package_name: String,
    pub license_header: Option<String>,
    /// In table row order
    pub extensions: Vec<ExtensionRecord>,
    /// In registry key order, runtimes already removed
    pub services: Vec<ServiceRecord>,
}

impl RenderRequest {
    pub fn new(extensions: Vec<ExtensionRecord>, services: Vec<ServiceRecord>) -> Self {
        Self {
            target: OutputTarget::Go,
            package_name: confgen_core::context::DEFAULT_PACKAGE_NAME.to_string(),
            license_header: None,
            extensions,
            services,
        }
    }

    pub fn target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn license_header(mut self, header: Option<String>) -> Self {
        self.license_header = header;
        self
    }
}

/// Result of a render operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub text: String,
    pub template_used: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
}

impl From<RenderError> for confgen_core::GeneratorError {
    fn from(err: RenderError) -> Self {
        confgen_core::GeneratorError::RenderError(err.to_string())
    }
}

#[derive(Serialize)]
struct ArtifactView<'a> {
    generator: &'a str,
    package: &'a str,
    license_lines: Vec<&'a str>,
    extensions: Vec<ExtensionView<'a>>,
    services: Vec<ServiceView<'a>>,
}

#[derive(Serialize)]
struct ExtensionView<'a> {
    name: &'a str,
    /// Spaces after `"name":` so every value starts in the same column
    padding: String,
    versions: &'a [String],
}

#[derive(Serialize)]
struct ServiceView<'a> {
    service_type: &'a str,
    deprecated: &'a [String],
    supported: &'a [String],
}

impl<'a> ArtifactView<'a> {
    fn from_request(request: &'a RenderRequest) -> Self {
        // measured on the quoted literal, escapes included
        let quoted_len = |name: &str| renderer::quote(name).chars().count();
        let width = request
            .extensions
            .iter()
            .map(|e| quoted_len(&e.name))
            .max()
            .unwrap_or(0);

        let extensions = request
            .extensions
            .iter()
            .map(|e| ExtensionView {
                name: &e.name,
                padding: " ".repeat(width - quoted_len(&e.name) + 1),
                versions: &e.supported_versions,
            })
            .collect();

        let services = request
            .services
            .iter()
            .map(|s| ServiceView {
                service_type: &s.service_type,
                deprecated: &s.deprecated_versions,
                supported: &s.supported_versions,
            })
            .collect();

        ArtifactView {
            generator: GENERATOR_NAME,
            package: &request.package_name,
            license_lines: request
                .license_header
                .as_deref()
                .map(|h| h.lines().collect())
                .unwrap_or_default(),
            extensions,
            services,
        }
    }
}

/// Render with the builtin templates
pub fn render_artifact(request: RenderRequest) -> Result<RenderedArtifact, RenderError> {
    let renderer = TemplateRenderer::builtin()?;
    render_with(&renderer, request)
}

/// Render with a caller-provided renderer (custom template set)
pub fn render_with(
    renderer: &TemplateRenderer,
    request: RenderRequest,
) -> Result<RenderedArtifact, RenderError> {
    let template_name = request.target.template_name();
    let view = ArtifactView::from_request(&request);
    let text = renderer.render(template_name, &view)?;

    Ok(RenderedArtifact {
        text,
        template_used: template_name.to_string(),
    })
}
