//! End-to-end runs of the generator against fixture documents.
//!
//! Documents are served from memory or from `testing/fixtures`; nothing here
//! touches the network.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use confgen_core::{Diagnostic, GeneratorConfig, OutputTarget, PipelineState, Source};
use confgen_stages::{DocumentFetcher, FetchError, Generator, HttpFetcher, RunMode};
use pretty_assertions::assert_eq;

const EXTENSIONS_URL: &str = "https://docs.example.com/extensions.md";
const REGISTRY_URL: &str = "https://docs.example.com/registry.json";

/// Get the absolute path to a fixture file
fn fixture(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join("testing/fixtures").join(name)
}

fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).unwrap()
}

/// In-memory documents keyed by URL; records the order of requests.
struct StaticFetcher {
    documents: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    fn new(extensions: &[u8], registry: &[u8]) -> Self {
        let mut documents = HashMap::new();
        documents.insert(EXTENSIONS_URL.to_string(), extensions.to_vec());
        documents.insert(REGISTRY_URL.to_string(), registry.to_vec());
        Self {
            documents,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn fixtures() -> Self {
        Self::new(&read_fixture("extensions.md"), &read_fixture("registry.json"))
    }

    fn without(mut self, url: &str) -> Self {
        self.documents.remove(url);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        let url = source.to_string();
        self.requests.lock().unwrap().push(url.clone());
        self.documents
            .get(&url)
            .cloned()
            .ok_or(FetchError::Status { url, status: 404 })
    }
}

fn config(destination: PathBuf) -> GeneratorConfig {
    GeneratorConfig {
        extensions_source: Source::parse(EXTENSIONS_URL),
        registry_source: Source::parse(REGISTRY_URL),
        destination,
        license_header: None,
        ..GeneratorConfig::default()
    }
}

// =============================================================================
// Full runs
// =============================================================================

#[tokio::test]
async fn test_fixture_run_matches_golden_file() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("local/platformsh/platformsh_config.go");
    let generator = Generator::new(config(destination.clone()), StaticFetcher::fixtures());

    let summary = generator.run(RunMode::Write).await.unwrap();

    let written = std::fs::read_to_string(&destination).unwrap();
    let golden = std::fs::read_to_string(fixture("platformsh_config.go")).unwrap();
    assert_eq!(written, golden);
    assert_eq!(summary.artifact.text, golden);
    assert_eq!(summary.state, PipelineState::Done);
    assert_eq!(summary.extension_count, 6);
    assert_eq!(summary.service_count, 3);
}

#[tokio::test]
async fn test_states_run_in_order_and_fetches_are_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::new(config(dir.path().join("out.go")), StaticFetcher::fixtures());

    let summary = generator.run(RunMode::Write).await.unwrap();

    let states: Vec<_> = summary.reports.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec![
            PipelineState::Fetching,
            PipelineState::Parsing,
            PipelineState::Rendering,
            PipelineState::Writing,
        ]
    );
    assert_eq!(generator.fetcher().requests(), vec![EXTENSIONS_URL, REGISTRY_URL]);
}

#[tokio::test]
async fn test_duplicate_extension_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::new(config(dir.path().join("out.go")), StaticFetcher::fixtures());

    let summary = generator.run(RunMode::Write).await.unwrap();

    assert_eq!(
        summary.diagnostics,
        vec![Diagnostic::DuplicateExtension {
            name: "imagick".to_string(),
            line: 18,
        }]
    );
    assert_eq!(summary.artifact.text.matches("\"imagick\":").count(), 1);
}

#[tokio::test]
async fn test_two_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.go");

    let first = Generator::new(config(destination.clone()), StaticFetcher::fixtures())
        .run(RunMode::Write)
        .await
        .unwrap();
    let first_bytes = std::fs::read(&destination).unwrap();
    let second = Generator::new(config(destination.clone()), StaticFetcher::fixtures())
        .run(RunMode::Write)
        .await
        .unwrap();
    let second_bytes = std::fs::read(&destination).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.artifact_hash(), second.artifact_hash());
    let hashes = |s: &confgen_stages::RunSummary| {
        s.reports.iter().map(|r| r.out_hash.clone()).collect::<Vec<_>>()
    };
    assert_eq!(hashes(&first), hashes(&second));
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_single_marked_column_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(
        b"| Extension | 7.4 | 8.0 |\n| --- | --- | --- |\n| `intl` | X |  |\n",
        b"{}",
    );
    let generator = Generator::new(config(dir.path().join("out.go")), fetcher);

    let summary = generator.run(RunMode::Write).await.unwrap();

    assert!(summary.artifact.text.contains("\t\"intl\": {\"7.4\"},\n"));
}

#[tokio::test]
async fn test_runtime_service_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let registry = br#"{
        "redis": {"type": "redis", "runtime": false, "versions": {"deprecated": [], "supported": ["6.0", "7.0"]}},
        "php": {"type": "php", "runtime": true, "versions": {"deprecated": [], "supported": ["8.1"]}}
    }"#;
    let fetcher = StaticFetcher::new(b"| Extension | 8.1 |\n| --- | --- |\n", registry);
    let generator = Generator::new(config(dir.path().join("out.go")), fetcher);

    let summary = generator.run(RunMode::Write).await.unwrap();
    let text = &summary.artifact.text;

    assert_eq!(summary.service_count, 1);
    assert!(text.contains("Deprecated: []string{},"));
    assert!(text.contains("Supported:  []string{\"6.0\", \"7.0\"},"));
    assert!(!text.contains("\"php\""));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_fetch_failure_aborts_before_registry() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.go");
    let fetcher = StaticFetcher::fixtures().without(EXTENSIONS_URL);
    let generator = Generator::new(config(destination.clone()), fetcher);

    let err = generator.run(RunMode::Write).await.unwrap_err();

    assert_eq!(err.category(), "FETCH");
    assert_eq!(generator.fetcher().requests(), vec![EXTENSIONS_URL]);
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_malformed_registry_leaves_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.go");
    std::fs::write(&destination, "previous").unwrap();
    let fetcher = StaticFetcher::new(&read_fixture("extensions.md"), b"{\"redis\": ");
    let generator = Generator::new(config(destination.clone()), fetcher);

    let err = generator.run(RunMode::Write).await.unwrap_err();

    assert_eq!(err.category(), "DECODE");
    assert_eq!(std::fs::read_to_string(&destination).unwrap(), "previous");
}

#[tokio::test]
async fn test_missing_extension_table_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(b"# nothing to see\n", b"{}");
    let generator = Generator::new(config(dir.path().join("out.go")), fetcher);

    let err = generator.run(RunMode::Write).await.unwrap_err();
    assert_eq!(err.category(), "DECODE");
}

// =============================================================================
// Modes and options
// =============================================================================

#[tokio::test]
async fn test_check_mode() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.go");

    let stale = Generator::new(config(destination.clone()), StaticFetcher::fixtures())
        .run(RunMode::Check)
        .await
        .unwrap_err();
    assert_eq!(stale.category(), "STALE");
    assert!(!destination.exists());

    std::fs::copy(fixture("platformsh_config.go"), &destination).unwrap();
    let fresh = Generator::new(config(destination.clone()), StaticFetcher::fixtures())
        .run(RunMode::Check)
        .await
        .unwrap();
    assert_eq!(fresh.state, PipelineState::Done);
}

#[tokio::test]
async fn test_local_sources_and_rust_target() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("platformsh_config.rs");
    let config = GeneratorConfig {
        extensions_source: Source::Path(fixture("extensions.md")),
        registry_source: Source::Path(fixture("registry.json")),
        destination: destination.clone(),
        target: OutputTarget::Rust,
        ..GeneratorConfig::default()
    };
    let generator = Generator::http(config).unwrap();

    let summary = generator.run(RunMode::Write).await.unwrap();
    let text = std::fs::read_to_string(&destination).unwrap();

    assert_eq!(summary.artifact.template_used, "rust");
    assert!(text.contains(" * This file is part of Symfony CLI project\n"));
    assert!(text.contains("    (\"sodium\", &[\"8.0\", \"8.1\", \"8.2\"]),\n"));
    assert!(text.find("service_type: \"elasticsearch\"") < text.find("service_type: \"redis\""));
}

#[tokio::test]
async fn test_template_override() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("names.hbs");
    std::fs::write(&template, "{{#each extensions}}{{name}} {{/each}}").unwrap();
    let destination = dir.path().join("names.txt");
    let config = GeneratorConfig {
        template_path: Some(template),
        ..config(destination.clone())
    };

    Generator::new(config, StaticFetcher::fixtures())
        .run(RunMode::Write)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&destination).unwrap(),
        "apcu imagick intl pdo_mysql sodium xdebug "
    );
}

#[tokio::test]
async fn test_http_fetcher_builds_from_config() {
    let config = GeneratorConfig {
        timeout_secs: 1,
        ..GeneratorConfig::default()
    };
    let generator = Generator::<HttpFetcher>::http(config).unwrap();
    assert_eq!(generator.config().timeout_secs, 1);
}
