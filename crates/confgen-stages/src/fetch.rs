//! Document fetching: the only network boundary of a run.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use confgen_core::{GeneratorError, Source};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("{url}: request failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url}: timed out after {secs}s")]
    Timeout { url: String, secs: u64 },
    #[error("{url}: server returned status {status}")]
    Status { url: String, status: u16 },
    #[error("{url}: failed to read body: {reason}")]
    Body { url: String, reason: String },
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<FetchError> for GeneratorError {
    fn from(err: FetchError) -> Self {
        GeneratorError::FetchError(err.to_string())
    }
}

/// Retrieves the raw bytes of a source document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed fetcher. Local paths are read from disk.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("platformsh-config-generator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self::with_client(client, timeout))
    }

    /// Use a preconfigured client; `timeout` is only reported in errors.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        match source {
            Source::Url(url) => self.get(url).await,
            Source::Path(path) => read_local(path).await,
        }
    }
}

async fn read_local(path: &Path) -> Result<Vec<u8>, FetchError> {
    debug!(path = %path.display(), "reading local document");
    tokio::fs::read(path).await.map_err(|source| FetchError::File {
        path: path.display().to_string(),
        source,
    })
}
