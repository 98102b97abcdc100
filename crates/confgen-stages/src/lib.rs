//! confgen stages: fetcher, writer and the pipeline driver.
//!
//! # Pipeline Flow
//!
//! ```text
//! Fetching → Parsing → Rendering → Writing → Done
//!     ↓          ↓          ↓          ↓
//!   bytes     records      text      file
//!
//! any error ──────────────────────────→ Failed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use confgen_core::GeneratorConfig;
//! use confgen_stages::{Generator, RunMode};
//!
//! let generator = Generator::http(GeneratorConfig::default())?;
//! let summary = generator.run(RunMode::Write).await?;
//! println!("{} extensions, {} services", summary.extension_count, summary.service_count);
//! ```

pub mod fetch;
pub mod runner;
pub mod writer;

pub use fetch::{DocumentFetcher, FetchError, HttpFetcher};
pub use runner::{Generator, RunMode, RunSummary};
