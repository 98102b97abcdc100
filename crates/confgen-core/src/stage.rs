//! Pipeline states and per-stage reports
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear state machine of a run. Any state may fall into `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Fetching,
    Parsing,
    Rendering,
    Writing,
    Done,
    Failed,
}

impl PipelineState {
    /// The state that follows a successful completion of `self`.
    pub fn next(self) -> Self {
        match self {
            Self::Fetching => Self::Parsing,
            Self::Parsing => Self::Rendering,
            Self::Rendering => Self::Writing,
            Self::Writing => Self::Done,
            Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Fetching => "fetch",
            Self::Parsing => "parse",
            Self::Rendering => "render",
            Self::Writing => "write",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a completed state produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub state: PipelineState,
    /// blake3 digest of the state's output bytes
    pub out_hash: String,
    pub latency_ms: u64,
}

impl StageReport {
    pub fn new(state: PipelineState, output: &[u8], latency_ms: u64) -> Self {
        Self {
            state,
            out_hash: hash_bytes(output),
            latency_ms,
        }
    }
}

pub fn hash_bytes(data: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(data))
}
