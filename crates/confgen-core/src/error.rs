//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("FETCH/{0}")]
    FetchError(String),

    #[error("DECODE/{0}")]
    DecodeError(String),

    #[error("RENDER/{0}")]
    RenderError(String),

    #[error("WRITE/{path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("STALE/{0} is out of date, regenerate it")]
    StaleError(String),
}

impl GeneratorError {
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Short category tag, same prefix as the display string.
    pub fn category(&self) -> &'static str {
        match self {
            Self::FetchError(_) => "FETCH",
            Self::DecodeError(_) => "DECODE",
            Self::RenderError(_) => "RENDER",
            Self::WriteError { .. } => "WRITE",
            Self::ConfigError(_) => "CONFIG",
            Self::StaleError(_) => "STALE",
        }
    }
}
