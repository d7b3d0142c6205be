//! Error types for the sink.

use thiserror::Error;

/// Result type alias for sink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by sink construction and emission.
#[derive(Debug, Error)]
pub enum Error {
    /// The sink was configured inconsistently, e.g. with both an output
    /// template and a custom formatter.
    #[error("Invalid sink configuration: {0}")]
    InvalidConfiguration(String),

    /// An event carried a severity outside the known closed set.
    #[error(transparent)]
    UnsupportedLevel(#[from] relay_events::Error),

    /// Writing formatted output failed.
    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serializing structured output failed.
    #[error("JSON formatting failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The diagnostics backend rejected a handle creation or emission.
    /// Propagated unchanged; the sink does not retry or fall back.
    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn backend<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(source))
    }
}
