use thiserror::Error;

/// Result type alias for stdout diagnostics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing diagnostics lines.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying write to standard output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer thread panicked while holding the stream lock.
    #[error("Stdout stream lock poisoned")]
    StreamPoisoned,
}
