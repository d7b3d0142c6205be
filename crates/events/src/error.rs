//! Error types for the event model.

use thiserror::Error;

/// Result type alias for event-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A raw severity value fell outside the closed set of known levels.
    #[error("Unsupported severity level: {0}")]
    UnsupportedLevel(u8),
}
