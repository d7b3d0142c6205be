//! Capability traits for platform diagnostics logging backends.
//!
//! A backend hands out one [`DiagnosticsLogger`] per category; the sink
//! caches those handles and writes pre-formatted text through them at a
//! backend-taxonomy severity.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

/// Severity taxonomy of the diagnostics backend, ordered from least to most
/// important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticsLevel {
    /// Finest-grained detail.
    Trace,
    /// Debugging detail.
    Debug,
    /// Routine operational messages.
    Information,
    /// Abnormal but tolerated conditions.
    Warning,
    /// Failures within an operation.
    Error,
    /// Unrecoverable failures.
    Critical,
}

impl DiagnosticsLevel {
    /// Short display name, matching the backend's own level labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for DiagnosticsLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logger handle bound to exactly one category.
///
/// Handles accept pre-formatted text; they apply no filtering and do no
/// formatting of their own. Emission is synchronous.
pub trait DiagnosticsLogger: Send + Sync + 'static {
    /// The error type surfaced by emissions.
    type Error: Debug + Error + Send + Sync;

    /// Writes one line of text at the given severity.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error if the write fails; callers propagate
    /// it unchanged.
    fn log(&self, level: DiagnosticsLevel, text: &str) -> Result<(), Self::Error>;
}

/// A diagnostics backend that constructs per-category logger handles.
///
/// Implementations are cheaply cloneable facades over a shared resource;
/// every clone hands out handles against the same underlying writer.
pub trait DiagnosticsBackend: Clone + Send + Sync + 'static {
    /// The error type surfaced by handle construction and emission.
    type Error: Debug + Error + Send + Sync;
    /// The handle type this backend constructs.
    type Logger: DiagnosticsLogger<Error = Self::Error>;

    /// Constructs a logger handle bound to `category`.
    ///
    /// Callers cache the returned handle; a backend may assume it is asked
    /// at most once per distinct category per cache.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error if the handle cannot be created.
    fn create_logger(&self, category: &str) -> Result<Arc<Self::Logger>, Self::Error>;
}
