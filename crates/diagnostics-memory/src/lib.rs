//! In-memory diagnostics backend for tests and local development.
//!
//! Records every emission and counts handle constructions so tests can
//! assert on routing behavior.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use relay_diagnostics::{DiagnosticsBackend, DiagnosticsLevel, DiagnosticsLogger};

/// One recorded emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// Category of the handle the emission went through.
    pub category: String,
    /// Mapped backend severity.
    pub level: DiagnosticsLevel,
    /// Formatted text as handed to the backend.
    pub text: String,
}

/// In-memory diagnostics backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    emissions: Arc<Mutex<Vec<Emission>>>,
    loggers_created: Arc<AtomicUsize>,
}

impl MemoryBackend {
    /// Creates a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All emissions recorded so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if a recording thread panicked while holding the lock.
    #[must_use]
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().unwrap().clone()
    }

    /// Number of logger handles constructed by this backend.
    #[must_use]
    pub fn loggers_created(&self) -> usize {
        self.loggers_created.load(Ordering::SeqCst)
    }
}

impl DiagnosticsBackend for MemoryBackend {
    type Error = Error;
    type Logger = MemoryLogger;

    fn create_logger(&self, category: &str) -> Result<Arc<Self::Logger>, Self::Error> {
        self.loggers_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryLogger {
            category: category.to_owned(),
            emissions: self.emissions.clone(),
        }))
    }
}

/// Logger handle recording into the owning [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryLogger {
    category: String,
    emissions: Arc<Mutex<Vec<Emission>>>,
}

impl MemoryLogger {
    /// The category this handle is bound to.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl DiagnosticsLogger for MemoryLogger {
    type Error = Error;

    fn log(&self, level: DiagnosticsLevel, text: &str) -> Result<(), Self::Error> {
        self.emissions.lock().map_err(|_| Error)?.push(Emission {
            category: self.category.clone(),
            level,
            text: text.to_owned(),
        });
        Ok(())
    }
}
