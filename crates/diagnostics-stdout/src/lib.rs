//! Diagnostics backend that writes to standard output.
//!
//! Stands in for the platform's process-level diagnostics writer: one shared
//! stream for the whole process, available as a lazily-initialized global so
//! every sink in the process funnels into the same place.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::{Error, Result};

use std::io::Write;
use std::sync::{Arc, LazyLock, Mutex};

use relay_diagnostics::{DiagnosticsBackend, DiagnosticsLevel, DiagnosticsLogger};

static GLOBAL: LazyLock<StdoutBackend> = LazyLock::new(StdoutBackend::new);

/// Diagnostics backend writing one line per emission to standard output.
///
/// Clones share the same stream and its lock, so lines from concurrent
/// handles never interleave.
#[derive(Clone, Debug)]
pub struct StdoutBackend {
    stream: Arc<Mutex<std::io::Stdout>>,
}

impl StdoutBackend {
    /// Creates a standalone backend with its own lock over standard output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream: Arc::new(Mutex::new(std::io::stdout())),
        }
    }

    /// The process-wide shared backend, initialized on first use.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }
}

impl Default for StdoutBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsBackend for StdoutBackend {
    type Error = Error;
    type Logger = StdoutLogger;

    fn create_logger(&self, category: &str) -> std::result::Result<Arc<Self::Logger>, Self::Error> {
        Ok(Arc::new(StdoutLogger {
            category: category.to_owned(),
            stream: self.stream.clone(),
        }))
    }
}

/// Logger handle bound to one category, writing to standard output.
#[derive(Debug)]
pub struct StdoutLogger {
    category: String,
    stream: Arc<Mutex<std::io::Stdout>>,
}

impl StdoutLogger {
    fn render_line(&self, level: DiagnosticsLevel, text: &str) -> String {
        if self.category.is_empty() {
            format!("[{level}] {text}")
        } else {
            format!("[{level}] {}: {text}", self.category)
        }
    }
}

impl DiagnosticsLogger for StdoutLogger {
    type Error = Error;

    fn log(&self, level: DiagnosticsLevel, text: &str) -> std::result::Result<(), Self::Error> {
        let line = self.render_line(level, text);
        let mut stream = self.stream.lock().map_err(|_| Error::StreamPoisoned)?;
        writeln!(stream, "{line}")?;
        Ok(())
    }
}
