//! The diagnostics sink: category routing, handle caching, and dispatch.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use relay_diagnostics::{DiagnosticsBackend, DiagnosticsLogger};
use relay_events::{LogEvent, PropertyValue};

use crate::error::{Error, Result};
use crate::filter::LogEventSink;
use crate::formatter::{
    DEFAULT_OUTPUT_TEMPLATE, FormatProvider, OutputTemplate, TextFormatter,
};
use crate::level::map_level;

/// The event property a category is derived from.
pub const SOURCE_CONTEXT: &str = "SourceContext";

/// A sink that formats events and forwards them to a diagnostics backend,
/// one cached logger handle per category.
///
/// `emit` is synchronous and safe to call from any number of threads; the
/// handle cache is the only shared mutable state and uses sharded locking,
/// so already-resolved categories are a pure read.
pub struct DiagnosticsSink<B: DiagnosticsBackend> {
    backend: B,
    formatter: Box<dyn TextFormatter>,
    loggers: DashMap<String, Arc<B::Logger>>,
}

impl<B: DiagnosticsBackend> DiagnosticsSink<B> {
    /// Creates a sink over `backend` with the default output template.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            formatter: Box::new(OutputTemplate::default_template()),
            loggers: DashMap::new(),
        }
    }

    /// Starts building a sink over `backend`.
    #[must_use]
    pub fn builder(backend: B) -> DiagnosticsSinkBuilder<B> {
        DiagnosticsSinkBuilder {
            backend,
            output_template: None,
            format_provider: FormatProvider::default(),
            formatter: None,
        }
    }

    /// Formats `event` and dispatches it through the handle cached for its
    /// category, creating the handle on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if handle creation or the emission itself
    /// fails, and formatter errors unchanged. No retry, buffering, or
    /// fallback.
    pub fn emit(&self, event: &LogEvent) -> Result<()> {
        let mut rendered = String::new();
        self.formatter.format(event, &mut rendered)?;
        let text = rendered.trim();

        let category = category_of(event);
        let logger = self.resolve_logger(category)?;

        logger
            .log(map_level(event.level()), text)
            .map_err(Error::backend)
    }

    /// Atomic get-or-create on the handle cache. The vacant-entry arm holds
    /// the key's shard lock across backend construction, so racing callers
    /// for one missing category converge on a single handle while other
    /// categories proceed independently.
    fn resolve_logger(&self, category: String) -> Result<Arc<B::Logger>> {
        if let Some(logger) = self.loggers.get(&category) {
            return Ok(logger.clone());
        }

        match self.loggers.entry(category) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let logger = self
                    .backend
                    .create_logger(entry.key())
                    .map_err(Error::backend)?;
                entry.insert(logger.clone());
                Ok(logger)
            }
        }
    }

    /// Categories with a cached handle, for introspection.
    #[must_use]
    pub fn cached_categories(&self) -> Vec<String> {
        self.loggers.iter().map(|e| e.key().clone()).collect()
    }
}

impl<B: DiagnosticsBackend> LogEventSink for DiagnosticsSink<B> {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        Self::emit(self, event)
    }
}

fn category_of(event: &LogEvent) -> String {
    match event.properties().get(SOURCE_CONTEXT) {
        Some(PropertyValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Builder for [`DiagnosticsSink`].
///
/// The output template and a custom formatter are mutually exclusive;
/// configuring both is a build error.
pub struct DiagnosticsSinkBuilder<B: DiagnosticsBackend> {
    backend: B,
    output_template: Option<String>,
    format_provider: FormatProvider,
    formatter: Option<Box<dyn TextFormatter>>,
}

impl<B: DiagnosticsBackend> DiagnosticsSinkBuilder<B> {
    /// Sets the output template (default `{Message}{NewLine}{Exception}`).
    #[must_use]
    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    /// Sets the value-format provider used by the output template.
    #[must_use]
    pub fn format_provider(mut self, provider: FormatProvider) -> Self {
        self.format_provider = provider;
        self
    }

    /// Replaces template formatting with a custom formatter, e.g.
    /// [`crate::JsonFormatter`].
    #[must_use]
    pub fn formatter(mut self, formatter: impl TextFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Builds the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when both an output template
    /// and a custom formatter are configured.
    pub fn build(self) -> Result<DiagnosticsSink<B>> {
        let formatter: Box<dyn TextFormatter> = match (self.output_template, self.formatter) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidConfiguration(
                    "output template and custom formatter are mutually exclusive".to_owned(),
                ));
            }
            (None, Some(formatter)) => formatter,
            (Some(template), None) => {
                Box::new(OutputTemplate::new(&template, self.format_provider))
            }
            (None, None) => Box::new(OutputTemplate::new(
                DEFAULT_OUTPUT_TEMPLATE,
                self.format_provider,
            )),
        };

        Ok(DiagnosticsSink {
            backend: self.backend,
            formatter,
            loggers: DashMap::new(),
        })
    }
}
