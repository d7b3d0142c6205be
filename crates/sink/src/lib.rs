//! Log-event sink that forwards structured events to a platform diagnostics
//! backend.
//!
//! Each event is rendered to text by a configurable formatter, routed by a
//! category derived from its `SourceContext` property, and dispatched
//! through a cached per-category backend logger handle. The cache is
//! concurrency-safe; `emit` may be called from any number of producer
//! threads.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod filter;
mod formatter;
mod level;
mod sink;

pub use error::{Error, Result};
pub use filter::{LevelFilteredSink, LevelSwitch, LogEventSink};
pub use formatter::{
    DEFAULT_OUTPUT_TEMPLATE, FormatProvider, JsonFormatter, OutputTemplate, TextFormatter,
};
pub use level::map_level;
pub use sink::{DiagnosticsSink, DiagnosticsSinkBuilder, SOURCE_CONTEXT};
