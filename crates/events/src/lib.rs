//! Structured log-event model consumed by the diagnostics sink.
//!
//! An event carries a severity [`Level`], a parsed [`MessageTemplate`] with
//! bound [`PropertyValue`]s, an optional exception text, and a capture
//! timestamp. Events are immutable once built.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod event;
mod level;
mod property;
mod template;

pub use error::{Error, Result};
pub use event::LogEvent;
pub use level::Level;
pub use property::PropertyValue;
pub use template::MessageTemplate;
