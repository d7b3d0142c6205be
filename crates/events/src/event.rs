//! The log event itself.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::level::Level;
use crate::property::PropertyValue;
use crate::template::MessageTemplate;

/// A single structured log event.
///
/// Events are produced by a logging front-end and consumed exactly once by a
/// sink; nothing mutates an event after construction.
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: Level,
    template: MessageTemplate,
    properties: BTreeMap<String, PropertyValue>,
    exception: Option<String>,
}

impl LogEvent {
    /// Creates an event at `level` with the given message template text,
    /// stamped with the current time.
    #[must_use]
    pub fn new(level: Level, template: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            template: MessageTemplate::parse(template),
            properties: BTreeMap::new(),
            exception: None,
        }
    }

    /// Replaces the capture timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Binds a named property.
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_owned(), value.into());
        self
    }

    /// Attaches rendered exception text.
    #[must_use]
    pub fn with_exception(mut self, exception: &str) -> Self {
        self.exception = Some(exception.to_owned());
        self
    }

    /// Capture time of the event.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Severity of the event.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The parsed message template.
    #[must_use]
    pub const fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// The bound properties.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Rendered exception text, if any.
    #[must_use]
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Renders the message template against the bound properties.
    #[must_use]
    pub fn rendered_message(&self) -> String {
        self.template.render(&self.properties)
    }
}
