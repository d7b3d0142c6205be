//! Event-to-text formatters.
//!
//! A sink renders every event to a single string before dispatch, either
//! through an [`OutputTemplate`] or through a caller-supplied
//! [`TextFormatter`] such as [`JsonFormatter`].

use std::collections::BTreeMap;

use relay_events::LogEvent;
use serde_json::{Map, Value};

use crate::error::Result;

/// The output template used when none is configured.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "{Message}{NewLine}{Exception}";

/// Capability to render a log event into text.
///
/// Pure: implementations must not have side effects beyond writing to `out`.
pub trait TextFormatter: Send + Sync {
    /// Renders `event` into `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    fn format(&self, event: &LogEvent, out: &mut dyn std::fmt::Write) -> Result<()>;
}

/// Value-rendering options applied by an [`OutputTemplate`].
#[derive(Debug, Clone, Default)]
pub struct FormatProvider {
    timestamp_format: Option<String>,
}

impl FormatProvider {
    /// Uses `format` (a `chrono` strftime string) for `{Timestamp}`
    /// directives that carry no inline format of their own. The default is
    /// RFC 3339.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = Some(format.to_owned());
        self
    }
}

/// A parsed output template.
///
/// Recognized directives: `{Message}`, `{NewLine}`, `{Exception}`,
/// `{Level}`, `{Timestamp}` (optionally `{Timestamp:<format>}`),
/// `{Properties}`, and `{Name}` for any event property. A directive naming
/// nothing the event carries renders as empty text.
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    tokens: Vec<Directive>,
    provider: FormatProvider,
}

#[derive(Debug, Clone)]
enum Directive {
    Text(String),
    Message,
    NewLine,
    Exception,
    Level,
    Timestamp(Option<String>),
    Properties,
    Property(String),
}

impl OutputTemplate {
    /// Parses an output template. Parsing never fails; malformed holes stay
    /// literal text, matching message-template behavior.
    #[must_use]
    pub fn new(template: &str, provider: FormatProvider) -> Self {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut chars = template.chars().peekable();

        // Same brace scan as message templates, with hole names classified
        // into output directives.
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for h in chars.by_ref() {
                        if h == '}' {
                            closed = true;
                            break;
                        }
                        name.push(h);
                    }
                    if closed && !name.is_empty() && !name.contains('{') {
                        if !text.is_empty() {
                            tokens.push(Directive::Text(std::mem::take(&mut text)));
                        }
                        tokens.push(Self::classify(&name));
                    } else {
                        text.push('{');
                        text.push_str(&name);
                        if closed {
                            text.push('}');
                        }
                    }
                }
                other => text.push(other),
            }
        }
        if !text.is_empty() {
            tokens.push(Directive::Text(text));
        }

        Self { tokens, provider }
    }

    /// The default `{Message}{NewLine}{Exception}` template with invariant
    /// value rendering.
    #[must_use]
    pub fn default_template() -> Self {
        Self::new(DEFAULT_OUTPUT_TEMPLATE, FormatProvider::default())
    }

    fn classify(name: &str) -> Directive {
        if let Some(format) = name.strip_prefix("Timestamp:") {
            return Directive::Timestamp(Some(format.to_owned()));
        }
        match name {
            "Message" => Directive::Message,
            "NewLine" => Directive::NewLine,
            "Exception" => Directive::Exception,
            "Level" => Directive::Level,
            "Timestamp" => Directive::Timestamp(None),
            "Properties" => Directive::Properties,
            other => Directive::Property(other.to_owned()),
        }
    }

    fn write_timestamp(
        &self,
        event: &LogEvent,
        inline: Option<&str>,
        out: &mut dyn std::fmt::Write,
    ) -> Result<()> {
        let format = inline.or(self.provider.timestamp_format.as_deref());
        match format {
            Some(format) => write!(out, "{}", event.timestamp().format(format))?,
            None => write!(out, "{}", event.timestamp().to_rfc3339())?,
        }
        Ok(())
    }

    fn write_properties(event: &LogEvent, out: &mut dyn std::fmt::Write) -> Result<()> {
        // Properties already consumed by the message template are excluded,
        // mirroring display-formatter convention.
        let consumed: Vec<&str> = event.template().hole_names().collect();
        let rest: BTreeMap<&String, &relay_events::PropertyValue> = event
            .properties()
            .iter()
            .filter(|(name, _)| !consumed.contains(&name.as_str()))
            .collect();
        if rest.is_empty() {
            return Ok(());
        }
        out.write_str(&serde_json::to_string(&rest)?)?;
        Ok(())
    }
}

impl TextFormatter for OutputTemplate {
    fn format(&self, event: &LogEvent, out: &mut dyn std::fmt::Write) -> Result<()> {
        for token in &self.tokens {
            match token {
                Directive::Text(text) => out.write_str(text)?,
                Directive::Message => out.write_str(&event.rendered_message())?,
                Directive::NewLine => out.write_char('\n')?,
                Directive::Exception => {
                    if let Some(exception) = event.exception() {
                        out.write_str(exception)?;
                    }
                }
                Directive::Level => out.write_str(event.level().as_str())?,
                Directive::Timestamp(inline) => {
                    self.write_timestamp(event, inline.as_deref(), out)?;
                }
                Directive::Properties => Self::write_properties(event, out)?,
                Directive::Property(name) => {
                    if let Some(value) = event.properties().get(name) {
                        write!(out, "{value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Renders each event as one JSON object: timestamp, level, message,
/// properties, and exception when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates the formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TextFormatter for JsonFormatter {
    fn format(&self, event: &LogEvent, out: &mut dyn std::fmt::Write) -> Result<()> {
        let mut object = Map::new();
        object.insert(
            "timestamp".to_owned(),
            Value::String(event.timestamp().to_rfc3339()),
        );
        object.insert(
            "level".to_owned(),
            Value::String(event.level().as_str().to_owned()),
        );
        object.insert(
            "message".to_owned(),
            Value::String(event.rendered_message()),
        );
        if !event.properties().is_empty() {
            object.insert(
                "properties".to_owned(),
                serde_json::to_value(event.properties())?,
            );
        }
        if let Some(exception) = event.exception() {
            object.insert("exception".to_owned(), Value::String(exception.to_owned()));
        }
        out.write_str(&serde_json::to_string(&Value::Object(object))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use relay_events::Level;

    fn render(formatter: &dyn TextFormatter, event: &LogEvent) -> String {
        let mut out = String::new();
        formatter.format(event, &mut out).unwrap();
        out
    }

    #[test]
    fn default_template_renders_message_and_newline() {
        let event = LogEvent::new(Level::Information, "Hello");
        let text = render(&OutputTemplate::default_template(), &event);
        assert_eq!(text, "Hello\n");
        assert_eq!(text.trim(), "Hello");
    }

    #[test]
    fn default_template_appends_exception() {
        let event = LogEvent::new(Level::Error, "failed").with_exception("trace line");
        let text = render(&OutputTemplate::default_template(), &event);
        assert_eq!(text, "failed\ntrace line");
    }

    #[test]
    fn level_and_property_directives() {
        let template = OutputTemplate::new("{Level} {User}: {Message}", FormatProvider::default());
        let event = LogEvent::new(Level::Warning, "quota reached").with_property("User", "ada");
        assert_eq!(render(&template, &event), "Warning ada: quota reached");
    }

    #[test]
    fn timestamp_directive_honors_inline_format() {
        let template = OutputTemplate::new("{Timestamp:%Y-%m-%d}", FormatProvider::default());
        let event = LogEvent::new(Level::Information, "x")
            .with_timestamp(chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(render(&template, &event), "2024-05-01");
    }

    #[test]
    fn timestamp_directive_falls_back_to_provider() {
        let provider = FormatProvider::default().with_timestamp_format("%H:%M");
        let template = OutputTemplate::new("{Timestamp}", provider);
        let event = LogEvent::new(Level::Information, "x")
            .with_timestamp(chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
        assert_eq!(render(&template, &event), "12:30");
    }

    #[test]
    fn properties_directive_skips_consumed_holes() {
        let template = OutputTemplate::new("{Properties}", FormatProvider::default());
        let event = LogEvent::new(Level::Information, "user {User}")
            .with_property("User", "ada")
            .with_property("Attempt", 3i64);
        assert_eq!(render(&template, &event), r#"{"Attempt":3}"#);
    }

    #[test]
    fn unknown_directive_renders_empty() {
        let template = OutputTemplate::new("[{Missing}]", FormatProvider::default());
        let event = LogEvent::new(Level::Information, "x");
        assert_eq!(render(&template, &event), "[]");
    }

    #[test]
    fn json_formatter_emits_one_object() {
        let event = LogEvent::new(Level::Error, "boom {Code}")
            .with_timestamp(chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
            .with_property("Code", 7i64)
            .with_exception("trace");
        let text = render(&JsonFormatter::new(), &event);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["level"], "Error");
        assert_eq!(value["message"], "boom 7");
        assert_eq!(value["properties"]["Code"], 7);
        assert_eq!(value["exception"], "trace");
    }
}
