//! Message templates with named property holes.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::property::PropertyValue;

/// A parsed message template.
///
/// Templates are plain text with `{Name}` holes that are filled from the
/// event's property map at render time. `{{` and `}}` escape literal braces.
/// A hole with no matching property renders verbatim, including braces, so
/// missing bindings remain visible in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    raw: String,
    tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Hole(String),
}

impl MessageTemplate {
    /// Parses a template string. Parsing never fails; malformed holes (an
    /// unterminated `{` or a hole containing braces) are kept as literal
    /// text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut chars = raw.chars().peekable();

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
                            tokens.push(Token::Text(std::mem::take(&mut text)));
                        }
                        tokens.push(Token::Hole(name));
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
            tokens.push(Token::Text(text));
        }

        Self {
            raw: raw.to_owned(),
            tokens,
        }
    }

    /// The original template text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Names of the holes this template binds, in order of appearance.
    pub fn hole_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Hole(name) => Some(name.as_str()),
            Token::Text(_) => None,
        })
    }

    /// Renders the template against a property map.
    #[must_use]
    pub fn render(&self, properties: &BTreeMap<String, PropertyValue>) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Hole(name) => match properties.get(name) {
                    // Infallible: writing to a String cannot fail.
                    Some(value) => write!(out, "{value}").unwrap_or_default(),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}
