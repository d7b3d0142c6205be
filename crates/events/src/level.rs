//! Source severity levels.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Severity of a log event, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Tracing-grade detail, rarely enabled outside development.
    Verbose,
    /// Internal diagnostics useful when debugging.
    Debug,
    /// Routine operational messages.
    Information,
    /// Something unexpected that the application can tolerate.
    Warning,
    /// A failure within an operation.
    Error,
    /// A failure the application cannot recover from.
    Fatal,
}

impl Level {
    /// The lowest severity; the default minimum for a sink.
    pub const MINIMUM: Self = Self::Verbose;

    /// Converts a raw numeric level (0 = Verbose .. 5 = Fatal) arriving from
    /// a serialized front-end event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLevel`] for values outside `0..=5`. The
    /// level set is closed; an out-of-range value means a corrupted or
    /// incompatible producer and is rejected rather than mapped to a default.
    pub const fn from_raw(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Self::Verbose),
            1 => Ok(Self::Debug),
            2 => Ok(Self::Information),
            3 => Ok(Self::Warning),
            4 => Ok(Self::Error),
            5 => Ok(Self::Fatal),
            other => Err(Error::UnsupportedLevel(other)),
        }
    }

    /// Short display name used by formatters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "Verbose",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
