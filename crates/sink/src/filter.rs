//! Minimum-level filtering applied in front of a sink.
//!
//! The pipeline filters before events reach the core sink; the sink itself
//! never drops by level.

use std::sync::Arc;

use arc_swap::ArcSwap;
use relay_events::{Level, LogEvent};

use crate::error::Result;

/// Capability to consume one structured log event.
pub trait LogEventSink: Send + Sync {
    /// Consumes `event`.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unchanged.
    fn emit(&self, event: &LogEvent) -> Result<()>;
}

/// A shared, runtime-adjustable minimum level.
///
/// Clones observe the same level; reads on the emit path are lock-free.
#[derive(Debug, Clone)]
pub struct LevelSwitch {
    level: Arc<ArcSwap<Level>>,
}

impl LevelSwitch {
    /// Creates a switch starting at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level: Arc::new(ArcSwap::from_pointee(level)),
        }
    }

    /// The current minimum level.
    #[must_use]
    pub fn minimum_level(&self) -> Level {
        **self.level.load()
    }

    /// Changes the minimum level for every clone of this switch.
    pub fn set_minimum_level(&self, level: Level) {
        self.level.store(Arc::new(level));
    }
}

impl Default for LevelSwitch {
    fn default() -> Self {
        Self::new(Level::MINIMUM)
    }
}

#[derive(Debug, Clone)]
enum Minimum {
    Fixed(Level),
    Switch(LevelSwitch),
}

/// Wraps a sink with minimum-level filtering, either static or driven by a
/// [`LevelSwitch`].
pub struct LevelFilteredSink<S> {
    inner: S,
    minimum: Minimum,
}

impl<S: LogEventSink> LevelFilteredSink<S> {
    /// Filters `inner` at a fixed minimum level.
    #[must_use]
    pub const fn with_minimum_level(inner: S, level: Level) -> Self {
        Self {
            inner,
            minimum: Minimum::Fixed(level),
        }
    }

    /// Filters `inner` through a shared switch; the effective minimum
    /// follows the switch at emit time.
    #[must_use]
    pub const fn with_level_switch(inner: S, switch: LevelSwitch) -> Self {
        Self {
            inner,
            minimum: Minimum::Switch(switch),
        }
    }

    /// The wrapped sink.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn minimum_level(&self) -> Level {
        match &self.minimum {
            Minimum::Fixed(level) => *level,
            Minimum::Switch(switch) => switch.minimum_level(),
        }
    }
}

impl<S: LogEventSink> LogEventSink for LevelFilteredSink<S> {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        if event.level() < self.minimum_level() {
            return Ok(());
        }
        self.inner.emit(event)
    }
}
