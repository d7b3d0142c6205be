//! Source-to-backend severity mapping.

use relay_diagnostics::DiagnosticsLevel;
use relay_events::Level;

/// Maps a source severity onto the backend taxonomy.
///
/// Total over the closed source set; out-of-range raw values are rejected
/// earlier, at [`Level::from_raw`].
#[must_use]
pub const fn map_level(level: Level) -> DiagnosticsLevel {
    match level {
        Level::Fatal => DiagnosticsLevel::Critical,
        Level::Error => DiagnosticsLevel::Error,
        Level::Warning => DiagnosticsLevel::Warning,
        Level::Information => DiagnosticsLevel::Information,
        Level::Debug => DiagnosticsLevel::Debug,
        Level::Verbose => DiagnosticsLevel::Trace,
    }
}
