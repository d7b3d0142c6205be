use thiserror::Error;

/// Errors that can occur in this crate. The in-memory backend never actually
/// fails; the type exists to satisfy the backend contract.
#[derive(Clone, Debug, Error)]
#[error("Memory diagnostics error")]
pub struct Error;
