//! Error types for shoal-state.

use thiserror::Error;

/// State (de)serialization errors.
///
/// Only surfaced by `try_load`; the `load` path degrades instead of failing.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("State parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported state version: {0}")]
    UnsupportedVersion(u32),
}

/// Result type alias for state operations.
pub type StateResult<T> = std::result::Result<T, StateError>;
