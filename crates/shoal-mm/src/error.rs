//! Error types for shoal-mm.
//!
//! Nothing on the per-tick decision path returns an error: degraded inputs
//! (one-sided books, corrupt state, unknown instruments) downgrade to
//! no-order outcomes. Errors exist only at the configuration boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MmError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type MmResult<T> = Result<T, MmError>;
