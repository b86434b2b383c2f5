//! Error types for shoal-core.

use crate::price::Price;
use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid order quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Invalid resting volume {volume} at price {price}")]
    InvalidVolume { price: Price, volume: i64 },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
