//! Orders emitted by the engine.
//!
//! Quantity is signed: positive buys, negative sells, matching the harness
//! wire convention. Orders live for exactly one tick; the harness resolves
//! fills before the next invocation.

use crate::error::{CoreError, Result};
use crate::price::Price;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed net position for one instrument, bounded by the per-instrument
/// position limit in both directions. Owned by the harness; read-only to the
/// engine within a tick.
pub type Position = i64;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// An order to send this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    /// Positive = buy, negative = sell. Never zero.
    pub quantity: i64,
}

impl Order {
    /// Construct with a raw signed quantity. Zero is rejected.
    pub fn new(symbol: Symbol, price: Price, quantity: i64) -> Result<Self> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        Ok(Self {
            symbol,
            price,
            quantity,
        })
    }

    /// Buy `size` units (size must be positive; callers clamp first).
    pub fn buy(symbol: Symbol, price: Price, size: i64) -> Self {
        debug_assert!(size > 0);
        Self {
            symbol,
            price,
            quantity: size,
        }
    }

    /// Sell `size` units (size must be positive; callers clamp first).
    pub fn sell(symbol: Symbol, price: Price, size: i64) -> Self {
        debug_assert!(size > 0);
        Self {
            symbol,
            price,
            quantity: -size,
        }
    }

    pub fn side(&self) -> Side {
        if self.quantity > 0 {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    /// Unsigned order size.
    pub fn size(&self) -> i64 {
        self.quantity.abs()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}x{}",
            self.side(),
            self.symbol,
            self.size(),
            self.price
        )
    }
}
