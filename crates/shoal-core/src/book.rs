//! Per-tick order book snapshot.
//!
//! Read-only view over one instrument's resting liquidity for the current
//! tick. Bids hold positive volumes, asks conventionally negative (amount
//! offered); `BookLevel::size` gives the unsigned quantity either way.
//! Either side may be empty; a one-sided book is a degraded state, not an
//! error, and `BookState` classifies it.

use crate::error::{CoreError, Result};
use crate::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Book state classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Both sides have resting orders.
    TwoSided,
    /// No resting bids.
    NoBid,
    /// No resting asks.
    NoAsk,
    /// Both sides empty.
    Empty,
}

impl BookState {
    /// A mid-price (and thus a dynamic fair-value update) exists only here.
    pub fn is_two_sided(&self) -> bool {
        matches!(self, Self::TwoSided)
    }
}

impl std::fmt::Display for BookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoSided => write!(f, "TWO_SIDED"),
            Self::NoBid => write!(f, "NO_BID"),
            Self::NoAsk => write!(f, "NO_ASK"),
            Self::Empty => write!(f, "EMPTY"),
        }
    }
}

/// One resting price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Resting price.
    pub price: Price,
    /// Signed resting volume (negative on the ask side).
    pub volume: i64,
}

impl BookLevel {
    /// Unsigned quantity available at this level.
    pub fn size(&self) -> i64 {
        self.volume.abs()
    }
}

/// One side of the book: ordered mapping from price to signed volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSide {
    levels: BTreeMap<Price, i64>,
}

impl OrderBookSide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a level. Zero volume is rejected; the harness never sends it.
    pub fn insert(&mut self, price: Price, volume: i64) -> Result<()> {
        if volume == 0 {
            return Err(CoreError::InvalidVolume { price, volume });
        }
        self.levels.insert(price, volume);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Level with the highest price (best bid on the bid side).
    pub fn highest(&self) -> Option<BookLevel> {
        self.levels
            .iter()
            .next_back()
            .map(|(&price, &volume)| BookLevel { price, volume })
    }

    /// Level with the lowest price (best ask on the ask side).
    pub fn lowest(&self) -> Option<BookLevel> {
        self.levels
            .iter()
            .next()
            .map(|(&price, &volume)| BookLevel { price, volume })
    }

    pub fn volume_at(&self, price: Price) -> Option<i64> {
        self.levels.get(&price).copied()
    }

    /// Levels in ascending price order.
    pub fn iter(&self) -> impl Iterator<Item = BookLevel> + '_ {
        self.levels
            .iter()
            .map(|(&price, &volume)| BookLevel { price, volume })
    }
}

/// Per-instrument order book for the current tick.
///
/// Constructed by the harness each tick and discarded after it; the engine
/// never retains a reference beyond the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    bids: OrderBookSide,
    asks: OrderBookSide,
}

impl OrderBookSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resting bid (positive volume).
    pub fn add_bid(&mut self, price: Price, volume: i64) -> Result<()> {
        self.bids.insert(price, volume)
    }

    /// Add a resting ask (volume conventionally negative).
    pub fn add_ask(&mut self, price: Price, volume: i64) -> Result<()> {
        self.asks.insert(price, volume)
    }

    pub fn bids(&self) -> &OrderBookSide {
        &self.bids
    }

    pub fn asks(&self) -> &OrderBookSide {
        &self.asks
    }

    /// Highest resting buy price.
    pub fn best_bid(&self) -> Option<BookLevel> {
        self.bids.highest()
    }

    /// Lowest resting sell price.
    pub fn best_ask(&self) -> Option<BookLevel> {
        self.asks.lowest()
    }

    /// Mid-price: (best bid + best ask) / 2.
    ///
    /// Returns None unless the book is two-sided.
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(Decimal::from(bid.price.ticks() + ask.price.ticks()) / Decimal::TWO)
    }

    /// Spread in ticks: best ask − best bid.
    pub fn spread(&self) -> Option<i64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(ask.price.ticks_from(bid.price))
    }

    pub fn state(&self) -> BookState {
        match (self.bids.is_empty(), self.asks.is_empty()) {
            (false, false) => BookState::TwoSided,
            (true, false) => BookState::NoBid,
            (false, true) => BookState::NoAsk,
            (true, true) => BookState::Empty,
        }
    }
}
