//! Inventory-aware capacity and thresholds.
//!
//! Capacity is the remaining room to buy or sell before the position limit;
//! thresholds are the acceptance prices around fair value, skewed in
//! discrete bands so a deepening position gets harder to extend without
//! hard-stopping trading at the limit.

use rust_decimal::Decimal;

use crate::config::SkewConfig;

/// Remaining room on each side, both always in `[0, 2 * limit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub can_buy: i64,
    pub can_sell: i64,
}

/// Acceptance prices: buy below `buy`, sell above `sell`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub buy: Decimal,
    pub sell: Decimal,
}

/// Remaining capacity at a signed position.
///
/// `can_buy = max(0, limit - position)`, `can_sell = max(0, limit + position)`;
/// a position of +10 with limit 50 can still sell 60 before reaching -50.
pub fn capacity(position: i64, limit: i64) -> Capacity {
    Capacity {
        can_buy: (limit - position).max(0),
        can_sell: (limit + position).max(0),
    }
}

/// Inventory-skewed acceptance thresholds around a fair value.
///
/// Long positions lower the buy threshold (one step at the moderate band,
/// two at the deep band); short positions raise the sell threshold
/// symmetrically. Without a skew config both thresholds sit at fair value.
pub fn thresholds(position: i64, fair: Decimal, skew: Option<&SkewConfig>) -> Thresholds {
    let mut buy = fair;
    let mut sell = fair;

    if let Some(skew) = skew {
        let step = Decimal::from(skew.step_ticks);
        if position >= skew.deep_position {
            buy -= step + step;
        } else if position >= skew.moderate_position {
            buy -= step;
        }

        if -position >= skew.deep_position {
            sell += step + step;
        } else if -position >= skew.moderate_position {
            sell += step;
        }
    }

    Thresholds { buy, sell }
}
