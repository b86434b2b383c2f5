//! Per-tick order decision.
//!
//! Two independent sub-strategies share one capacity budget:
//! - Liquidity taking: hit resting prices mispriced past the thresholds.
//! - Passive quoting: join or improve the best resting price outside a
//!   no-trade buffer around fair value.
//!
//! Each side's budget is consumed in order (take first, then quote), so the
//! two strategies can never jointly exceed that side's capacity, and a
//! cross-guard drops any candidate that would trade against an order
//! already emitted this tick.

use rust_decimal::Decimal;
use tracing::debug;

use shoal_core::{Order, OrderBookSnapshot, Price, Symbol};

use crate::config::InstrumentPolicy;
use crate::inventory::{Capacity, Thresholds};

/// Orders for one instrument this tick, with the passive quote prices made
/// explicit so callers never have to reverse-engineer them from the list.
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub orders: Vec<Order>,
    /// Passive bid price quoted this tick, if any.
    pub quoted_bid: Option<Price>,
    /// Passive ask price quoted this tick, if any.
    pub quoted_ask: Option<Price>,
}

/// Decide orders for one instrument.
///
/// `fair` of zero means "no signal": the instrument is skipped entirely.
/// A missing book side skips that side's actions only.
pub fn decide(
    symbol: &Symbol,
    book: &OrderBookSnapshot,
    fair: Decimal,
    thresholds: Thresholds,
    capacity: Capacity,
    policy: &InstrumentPolicy,
) -> Decision {
    let mut decision = Decision::default();
    if fair.is_zero() {
        return decision;
    }

    let mut can_buy = capacity.can_buy;
    let mut can_sell = capacity.can_sell;
    // Highest buy / lowest sell emitted so far, for the cross-guard.
    let mut max_buy: Option<i64> = None;
    let mut min_sell: Option<i64> = None;

    if policy.taking {
        if let Some(ask) = book.best_ask() {
            if ask.price.as_decimal() < thresholds.buy {
                // Never exceed remaining capacity, never exceed offered volume.
                let size = ask.size().min(can_buy);
                if size > 0 {
                    debug!(%symbol, price = %ask.price, size, "Taking mispriced ask");
                    decision.orders.push(Order::buy(symbol.clone(), ask.price, size));
                    can_buy -= size;
                    max_buy = Some(ask.price.ticks());
                }
            }
        }

        if let Some(bid) = book.best_bid() {
            if bid.price.as_decimal() > thresholds.sell {
                let size = bid.size().min(can_sell);
                if size > 0 {
                    debug!(%symbol, price = %bid.price, size, "Taking mispriced bid");
                    decision.orders.push(Order::sell(symbol.clone(), bid.price, size));
                    can_sell -= size;
                    min_sell = Some(bid.price.ticks());
                }
            }
        }
    }

    // Passive quoting needs both sides resting: with one side missing the
    // mid cannot refresh and there is no market to quote into, so a
    // one-sided book emits taking-side logic only.
    if let (Some(quoting), Some(best_bid), Some(best_ask)) = (
        &policy.quoting,
        book.best_bid().map(|l| l.price),
        book.best_ask().map(|l| l.price),
    ) {
        // A 1-2 tick market is already tight: join both best prices rather
        // than paying a tick to narrow it further.
        let tight = best_ask.ticks_from(best_bid) <= quoting.join_spread_ticks;

        let bid_quote = if tight {
            Some(best_bid)
        } else {
            bid_anchor(book, fair, quoting.buffer_ticks)
                .map(|anchor| join_or_improve(anchor, fair - anchor.as_decimal(), quoting.buffer_ticks, 1))
        };

        let ask_quote = if tight {
            Some(best_ask)
        } else {
            ask_anchor(book, fair, quoting.buffer_ticks)
                .map(|anchor| join_or_improve(anchor, anchor.as_decimal() - fair, quoting.buffer_ticks, -1))
        };

        if let Some(price) = bid_quote {
            let size = quoting.clip.min(can_buy);
            let crosses = min_sell.is_some_and(|s| price.ticks() >= s);
            if size > 0 && !crosses {
                debug!(%symbol, %price, size, tight, "Quoting bid");
                decision.orders.push(Order::buy(symbol.clone(), price, size));
                max_buy = Some(max_buy.map_or(price.ticks(), |b| b.max(price.ticks())));
                decision.quoted_bid = Some(price);
            }
        }

        if let Some(price) = ask_quote {
            let size = quoting.clip.min(can_sell);
            let crosses = max_buy.is_some_and(|b| price.ticks() <= b);
            if size > 0 && !crosses {
                debug!(%symbol, %price, size, tight, "Quoting ask");
                decision.orders.push(Order::sell(symbol.clone(), price, size));
                decision.quoted_ask = Some(price);
            }
        }
    }

    decision
}

/// Highest resting bid at or below `fair - buffer`.
fn bid_anchor(book: &OrderBookSnapshot, fair: Decimal, buffer_ticks: i64) -> Option<Price> {
    let limit = fair - Decimal::from(buffer_ticks);
    book.bids()
        .iter()
        .filter(|level| level.price.as_decimal() <= limit)
        .last()
        .map(|level| level.price)
}

/// Lowest resting ask at or above `fair + buffer`.
fn ask_anchor(book: &OrderBookSnapshot, fair: Decimal, buffer_ticks: i64) -> Option<Price> {
    let limit = fair + Decimal::from(buffer_ticks);
    book.asks()
        .iter()
        .find(|level| level.price.as_decimal() >= limit)
        .map(|level| level.price)
}

/// Join the anchor when it sits at the buffer edge, improve one tick when it
/// is at least a full tick beyond it. Improving from inside `(buffer,
/// buffer+1)` would land in the buffer, so fractional fair values join too.
fn join_or_improve(anchor: Price, distance: Decimal, buffer_ticks: i64, toward_fair: i64) -> Price {
    if distance >= Decimal::from(buffer_ticks + 1) {
        anchor.offset(toward_fair)
    } else {
        anchor
    }
}
