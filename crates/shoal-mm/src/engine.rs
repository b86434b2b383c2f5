//! Per-tick orchestration.
//!
//! The harness boundary: one synchronous call per tick, a pure function of
//! (books, positions, prior state blob). Control flow per instrument:
//! estimator update → capacity/thresholds → decision → diagnostics record.
//! Unknown instruments, one-sided books, and corrupt state all degrade to
//! empty order lists; the harness loop is never starved of output.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use shoal_core::{Order, OrderBookSnapshot, Position, Symbol};
use shoal_telemetry::{InstrumentTrace, OrderTrace, TickTranscript};

use crate::config::EngineConfig;
use crate::fair_value::FairValueEstimator;
use crate::inventory;
use crate::quote_engine;

/// Conversions pass-through; the engine does not compute conversions.
pub const DEFAULT_CONVERSIONS: i64 = 1;

/// Everything the harness hands over for one tick. Consumed, not owned:
/// the engine retains nothing from it after the call returns.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub books: BTreeMap<Symbol, OrderBookSnapshot>,
    pub positions: BTreeMap<Symbol, Position>,
    /// Opaque previous-tick state blob; empty on the first tick.
    pub trader_state: String,
    /// Auxiliary market observations, unused by the core.
    pub observations: BTreeMap<String, Decimal>,
}

/// Everything handed back to the harness.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    /// Updated state blob for the harness to persist.
    pub trader_state: String,
    pub conversions: i64,
}

/// The per-tick decision engine.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one tick over every instrument in the input.
    ///
    /// Every instrument present in `input.books` gets an entry in the output
    /// order map, empty when nothing was decided. The transcript receives
    /// one record per configured instrument.
    pub fn on_tick(&self, input: &TickInput, transcript: &mut TickTranscript) -> TickOutput {
        let state = shoal_state::load(&input.trader_state);
        let mut estimator = FairValueEstimator::from_state(&state);
        let mut orders = BTreeMap::new();

        for (symbol, book) in &input.books {
            let Some(policy) = self.config.policy(symbol.as_str()) else {
                debug!(%symbol, "No policy configured, emitting no orders");
                orders.insert(symbol.clone(), Vec::new());
                continue;
            };

            let position = input.positions.get(symbol).copied().unwrap_or(0);
            let mut trace = InstrumentTrace::new(symbol, book, position);

            let fair = estimator.estimate(symbol, book, policy);
            trace.fair_value = fair;

            if fair.is_zero() {
                debug!(%symbol, "No fair value signal, skipping tick");
                transcript.record(trace);
                orders.insert(symbol.clone(), Vec::new());
                continue;
            }

            let capacity = inventory::capacity(position, policy.position_limit);
            let thresholds = inventory::thresholds(position, fair, policy.skew.as_ref());
            trace.buy_threshold = Some(thresholds.buy);
            trace.sell_threshold = Some(thresholds.sell);

            let decision = quote_engine::decide(symbol, book, fair, thresholds, capacity, policy);
            trace.orders = decision.orders.iter().map(OrderTrace::from).collect();
            transcript.record(trace);

            orders.insert(symbol.clone(), decision.orders);
        }

        TickOutput {
            orders,
            trader_state: shoal_state::save(&estimator.to_state()),
            conversions: DEFAULT_CONVERSIONS,
        }
    }
}
