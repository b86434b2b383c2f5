//! Per-tick market-making decision engine.
//!
//! Given one instrument's order book snapshot, the current signed position,
//! and the state carried over from the previous tick, the engine computes a
//! fair-value estimate, inventory-aware acceptance thresholds, and a bounded
//! list of orders.
//!
//! # Architecture
//!
//! ```text
//! Tick input → Engine.on_tick()
//!               ├─ FairValueEstimator: rolling mid-price windows
//!               ├─ inventory: capacity + skewed thresholds
//!               └─ quote_engine: take mispriced liquidity, quote passively
//!                    ↓
//!               TickOutput { orders, state blob, conversions }
//! ```
//!
//! The engine is a pure function of its inputs: the only state that survives
//! a tick is the estimator's rolling windows, round-tripped through the
//! opaque blob the harness persists.

pub mod config;
pub mod engine;
pub mod error;
pub mod fair_value;
pub mod inventory;
pub mod quote_engine;

pub use config::{EngineConfig, FairValueMode, InstrumentPolicy, QuotingConfig, SkewConfig};
pub use engine::{Engine, TickInput, TickOutput, DEFAULT_CONVERSIONS};
pub use error::{MmError, MmResult};
pub use fair_value::{FairValueEstimator, RollingWindow};
pub use inventory::{capacity, thresholds, Capacity, Thresholds};
pub use quote_engine::{decide, Decision};
