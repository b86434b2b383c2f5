//! Tick-to-tick state persistence for the shoal engine.
//!
//! The harness hands the engine an opaque string blob each tick and stores
//! whatever blob the engine returns. This crate owns the schema of that
//! blob: an explicit, versioned JSON document mapping instruments to their
//! rolling mid-price windows. A corrupt or unknown blob is never fatal:
//! loading degrades to the empty state and the run continues.

pub mod error;
pub mod schema;

pub use error::{StateError, StateResult};
pub use schema::{load, save, try_load, EngineState, InstrumentState, STATE_VERSION};
