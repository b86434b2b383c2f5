//! Structured logging and per-tick diagnostics for the shoal engine.
//!
//! Two concerns:
//! - Structured tracing setup (`init_logging`), JSON in production.
//! - The per-tick diagnostics transcript: an explicit context object the
//!   caller passes into the decision call and flushes afterwards. The
//!   harness-side log shim owns compression and the size budget; this crate
//!   only exposes what the engine saw and did, in a form that renders to a
//!   bounded string.

pub mod error;
pub mod logging;
pub mod transcript;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use transcript::{InstrumentTrace, OrderTrace, TickTranscript};
