//! Versioned engine state schema.
//!
//! The only data that survives between ticks: per-instrument rolling
//! mid-price windows, keyed by window length. Samples are stored oldest
//! first so the estimator can rebuild its windows in insertion order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{StateError, StateResult};

/// Current schema version. Unknown versions are rejected, not guessed at.
pub const STATE_VERSION: u32 = 1;

/// Rolling-window state for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentState {
    /// Window length → retained mid-price samples, oldest first.
    #[serde(default)]
    pub windows: BTreeMap<u32, Vec<Decimal>>,
}

/// Everything carried across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub version: u32,
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentState>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            instruments: BTreeMap::new(),
        }
    }
}

impl EngineState {
    /// Instrument entry, created lazily on first use.
    pub fn instrument_mut(&mut self, symbol: &str) -> &mut InstrumentState {
        self.instruments.entry(symbol.to_string()).or_default()
    }

    pub fn instrument(&self, symbol: &str) -> Option<&InstrumentState> {
        self.instruments.get(symbol)
    }
}

/// Parse a state blob, reporting why it was unusable.
pub fn try_load(blob: &str) -> StateResult<EngineState> {
    if blob.trim().is_empty() {
        return Ok(EngineState::default());
    }
    let state: EngineState = serde_json::from_str(blob)?;
    if state.version != STATE_VERSION {
        return Err(StateError::UnsupportedVersion(state.version));
    }
    Ok(state)
}

/// Load a state blob; an absent, empty, or corrupt blob yields the empty
/// state. Never fails; a bad blob must not kill the tick.
pub fn load(blob: &str) -> EngineState {
    match try_load(blob) {
        Ok(state) => state,
        Err(err) => {
            warn!(%err, "Discarding unusable state blob, starting fresh");
            EngineState::default()
        }
    }
}

/// Serialize state to a blob. `load(save(s)) == s` for every reachable state.
pub fn save(state: &EngineState) -> String {
    match serde_json::to_string(state) {
        Ok(blob) => blob,
        Err(err) => {
            warn!(%err, "Failed to serialize engine state, handing back empty blob");
            String::new()
        }
    }
}
