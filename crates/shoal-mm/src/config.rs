//! Engine configuration.
//!
//! Instruments are priced by table lookup: each symbol maps to a policy
//! record describing how fair value is produced, how inventory skews the
//! thresholds, and whether the instrument takes liquidity, quotes
//! passively, or both. No decision code branches on an instrument name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{MmError, MmResult};

/// How fair value is produced for an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FairValueMode {
    /// Statically known fair price.
    Fixed { price: Decimal },
    /// Simple moving average of the last `window` mid-prices.
    RollingMid { window: u32 },
}

/// Inventory skew bands.
///
/// Thresholds shift in discrete steps as the position deepens: one step at
/// the moderate band, two at the deep band. Long positions lower the buy
/// threshold, short positions raise the sell threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewConfig {
    /// |position| at which the threshold shifts by one step.
    #[serde(default = "default_moderate_position")]
    pub moderate_position: i64,

    /// |position| at which the threshold shifts by two steps.
    #[serde(default = "default_deep_position")]
    pub deep_position: i64,

    /// Threshold shift per band, in ticks.
    #[serde(default = "default_step_ticks")]
    pub step_ticks: i64,
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            moderate_position: default_moderate_position(),
            deep_position: default_deep_position(),
            step_ticks: default_step_ticks(),
        }
    }
}

/// Passive quoting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotingConfig {
    /// Fixed clip size per quote, bounded by remaining capacity.
    #[serde(default = "default_clip")]
    pub clip: i64,

    /// No-trade buffer around fair value, in ticks. Resting prices closer
    /// than this are not joined or improved.
    #[serde(default = "default_buffer_ticks")]
    pub buffer_ticks: i64,

    /// Join (rather than improve) both sides when the top-of-book spread is
    /// at or below this many ticks.
    #[serde(default = "default_join_spread_ticks")]
    pub join_spread_ticks: i64,
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            clip: default_clip(),
            buffer_ticks: default_buffer_ticks(),
            join_spread_ticks: default_join_spread_ticks(),
        }
    }
}

/// Per-instrument policy record, selected by lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPolicy {
    /// Fair value source.
    pub fair_value: FairValueMode,

    /// Extra rolling windows tracked alongside the primary one (e.g. a slow
    /// moving average kept for diagnostics and offline research).
    #[serde(default)]
    pub aux_windows: Vec<u32>,

    /// Maximum net position in either direction.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// Take resting liquidity mispriced relative to the thresholds.
    #[serde(default = "default_true")]
    pub taking: bool,

    /// Passive quoting; absent disables it.
    #[serde(default)]
    pub quoting: Option<QuotingConfig>,

    /// Inventory skew; absent leaves thresholds at fair value.
    #[serde(default)]
    pub skew: Option<SkewConfig>,
}

impl Default for InstrumentPolicy {
    fn default() -> Self {
        Self {
            fair_value: FairValueMode::RollingMid {
                window: default_rolling_window(),
            },
            aux_windows: Vec::new(),
            position_limit: default_position_limit(),
            taking: true,
            quoting: None,
            skew: None,
        }
    }
}

impl InstrumentPolicy {
    /// Every rolling-window length this policy tracks, primary first.
    pub fn window_lengths(&self) -> Vec<u32> {
        let mut lengths = Vec::new();
        if let FairValueMode::RollingMid { window } = self.fair_value {
            lengths.push(window);
        }
        for &len in &self.aux_windows {
            if !lengths.contains(&len) {
                lengths.push(len);
            }
        }
        lengths
    }
}

/// Engine configuration: the instrument policy table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentPolicy>,
}

impl EngineConfig {
    /// Policy for a symbol, if configured.
    pub fn policy(&self, symbol: &str) -> Option<&InstrumentPolicy> {
        self.instruments.get(symbol)
    }

    /// Load from a TOML file.
    pub fn from_file(path: &str) -> MmResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MmError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| MmError::Config(format!("Failed to parse config: {e}")))
    }
}

fn default_true() -> bool {
    true
}
fn default_position_limit() -> i64 {
    50
}
fn default_rolling_window() -> u32 {
    10
}
fn default_moderate_position() -> i64 {
    20
}
fn default_deep_position() -> i64 {
    40
}
fn default_step_ticks() -> i64 {
    1
}
fn default_clip() -> i64 {
    10
}
fn default_buffer_ticks() -> i64 {
    2
}
fn default_join_spread_ticks() -> i64 {
    2
}
