//! Per-tick diagnostics transcript.
//!
//! The engine records, per instrument, the book top it priced against, the
//! fair value and thresholds it computed, and the orders it emitted. The
//! caller flushes the transcript once per tick, either as JSON for the
//! external log-compression shim or rendered to a size-bounded string.
//! There is no process-global log buffer; the transcript is scoped to one
//! tick and dropped with it.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;

use shoal_core::{Order, OrderBookSnapshot, Symbol};

use crate::error::TelemetryResult;

/// One emitted order, flattened for serialization.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderTrace {
    pub price: i64,
    pub quantity: i64,
}

impl From<&Order> for OrderTrace {
    fn from(order: &Order) -> Self {
        Self {
            price: order.price.ticks(),
            quantity: order.quantity,
        }
    }
}

/// Decision inputs and outputs for one instrument in one tick.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentTrace {
    pub symbol: String,
    pub book_state: String,
    pub best_bid: Option<i64>,
    pub best_ask: Option<i64>,
    pub position: i64,
    /// Zero means "no signal this tick".
    pub fair_value: Decimal,
    pub buy_threshold: Option<Decimal>,
    pub sell_threshold: Option<Decimal>,
    pub orders: Vec<OrderTrace>,
}

impl InstrumentTrace {
    /// Capture the book top as the engine saw it; thresholds and orders are
    /// filled in as the decision proceeds.
    pub fn new(symbol: &Symbol, book: &OrderBookSnapshot, position: i64) -> Self {
        Self {
            symbol: symbol.to_string(),
            book_state: book.state().to_string(),
            best_bid: book.best_bid().map(|l| l.price.ticks()),
            best_ask: book.best_ask().map(|l| l.price.ticks()),
            position,
            fair_value: Decimal::ZERO,
            buy_threshold: None,
            sell_threshold: None,
            orders: Vec::new(),
        }
    }
}

/// Diagnostics context for one tick.
#[derive(Debug, Default)]
pub struct TickTranscript {
    traces: Vec<InstrumentTrace>,
    notes: Vec<String>,
}

impl TickTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, trace: InstrumentTrace) {
        self.traces.push(trace);
    }

    /// Free-text note, interleaved with the structured records on render.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn traces(&self) -> &[InstrumentTrace] {
        &self.traces
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.notes.is_empty()
    }

    /// Structured form for the external compression shim.
    pub fn to_json(&self) -> TelemetryResult<String> {
        Ok(serde_json::to_string(&self.traces)?)
    }

    /// Human-readable transcript, truncated to `max_len` bytes.
    ///
    /// Truncation is tolerant: the cut lands on a char boundary and is
    /// marked, so a clipped transcript still reads cleanly.
    pub fn render(&self, max_len: usize) -> String {
        let mut out = String::new();
        for trace in &self.traces {
            let _ = write!(
                out,
                "{} book={} bid={} ask={} pos={} fair={}",
                trace.symbol,
                trace.book_state,
                fmt_opt(trace.best_bid),
                fmt_opt(trace.best_ask),
                trace.position,
                trace.fair_value,
            );
            if let (Some(buy), Some(sell)) = (trace.buy_threshold, trace.sell_threshold) {
                let _ = write!(out, " thr={buy}/{sell}");
            }
            let _ = write!(out, " orders=[");
            for (i, order) in trace.orders.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{}@{}", order.quantity, order.price);
            }
            out.push_str("]\n");
        }
        for note in &self.notes {
            out.push_str(note);
            out.push('\n');
        }
        truncate_marked(out, max_len)
    }
}

fn fmt_opt(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

const TRUNCATION_MARKER: &str = "…[clipped]";

/// Cut `s` to at most `max_len` bytes on a char boundary, marking the cut.
fn truncate_marked(s: String, max_len: usize) -> String {
    if s.len() <= max_len {
        return s;
    }
    // Too small to even hold the marker: plain cut
    if max_len <= TRUNCATION_MARKER.len() {
        return s[..floor_char_boundary(&s, max_len)].to_string();
    }
    let cut = floor_char_boundary(&s, max_len - TRUNCATION_MARKER.len());
    let mut out = s[..cut].to_string();
    out.push_str(TRUNCATION_MARKER);
    out
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut cut = index.min(s.len());
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}
