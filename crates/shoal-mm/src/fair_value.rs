//! Fair value estimation.
//!
//! Each dynamically priced instrument carries one or more fixed-capacity
//! rolling windows of recent mid-prices; the estimate is the simple moving
//! average of the primary window. Windows are created lazily on the first
//! two-sided observation and are the only state that survives between
//! ticks, round-tripping through `shoal_state::EngineState`.

use std::collections::{BTreeMap, VecDeque};

use rust_decimal::Decimal;

use shoal_core::{OrderBookSnapshot, Symbol};
use shoal_state::EngineState;

use crate::config::{FairValueMode, InstrumentPolicy};

/// Fixed-capacity window of recent mid-prices with a running sum.
///
/// Append is O(1): once the window is full the oldest sample is evicted
/// before the new one lands. The mean is exactly the simple moving average
/// of the retained samples (Decimal arithmetic, no float drift).
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    capacity: usize,
    samples: VecDeque<Decimal>,
    sum: Decimal,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            sum: Decimal::ZERO,
        }
    }

    /// Append a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, value: Decimal) {
        self.samples.push_back(value);
        self.sum += value;
        while self.samples.len() > self.capacity {
            if let Some(evicted) = self.samples.pop_front() {
                self.sum -= evicted;
            }
        }
    }

    /// Mean of the retained samples; None while empty.
    pub fn mean(&self) -> Option<Decimal> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.sum / Decimal::from(self.samples.len() as u64))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.samples.iter().copied()
    }
}

/// Produces the per-instrument reference price.
#[derive(Debug, Default)]
pub struct FairValueEstimator {
    windows: BTreeMap<Symbol, BTreeMap<u32, RollingWindow>>,
}

impl FairValueEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted state. The schema keys windows by length, so
    /// the key doubles as the capacity; overlong sample lists are truncated
    /// to the newest entries by the push path.
    pub fn from_state(state: &EngineState) -> Self {
        let mut estimator = Self::new();
        for (name, instrument) in &state.instruments {
            let symbol = Symbol::from(name.as_str());
            let windows = estimator.windows.entry(symbol).or_default();
            for (&length, samples) in &instrument.windows {
                let window = windows
                    .entry(length)
                    .or_insert_with(|| RollingWindow::new(length as usize));
                for &sample in samples {
                    window.push(sample);
                }
            }
        }
        estimator
    }

    /// Dump all windows into the persistable schema.
    pub fn to_state(&self) -> EngineState {
        let mut state = EngineState::default();
        for (symbol, windows) in &self.windows {
            let instrument = state.instrument_mut(symbol.as_str());
            for (&length, window) in windows {
                instrument
                    .windows
                    .insert(length, window.samples().collect());
            }
        }
        state
    }

    /// Estimate fair value for one instrument, folding the current tick's
    /// mid-price into every window the policy tracks.
    ///
    /// Returns zero when there is no signal (dynamic pricing with an empty
    /// window and no mid this tick); callers skip pricing decisions then.
    pub fn estimate(
        &mut self,
        symbol: &Symbol,
        book: &OrderBookSnapshot,
        policy: &InstrumentPolicy,
    ) -> Decimal {
        if let Some(mid) = book.mid_price() {
            for length in policy.window_lengths() {
                self.windows
                    .entry(symbol.clone())
                    .or_default()
                    .entry(length)
                    .or_insert_with(|| RollingWindow::new(length as usize))
                    .push(mid);
            }
        }

        match &policy.fair_value {
            FairValueMode::Fixed { price } => *price,
            // One-sided tick: the window was not updated, so the mean is
            // the last known estimate. Zero if nothing was ever observed.
            FairValueMode::RollingMid { window } => self
                .window_mean(symbol, *window)
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// Mean of one tracked window, for diagnostics and auxiliary averages.
    pub fn window_mean(&self, symbol: &Symbol, length: u32) -> Option<Decimal> {
        self.windows.get(symbol)?.get(&length)?.mean()
    }

    /// State accessor used by tests; instruments observed so far.
    pub fn tracked_instruments(&self) -> impl Iterator<Item = &Symbol> {
        self.windows.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FairValueMode;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use shoal_core::Price;

    fn book(bid: i64, ask: i64) -> OrderBookSnapshot {
        let mut book = OrderBookSnapshot::new();
        book.add_bid(Price::new(bid), 5).unwrap();
        book.add_ask(Price::new(ask), -5).unwrap();
        book
    }

    fn one_sided_bid(bid: i64) -> OrderBookSnapshot {
        let mut book = OrderBookSnapshot::new();
        book.add_bid(Price::new(bid), 5).unwrap();
        book
    }

    fn rolling_policy(window: u32) -> InstrumentPolicy {
        InstrumentPolicy {
            fair_value: FairValueMode::RollingMid { window },
            ..Default::default()
        }
    }

    #[test]
    fn test_window_partial_fill_mean() {
        let mut window = RollingWindow::new(5);
        window.push(dec!(10));
        window.push(dec!(20));
        window.push(dec!(30));
        assert_eq!(window.mean(), Some(dec!(20)));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = RollingWindow::new(3);
        for v in [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)] {
            window.push(v);
        }
        // Only [3, 4, 5] retained
        assert_eq!(window.len(), 3);
        assert_eq!(window.mean(), Some(dec!(4)));
        assert_eq!(
            window.samples().collect::<Vec<_>>(),
            vec![dec!(3), dec!(4), dec!(5)]
        );
    }

    #[test]
    fn test_window_empty_has_no_mean() {
        let window = RollingWindow::new(5);
        assert_eq!(window.mean(), None);
    }

    #[test]
    fn test_window_zero_capacity_clamped() {
        let mut window = RollingWindow::new(0);
        window.push(dec!(7));
        window.push(dec!(9));
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.mean(), Some(dec!(9)));
    }

    #[test]
    fn test_fixed_mode_returns_constant() {
        let mut estimator = FairValueEstimator::new();
        let policy = InstrumentPolicy {
            fair_value: FairValueMode::Fixed { price: dec!(10000) },
            ..Default::default()
        };
        let symbol = Symbol::from("RAINFOREST_RESIN");
        assert_eq!(
            estimator.estimate(&symbol, &book(9995, 10005), &policy),
            dec!(10000)
        );
        // Constant even with an empty book
        assert_eq!(
            estimator.estimate(&symbol, &OrderBookSnapshot::new(), &policy),
            dec!(10000)
        );
    }

    #[test]
    fn test_rolling_mid_average() {
        let mut estimator = FairValueEstimator::new();
        let policy = rolling_policy(5);
        let symbol = Symbol::from("KELP");

        // Mids: 2020, 2021, 2022
        assert_eq!(
            estimator.estimate(&symbol, &book(2019, 2021), &policy),
            dec!(2020)
        );
        assert_eq!(
            estimator.estimate(&symbol, &book(2020, 2022), &policy),
            dec!(2020.5)
        );
        assert_eq!(
            estimator.estimate(&symbol, &book(2021, 2023), &policy),
            dec!(2021)
        );
    }

    #[test]
    fn test_rolling_mid_sliding_window() {
        let mut estimator = FairValueEstimator::new();
        let policy = rolling_policy(2);
        let symbol = Symbol::from("KELP");

        estimator.estimate(&symbol, &book(100, 102), &policy); // mid 101
        estimator.estimate(&symbol, &book(102, 104), &policy); // mid 103
        let fair = estimator.estimate(&symbol, &book(104, 106), &policy); // mid 105
        // Window of 2: mean(103, 105) = 104
        assert_eq!(fair, dec!(104));
    }

    #[test]
    fn test_one_sided_book_returns_last_estimate() {
        let mut estimator = FairValueEstimator::new();
        let policy = rolling_policy(5);
        let symbol = Symbol::from("KELP");

        estimator.estimate(&symbol, &book(2019, 2021), &policy);
        // Ask side vanished: estimate holds at the last mean, no update
        let fair = estimator.estimate(&symbol, &one_sided_bid(2019), &policy);
        assert_eq!(fair, dec!(2020));
    }

    #[test]
    fn test_no_signal_returns_zero() {
        let mut estimator = FairValueEstimator::new();
        let policy = rolling_policy(5);
        let symbol = Symbol::from("KELP");
        let fair = estimator.estimate(&symbol, &one_sided_bid(2019), &policy);
        assert_eq!(fair, Decimal::ZERO);
    }

    #[test]
    fn test_aux_windows_tracked_concurrently() {
        let mut estimator = FairValueEstimator::new();
        let policy = InstrumentPolicy {
            fair_value: FairValueMode::RollingMid { window: 2 },
            aux_windows: vec![4],
            ..Default::default()
        };
        let symbol = Symbol::from("KELP");

        for (bid, ask) in [(100, 102), (102, 104), (104, 106), (106, 108)] {
            estimator.estimate(&symbol, &book(bid, ask), &policy);
        }
        // Mids: 101, 103, 105, 107
        assert_eq!(estimator.window_mean(&symbol, 2), Some(dec!(106)));
        assert_eq!(estimator.window_mean(&symbol, 4), Some(dec!(104)));
    }

    #[test]
    fn test_state_round_trip() {
        let mut estimator = FairValueEstimator::new();
        let policy = InstrumentPolicy {
            fair_value: FairValueMode::RollingMid { window: 3 },
            aux_windows: vec![5],
            ..Default::default()
        };
        let symbol = Symbol::from("KELP");
        for (bid, ask) in [(100, 102), (101, 103), (103, 105)] {
            estimator.estimate(&symbol, &book(bid, ask), &policy);
        }

        let state = estimator.to_state();
        let restored = FairValueEstimator::from_state(&state);
        assert_eq!(restored.to_state(), state);
        assert_eq!(
            restored.window_mean(&symbol, 3),
            estimator.window_mean(&symbol, 3)
        );
    }

    #[test]
    fn test_from_state_truncates_overlong_windows() {
        // A tampered blob carrying more samples than the window length
        // keeps only the newest ones.
        let mut state = EngineState::default();
        state
            .instrument_mut("KELP")
            .windows
            .insert(2, vec![dec!(1), dec!(2), dec!(3)]);
        let estimator = FairValueEstimator::from_state(&state);
        assert_eq!(
            estimator.window_mean(&Symbol::from("KELP"), 2),
            Some(dec!(2.5))
        );
    }

    #[test]
    fn test_windows_created_lazily() {
        let mut estimator = FairValueEstimator::new();
        let policy = rolling_policy(5);
        let symbol = Symbol::from("KELP");
        assert_eq!(estimator.tracked_instruments().count(), 0);

        // One-sided book: still nothing tracked
        estimator.estimate(&symbol, &one_sided_bid(2019), &policy);
        assert_eq!(estimator.tracked_instruments().count(), 0);

        estimator.estimate(&symbol, &book(2019, 2021), &policy);
        assert_eq!(estimator.tracked_instruments().count(), 1);
    }

    proptest! {
        #[test]
        fn prop_window_mean_matches_naive(
            capacity in 1usize..12,
            values in proptest::collection::vec(0i64..100_000, 1..40),
        ) {
            let mut window = RollingWindow::new(capacity);
            for &v in &values {
                window.push(Decimal::from(v));
            }
            // Externally observable value is the exact SMA of the last
            // min(k, N) samples
            let tail: Vec<Decimal> = values
                .iter()
                .rev()
                .take(capacity)
                .rev()
                .map(|&v| Decimal::from(v))
                .collect();
            let naive = tail.iter().copied().sum::<Decimal>()
                / Decimal::from(tail.len() as u64);
            prop_assert_eq!(window.mean(), Some(naive));
        }
    }
}
