//! Per-price-level accumulation of bid/ask volume and trade counts.

use footprint_core::{Volume, ZeroRatioHandling};
use serde::{Deserialize, Serialize};

/// Aggregated trading activity at a single price level within a bar.
///
/// Raw counters only grow while the owning bar is in progress. Derived
/// fields are recomputed after every mutation, so they are consistent with
/// the counters at any observable point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevelAggregate {
    /// Canonical (quantized) price of this level.
    pub price: f64,
    /// Volume from seller-aggressive trades (hit the bid).
    pub bid_volume: Volume,
    /// Volume from buyer-aggressive trades (lifted the ask).
    pub ask_volume: Volume,
    /// Number of bid trades.
    pub bid_trades: u64,
    /// Number of ask trades.
    pub ask_trades: u64,
    /// Derived: `bid_volume + ask_volume`.
    pub total_volume: Volume,
    /// Derived: `bid_trades + ask_trades`.
    pub total_trades: u64,
    /// Derived: `ask_volume - bid_volume`.
    pub delta: i64,
    /// Derived: ask side dominant. Ties go to the ask by convention.
    pub is_ask_dominant: bool,
    /// Derived: dominant volume over non-dominant volume, subject to the
    /// zero-handling policy.
    pub dominance_ratio: f64,
}

impl PriceLevelAggregate {
    /// Create an empty level at the given canonical price.
    pub fn new(price: f64) -> Self {
        Self {
            price,
            bid_volume: 0,
            ask_volume: 0,
            bid_trades: 0,
            ask_trades: 0,
            total_volume: 0,
            total_trades: 0,
            delta: 0,
            is_ask_dominant: true,
            dominance_ratio: 0.0,
        }
    }

    /// Record one trade at this level.
    ///
    /// Zero volume is a no-op: the engine rejects non-positive volume
    /// upstream, so nothing is counted here either.
    pub fn record(&mut self, volume: Volume, is_bid_trade: bool, zero_handling: ZeroRatioHandling) {
        if volume == 0 {
            return;
        }
        if is_bid_trade {
            self.bid_volume += volume;
            self.bid_trades += 1;
        } else {
            self.ask_volume += volume;
            self.ask_trades += 1;
        }
        self.recompute_derived(zero_handling);
    }

    /// Recompute all derived fields from the raw counters.
    pub fn recompute_derived(&mut self, zero_handling: ZeroRatioHandling) {
        self.total_volume = self.bid_volume + self.ask_volume;
        self.total_trades = self.bid_trades + self.ask_trades;
        self.delta = self.ask_volume as i64 - self.bid_volume as i64;
        self.is_ask_dominant = self.ask_volume >= self.bid_volume;

        let numerator = if self.is_ask_dominant {
            self.ask_volume
        } else {
            self.bid_volume
        };
        let mut denominator = if self.is_ask_dominant {
            self.bid_volume
        } else {
            self.ask_volume
        };

        if denominator == 0 {
            if zero_handling == ZeroRatioHandling::ClampToOne {
                denominator = 1;
            }
            if denominator == 0 {
                self.dominance_ratio = if numerator > 0 { f64::INFINITY } else { 0.0 };
                return;
            }
        }

        self.dominance_ratio = numerator as f64 / denominator as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_level_is_consistent() {
        let level = PriceLevelAggregate::new(100.0);
        assert_eq!(level.total_volume, 0);
        assert_eq!(level.total_trades, 0);
        assert_eq!(level.delta, 0);
        assert!(level.is_ask_dominant);
        assert_eq!(level.dominance_ratio, 0.0);
    }

    #[test]
    fn test_invariants_after_every_update() {
        let mut level = PriceLevelAggregate::new(100.0);
        let updates = [(10, false), (5, true), (8, false), (3, true)];

        for (volume, is_bid) in updates {
            level.record(volume, is_bid, ZeroRatioHandling::ClampToOne);
            assert_eq!(level.total_volume, level.bid_volume + level.ask_volume);
            assert_eq!(level.total_trades, level.bid_trades + level.ask_trades);
            assert_eq!(
                level.delta,
                level.ask_volume as i64 - level.bid_volume as i64
            );
        }

        assert_eq!(level.bid_volume, 8);
        assert_eq!(level.ask_volume, 18);
        assert_eq!(level.bid_trades, 2);
        assert_eq!(level.ask_trades, 2);
        assert_eq!(level.delta, 10);
    }

    #[test]
    fn test_ratio_clamp_to_one() {
        let mut level = PriceLevelAggregate::new(100.0);
        level.record(15, false, ZeroRatioHandling::ClampToOne);

        // One side zero: ratio equals the nonzero side's volume.
        assert!(level.is_ask_dominant);
        assert_relative_eq!(level.dominance_ratio, 15.0);

        level.record(5, true, ZeroRatioHandling::ClampToOne);
        assert_relative_eq!(level.dominance_ratio, 3.0);
    }

    #[test]
    fn test_ratio_infinite_sentinel() {
        let mut level = PriceLevelAggregate::new(100.0);
        level.record(15, false, ZeroRatioHandling::InfiniteSentinel);
        assert!(level.dominance_ratio.is_infinite());

        level.record(5, true, ZeroRatioHandling::InfiniteSentinel);
        assert_relative_eq!(level.dominance_ratio, 3.0);
    }

    #[test]
    fn test_ratio_zero_counters_is_zero_under_both_policies() {
        let mut level = PriceLevelAggregate::new(100.0);
        level.recompute_derived(ZeroRatioHandling::ClampToOne);
        assert_eq!(level.dominance_ratio, 0.0);
        level.recompute_derived(ZeroRatioHandling::InfiniteSentinel);
        assert_eq!(level.dominance_ratio, 0.0);
    }

    #[test]
    fn test_dominance_tie_goes_to_ask() {
        let mut level = PriceLevelAggregate::new(100.0);
        level.record(10, true, ZeroRatioHandling::ClampToOne);
        level.record(10, false, ZeroRatioHandling::ClampToOne);
        assert!(level.is_ask_dominant);
        assert_relative_eq!(level.dominance_ratio, 1.0);
    }

    #[test]
    fn test_zero_volume_record_is_noop() {
        let mut level = PriceLevelAggregate::new(100.0);
        level.record(0, true, ZeroRatioHandling::ClampToOne);
        assert_eq!(level.total_volume, 0);
        assert_eq!(level.total_trades, 0);
    }
}
