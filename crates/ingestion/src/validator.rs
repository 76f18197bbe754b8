//! Tick stream validation.
//!
//! Enforces the engine's input contract upstream of aggregation:
//! non-decreasing timestamps, positive volume, finite prices.

use footprint_core::{Tick, TimestampMs};
use tracing::warn;

/// Statistics about stream validation quality.
#[derive(Debug, Clone, Default)]
pub struct ValidationStats {
    /// Total ticks examined.
    pub total_ticks: u64,
    /// Ticks that passed every check.
    pub accepted_ticks: u64,
    /// Ticks rejected for going backwards in time.
    pub rejected_out_of_order: u64,
    /// Ticks rejected for zero volume.
    pub rejected_non_positive_volume: u64,
    /// Ticks rejected for NaN/infinite prices.
    pub rejected_non_finite_price: u64,
}

impl ValidationStats {
    /// Total rejected ticks across all reasons.
    pub fn rejected_ticks(&self) -> u64 {
        self.rejected_out_of_order
            + self.rejected_non_positive_volume
            + self.rejected_non_finite_price
    }

    /// Fraction of examined ticks that were accepted.
    pub fn accepted_frac(&self) -> f64 {
        if self.total_ticks > 0 {
            self.accepted_ticks as f64 / self.total_ticks as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stateful validator for an ordered tick stream.
pub struct TickStreamValidator {
    /// Timestamp of the last accepted tick.
    last_timestamp: Option<TimestampMs>,
    /// Validation statistics.
    stats: ValidationStats,
}

impl TickStreamValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            stats: ValidationStats::default(),
        }
    }

    /// Check a single tick against the input contract.
    ///
    /// Rejections are logged and counted per reason; the stream as a
    /// whole is never aborted over one bad tick.
    pub fn validate(&mut self, tick: &Tick) -> bool {
        self.stats.total_ticks += 1;

        if tick.volume == 0 {
            warn!(timestamp = tick.timestamp, "dropping tick: non-positive volume");
            self.stats.rejected_non_positive_volume += 1;
            return false;
        }
        if !tick.price.is_finite() {
            warn!(timestamp = tick.timestamp, "dropping tick: non-finite price");
            self.stats.rejected_non_finite_price += 1;
            return false;
        }
        if let Some(last) = self.last_timestamp {
            if tick.timestamp < last {
                warn!(
                    timestamp = tick.timestamp,
                    last_timestamp = last,
                    "dropping tick: out of order"
                );
                self.stats.rejected_out_of_order += 1;
                return false;
            }
        }

        self.last_timestamp = Some(tick.timestamp);
        self.stats.accepted_ticks += 1;
        true
    }

    /// Filter a batch down to the ticks that satisfy the contract,
    /// preserving order.
    pub fn filter_batch(&mut self, ticks: &[Tick]) -> Vec<Tick> {
        ticks
            .iter()
            .filter(|tick| self.validate(tick))
            .cloned()
            .collect()
    }

    /// Validation statistics so far.
    pub fn stats(&self) -> &ValidationStats {
        &self.stats
    }

    /// Clear all state.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.stats.reset();
    }
}

impl Default for TickStreamValidator {
    fn default() -> Self {
        Self::new()
    }
}
