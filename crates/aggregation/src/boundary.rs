//! Bar boundary decisions per aggregation mode.
//!
//! A boundary check is evaluated against the in-progress bar before a tick
//! is folded in, so a tick-count bar of exactly N ticks closes and the
//! (N+1)-th tick opens the next bar.

use crate::bar::FootprintBar;
use footprint_core::config::parse_duration_ms;
use footprint_core::{
    floor_timestamp, AggregationType, Error, FootprintConfig, Result, Tick, TimestampMs,
};

/// Boundary rule resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryRule {
    /// Close when a tick lands at or past `start_time + duration_ms`.
    Time { duration_ms: i64 },
    /// Close once the bar holds `max_ticks` ticks.
    TickCount { max_ticks: u64 },
    /// Close once the bar holds `max_volume` accumulated volume.
    VolumeSum { max_volume: u64 },
    /// Range and reversal bars are reserved: this rule never closes a bar,
    /// so such an engine only produces bars via explicit finalization.
    Unbounded,
}

/// Decides, per configured aggregation mode, whether an incoming tick
/// starts a new bar.
#[derive(Debug, Clone)]
pub struct BoundaryPolicy {
    rule: BoundaryRule,
}

impl BoundaryPolicy {
    /// Resolve the boundary rule from configuration.
    ///
    /// Invalid aggregation values (unparseable duration, zero count,
    /// mismatched value kind) surface here as configuration errors.
    pub fn from_config(config: &FootprintConfig) -> Result<Self> {
        let rule = match config.aggregation_type {
            AggregationType::Time => {
                let duration = config.aggregation_value.as_duration().ok_or_else(|| {
                    Error::config("time aggregation requires a duration string")
                })?;
                BoundaryRule::Time {
                    duration_ms: parse_duration_ms(duration)?,
                }
            }
            AggregationType::Tick => BoundaryRule::TickCount {
                max_ticks: required_count(config)?,
            },
            AggregationType::Volume => BoundaryRule::VolumeSum {
                max_volume: required_count(config)?,
            },
            AggregationType::Range | AggregationType::Reversal => BoundaryRule::Unbounded,
        };
        Ok(Self { rule })
    }

    /// Whether `tick` belongs to the next bar rather than `bar`.
    pub fn crosses_boundary(&self, bar: &FootprintBar, tick: &Tick) -> bool {
        match self.rule {
            BoundaryRule::Time { duration_ms } => tick.timestamp >= bar.start_time + duration_ms,
            BoundaryRule::TickCount { max_ticks } => bar.tick_count >= max_ticks,
            BoundaryRule::VolumeSum { max_volume } => bar.accumulated_volume >= max_volume,
            BoundaryRule::Unbounded => false,
        }
    }

    /// Start time for a bar opened by a tick at `timestamp`.
    ///
    /// Time bars start at the timestamp floored to the interval boundary;
    /// other modes start at the tick itself.
    pub fn bar_start_time(&self, timestamp: TimestampMs) -> TimestampMs {
        match self.rule {
            BoundaryRule::Time { duration_ms } => floor_timestamp(timestamp, duration_ms),
            _ => timestamp,
        }
    }
}

fn required_count(config: &FootprintConfig) -> Result<u64> {
    match config.aggregation_value.as_count() {
        Some(0) => Err(Error::config(format!(
            "{} aggregation requires a positive count",
            config.aggregation_type.as_str()
        ))),
        Some(n) => Ok(n),
        None => Err(Error::config(format!(
            "{} aggregation requires a count, got a duration string",
            config.aggregation_type.as_str()
        ))),
    }
}
