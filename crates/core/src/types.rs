//! Core data types for the footprint-analyzer system.

use chrono::{DateTime, TimeZone, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Price type with ordering support, used as the key of price-level maps.
pub type Price = OrderedFloat<f64>;

/// Volume type (contracts or shares).
pub type Volume = u64;

/// Floor a timestamp to the start of its interval.
#[inline]
pub fn floor_timestamp(ts_ms: TimestampMs, interval_ms: i64) -> TimestampMs {
    (ts_ms / interval_ms) * interval_ms
}

/// Convert a millisecond timestamp to a UTC datetime.
///
/// Out-of-range timestamps fall back to the Unix epoch.
#[inline]
pub fn ts_to_datetime(ts_ms: TimestampMs) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ts_ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
}

/// A single trade execution (print) from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp in milliseconds.
    pub timestamp: TimestampMs,
    /// Trade price.
    pub price: f64,
    /// Trade volume.
    pub volume: Volume,
    /// True when an aggressive seller hit the bid ("bid trade");
    /// false when an aggressive buyer lifted the ask.
    pub is_bid_trade: bool,
}

impl Tick {
    /// Create a new tick.
    pub fn new(timestamp: TimestampMs, price: f64, volume: Volume, is_bid_trade: bool) -> Self {
        Self {
            timestamp,
            price,
            volume,
            is_bid_trade,
        }
    }
}

/// Method for aggregating ticks into bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    /// Fixed wall-clock interval per bar (e.g. "1min").
    Time,
    /// Fixed number of ticks per bar.
    Tick,
    /// Fixed accumulated volume per bar.
    Volume,
    /// Fixed price range per bar (reserved, not yet implemented).
    Range,
    /// Reversal bars (reserved, not yet implemented).
    Reversal,
}

impl AggregationType {
    /// Human-readable name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationType::Time => "time",
            AggregationType::Tick => "tick",
            AggregationType::Volume => "volume",
            AggregationType::Range => "range",
            AggregationType::Reversal => "reversal",
        }
    }
}

/// How dominance ratios handle a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRatioHandling {
    /// Treat a zero denominator as one (Sierra Chart's
    /// "Enable Bid/Ask Ratios with Zeros as Ones").
    ClampToOne,
    /// Produce `f64::INFINITY` when the numerator is positive, else 0.0.
    InfiniteSentinel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_timestamp_minute() {
        // 2024-01-01 00:01:30.500 -> 2024-01-01 00:01:00.000
        let ts = 1704067290500i64;
        assert_eq!(floor_timestamp(ts, 60_000), 1704067260000);
    }

    #[test]
    fn test_floor_timestamp_already_aligned() {
        assert_eq!(floor_timestamp(120_000, 60_000), 120_000);
    }

    #[test]
    fn test_floor_timestamp_five_minutes() {
        let ts = 1704067290500i64; // 00:01:30.500
        assert_eq!(floor_timestamp(ts, 300_000), 1704067200000); // 00:00:00
    }

    #[test]
    fn test_ts_to_datetime() {
        let dt = ts_to_datetime(1704067200000);
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_aggregation_type_as_str() {
        assert_eq!(AggregationType::Time.as_str(), "time");
        assert_eq!(AggregationType::Reversal.as_str(), "reversal");
    }

    #[test]
    fn test_aggregation_type_serde_lowercase() {
        let json = serde_json::to_string(&AggregationType::Volume).unwrap();
        assert_eq!(json, "\"volume\"");
        let parsed: AggregationType = serde_json::from_str("\"tick\"").unwrap();
        assert_eq!(parsed, AggregationType::Tick);
    }
}
