//! Configuration structures for the footprint-analyzer system.

use crate::display::{
    BackgroundType, CandlestickMarkerStyle, ColoringMethod, NumberBarsTextType,
};
use crate::error::{Error, Result};
use crate::types::{AggregationType, ZeroRatioHandling};
use serde::{Deserialize, Serialize};

/// Main configuration for the footprint engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintConfig {
    /// Tick size (minimum price increment); prices are quantized to
    /// multiples of this.
    pub tick_size: f64,
    /// Method for deciding when a new bar begins.
    pub aggregation_type: AggregationType,
    /// Threshold for the chosen aggregation method: a duration string for
    /// time bars ("1min", "30s"), a positive count for the others.
    pub aggregation_value: AggregationValue,
    /// Target Value Area coverage as a fraction in (0, 1].
    pub value_area_fraction: f64,
    /// Zero-denominator policy for per-level dominance ratios.
    pub zero_ratio_handling: ZeroRatioHandling,
    /// Maximum finalized bars retained in memory (oldest evicted first).
    pub max_bars_in_memory: usize,
    /// Display style metadata; not consulted by the aggregation path.
    pub chart_style: ChartStyleConfig,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            tick_size: 0.25,
            aggregation_type: AggregationType::Time,
            aggregation_value: AggregationValue::Duration("1min".to_string()),
            value_area_fraction: 0.70,
            zero_ratio_handling: ZeroRatioHandling::ClampToOne,
            max_bars_in_memory: 10_000,
            chart_style: ChartStyleConfig::default(),
        }
    }
}

impl FootprintConfig {
    /// Validate the configuration.
    ///
    /// Invalid values are surfaced here rather than silently defaulted.
    pub fn validate(&self) -> Result<()> {
        if !self.tick_size.is_finite() || self.tick_size <= 0.0 {
            return Err(Error::config(format!(
                "tick_size must be finite and positive, got {}",
                self.tick_size
            )));
        }
        if !(self.value_area_fraction > 0.0 && self.value_area_fraction <= 1.0) {
            return Err(Error::config(format!(
                "value_area_fraction must lie in (0, 1], got {}",
                self.value_area_fraction
            )));
        }
        if self.max_bars_in_memory == 0 {
            return Err(Error::config("max_bars_in_memory must be positive"));
        }

        match (self.aggregation_type, &self.aggregation_value) {
            (AggregationType::Time, AggregationValue::Duration(s)) => {
                parse_duration_ms(s)?;
            }
            (AggregationType::Time, AggregationValue::Count(_)) => {
                return Err(Error::config(
                    "time aggregation requires a duration string, got a count",
                ));
            }
            (agg, AggregationValue::Count(n)) => {
                if *n == 0 {
                    return Err(Error::config(format!(
                        "{} aggregation requires a positive count",
                        agg.as_str()
                    )));
                }
            }
            (agg, AggregationValue::Duration(_)) => {
                return Err(Error::config(format!(
                    "{} aggregation requires a count, got a duration string",
                    agg.as_str()
                )));
            }
        }

        Ok(())
    }
}

/// Threshold value for an aggregation method.
///
/// Serialized untagged, so `100` and `"1min"` both deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregationValue {
    /// Tick/volume count threshold.
    Count(u64),
    /// Duration string for time bars.
    Duration(String),
}

impl AggregationValue {
    /// Get the count threshold, if this is a count.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            AggregationValue::Count(n) => Some(*n),
            AggregationValue::Duration(_) => None,
        }
    }

    /// Get the duration string, if this is a duration.
    pub fn as_duration(&self) -> Option<&str> {
        match self {
            AggregationValue::Count(_) => None,
            AggregationValue::Duration(s) => Some(s.as_str()),
        }
    }
}

/// Display style metadata for rendering footprint columns.
///
/// Vestigial Sierra Chart study settings; the engine never reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyleConfig {
    /// Column background rendering.
    pub background: BackgroundType,
    /// Background/text coloring method.
    pub coloring: ColoringMethod,
    /// Cell text contents.
    pub text: NumberBarsTextType,
    /// Open/close marker style.
    pub marker: CandlestickMarkerStyle,
}

impl Default for ChartStyleConfig {
    fn default() -> Self {
        Self {
            background: BackgroundType::VolumeProfile,
            coloring: ColoringMethod::DominantSideAskBidVolPercentage,
            text: NumberBarsTextType::AskVolBidVolDifference,
            marker: CandlestickMarkerStyle::CandlestickOutline,
        }
    }
}

/// Parse a duration string like "1min", "30s", "4h" or "250ms" into
/// milliseconds.
pub fn parse_duration_ms(s: &str) -> Result<i64> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| Error::config(format!("duration '{}' is missing a unit", s)))?;
    let (digits, unit) = s.split_at(split);

    let value: i64 = digits
        .parse()
        .map_err(|_| Error::config(format!("duration '{}' has no numeric value", s)))?;
    if value <= 0 {
        return Err(Error::config(format!(
            "duration '{}' must be positive",
            s
        )));
    }

    let unit_ms = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" => 1,
        "s" | "sec" => 1_000,
        "m" | "min" => 60_000,
        "h" | "hr" => 3_600_000,
        other => {
            return Err(Error::config(format!(
                "unknown duration unit '{}' in '{}'",
                other, s
            )));
        }
    };

    value
        .checked_mul(unit_ms)
        .ok_or_else(|| Error::config(format!("duration '{}' overflows", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FootprintConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_size, 0.25);
        assert_eq!(config.value_area_fraction, 0.70);
        assert_eq!(config.max_bars_in_memory, 10_000);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_ms("1min").unwrap(), 60_000);
        assert_eq!(parse_duration_ms("30s").unwrap(), 30_000);
        assert_eq!(parse_duration_ms("5m").unwrap(), 300_000);
        assert_eq!(parse_duration_ms("4h").unwrap(), 14_400_000);
        assert_eq!(parse_duration_ms("250ms").unwrap(), 250);
        assert_eq!(parse_duration_ms(" 2 min ").unwrap(), 120_000);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration_ms("").is_err());
        assert!(parse_duration_ms("min").is_err());
        assert!(parse_duration_ms("10").is_err());
        assert!(parse_duration_ms("0s").is_err());
        assert!(parse_duration_ms("10 fortnights").is_err());
    }

    #[test]
    fn test_invalid_tick_size() {
        let config = FootprintConfig {
            tick_size: 0.0,
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FootprintConfig {
            tick_size: f64::NAN,
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_value_area_fraction() {
        let config = FootprintConfig {
            value_area_fraction: 0.0,
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FootprintConfig {
            value_area_fraction: 1.5,
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_aggregation_value_mismatch() {
        let config = FootprintConfig {
            aggregation_type: AggregationType::Tick,
            aggregation_value: AggregationValue::Duration("1min".to_string()),
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FootprintConfig {
            aggregation_type: AggregationType::Time,
            aggregation_value: AggregationValue::Count(100),
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = FootprintConfig {
            aggregation_type: AggregationType::Volume,
            aggregation_value: AggregationValue::Count(0),
            ..FootprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_aggregation_value_untagged_serde() {
        let count: AggregationValue = serde_json::from_str("100").unwrap();
        assert_eq!(count, AggregationValue::Count(100));

        let duration: AggregationValue = serde_json::from_str("\"1min\"").unwrap();
        assert_eq!(duration, AggregationValue::Duration("1min".to_string()));
    }
}
