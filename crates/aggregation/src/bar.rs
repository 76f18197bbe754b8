//! Footprint bar: one aggregation window with a per-price-level breakdown.

use crate::price_level::PriceLevelAggregate;
use footprint_core::{Price, TimestampMs, Volume, ZeroRatioHandling};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single footprint bar.
///
/// Summary fields (totals, delta, POC, Value Area, `is_up_bar`) are stale
/// until [`FootprintBar::update_bar_statistics`] is invoked; the engine
/// calls it on finalization and after each batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintBar {
    /// Bar start time. For time bars this is the first tick's timestamp
    /// floored to the interval boundary.
    pub start_time: TimestampMs,
    /// Timestamp of the latest tick folded in; only moves forward.
    pub end_time: TimestampMs,
    /// Open price, fixed at creation from the opening tick.
    pub open_price: f64,
    /// Highest quantized price seen.
    pub high_price: f64,
    /// Lowest quantized price seen.
    pub low_price: f64,
    /// Latest quantized price seen.
    pub close_price: f64,
    /// Per-price-level breakdown, keyed by quantized price.
    pub price_levels: BTreeMap<Price, PriceLevelAggregate>,

    /// Summary: sum of level total volumes.
    pub total_bar_volume: Volume,
    /// Summary: sum of level ask volumes.
    pub total_bar_ask_volume: Volume,
    /// Summary: sum of level bid volumes.
    pub total_bar_bid_volume: Volume,
    /// Summary: sum of level trade counts.
    pub total_bar_trades: u64,
    /// Summary: ask volume minus bid volume.
    pub bar_delta: i64,
    /// Summary: price level with the highest total volume.
    pub poc_price: Option<f64>,
    /// Summary: upper bound of the Value Area (inclusive).
    pub value_area_high: Option<f64>,
    /// Summary: lower bound of the Value Area (inclusive).
    pub value_area_low: Option<f64>,
    /// Summary: close at or above open.
    pub is_up_bar: bool,

    /// Ticks folded into this bar, consulted by the tick boundary rule.
    pub tick_count: u64,
    /// Volume folded into this bar, consulted by the volume boundary rule.
    pub accumulated_volume: Volume,
    /// Reserved for range/reversal rules: 0 undetermined, 1 up, -1 down.
    pub bar_direction: i8,
    /// Reserved for range/reversal rules.
    pub extreme_price_during_formation: Option<f64>,
}

impl FootprintBar {
    /// Create a bar opened by a tick at `timestamp` with the given
    /// quantized price. OHLC all seed from the opening price.
    pub fn new(start_time: TimestampMs, timestamp: TimestampMs, open_price: f64) -> Self {
        Self {
            start_time,
            end_time: timestamp,
            open_price,
            high_price: open_price,
            low_price: open_price,
            close_price: open_price,
            price_levels: BTreeMap::new(),
            total_bar_volume: 0,
            total_bar_ask_volume: 0,
            total_bar_bid_volume: 0,
            total_bar_trades: 0,
            bar_delta: 0,
            poc_price: None,
            value_area_high: None,
            value_area_low: None,
            is_up_bar: false,
            tick_count: 0,
            accumulated_volume: 0,
            bar_direction: 0,
            extreme_price_during_formation: None,
        }
    }

    /// Fold one tick into the bar.
    ///
    /// Looks up or creates the price level, records the trade there, then
    /// updates OHLC, end time and the aggregation progress counters.
    pub fn extend(
        &mut self,
        quantized_price: f64,
        volume: Volume,
        is_bid_trade: bool,
        timestamp: TimestampMs,
        zero_handling: ZeroRatioHandling,
    ) {
        let level = self
            .price_levels
            .entry(OrderedFloat(quantized_price))
            .or_insert_with(|| PriceLevelAggregate::new(quantized_price));
        level.record(volume, is_bid_trade, zero_handling);

        self.high_price = self.high_price.max(quantized_price);
        self.low_price = self.low_price.min(quantized_price);
        self.close_price = quantized_price;
        self.end_time = timestamp;
        self.tick_count += 1;
        self.accumulated_volume += volume;
    }

    /// Recompute all bar-level summary statistics from the price levels.
    ///
    /// With no price levels only `is_up_bar` is set; the other summary
    /// fields keep their defaults.
    pub fn update_bar_statistics(&mut self, value_area_fraction: f64) {
        self.is_up_bar = self.close_price >= self.open_price;

        if self.price_levels.is_empty() {
            return;
        }

        self.total_bar_volume = 0;
        self.total_bar_ask_volume = 0;
        self.total_bar_bid_volume = 0;
        self.total_bar_trades = 0;
        for level in self.price_levels.values() {
            self.total_bar_volume += level.total_volume;
            self.total_bar_ask_volume += level.ask_volume;
            self.total_bar_bid_volume += level.bid_volume;
            self.total_bar_trades += level.total_trades;
        }
        self.bar_delta = self.total_bar_ask_volume as i64 - self.total_bar_bid_volume as i64;

        // Ascending (price, volume) pairs; BTreeMap iteration order.
        let levels: Vec<(f64, Volume)> = self
            .price_levels
            .values()
            .map(|level| (level.price, level.total_volume))
            .collect();

        // POC: maximum total volume. Strict comparison over the ascending
        // sequence resolves ties to the lowest price.
        let mut poc_idx = 0usize;
        let mut poc_volume = 0u64;
        for (i, &(_, volume)) in levels.iter().enumerate() {
            if volume > poc_volume {
                poc_volume = volume;
                poc_idx = i;
            }
        }
        self.poc_price = Some(levels[poc_idx].0);

        if self.total_bar_volume == 0 {
            return;
        }

        // Value Area: expand a contiguous window outward from the POC until
        // the target fraction of volume is covered. The side with more
        // volume wins; ties expand upward. Stops short of the target when
        // no neighbor remains on either side.
        let target_volume = self.total_bar_volume as f64 * value_area_fraction;
        let mut va_volume = poc_volume;
        let mut low_idx = poc_idx;
        let mut high_idx = poc_idx;

        while (va_volume as f64) < target_volume {
            let vol_above = if high_idx + 1 < levels.len() {
                levels[high_idx + 1].1
            } else {
                0
            };
            let vol_below = if low_idx > 0 { levels[low_idx - 1].1 } else { 0 };

            if vol_above == 0 && vol_below == 0 {
                break;
            }

            if vol_above >= vol_below {
                high_idx += 1;
                va_volume += vol_above;
            } else {
                low_idx -= 1;
                va_volume += vol_below;
            }
        }

        self.value_area_high = Some(levels[high_idx].0);
        self.value_area_low = Some(levels[low_idx].0);
    }
}
