//! The footprint aggregation engine.
//!
//! Folds an ordered tick stream into footprint bars according to the
//! configured boundary policy, retaining a bounded history of finalized
//! bars. Single-threaded and synchronous: one engine instance per driving
//! thread, no shared mutable state.

use crate::bar::FootprintBar;
use crate::boundary::BoundaryPolicy;
use footprint_core::{ts_to_datetime, FootprintConfig, Result, Tick, TimestampMs};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Processes ticks into footprint bars and manages the finalized history.
pub struct FootprintEngine {
    /// Immutable after construction.
    config: FootprintConfig,
    /// Boundary rule resolved from the configuration.
    boundary: BoundaryPolicy,
    /// The bar currently being built, if any. Exclusively owned.
    current_bar: Option<FootprintBar>,
    /// Finalized bars, oldest first, bounded by `max_bars_in_memory`.
    bars: VecDeque<FootprintBar>,
    /// Ticks seen, including rejected ones. Diagnostic only.
    ticks_processed: u64,
    /// Ticks rejected by the input contract. Diagnostic only.
    ticks_rejected: u64,
    /// Timestamp of the last accepted tick, for ordering checks.
    last_timestamp: Option<TimestampMs>,
}

impl FootprintEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: FootprintConfig) -> Result<Self> {
        config.validate()?;
        let boundary = BoundaryPolicy::from_config(&config)?;

        info!(
            aggregation = config.aggregation_type.as_str(),
            tick_size = config.tick_size,
            "footprint engine initialized"
        );

        Ok(Self {
            config,
            boundary,
            current_bar: None,
            bars: VecDeque::new(),
            ticks_processed: 0,
            ticks_rejected: 0,
            last_timestamp: None,
        })
    }

    /// Process a single tick.
    ///
    /// Ticks violating the input contract (non-positive volume, non-finite
    /// price, timestamp earlier than the last accepted tick) are skipped
    /// with a diagnostic rather than corrupting bar state.
    pub fn process_tick(&mut self, tick: &Tick) {
        self.ticks_processed += 1;

        if !self.accept(tick) {
            return;
        }

        let needs_new_bar = match &self.current_bar {
            None => true,
            Some(bar) => self.boundary.crosses_boundary(bar, tick),
        };

        let quantized_price = self.quantize(tick.price);

        if needs_new_bar {
            if let Some(bar) = self.current_bar.take() {
                self.finalize_bar(bar);
            }
            let start_time = self.boundary.bar_start_time(tick.timestamp);
            self.current_bar = Some(FootprintBar::new(start_time, tick.timestamp, quantized_price));
            debug!(start_time = %ts_to_datetime(start_time), "opened new bar");
        }

        let bar = self
            .current_bar
            .as_mut()
            .expect("in-progress bar must exist after creation");
        bar.extend(
            quantized_price,
            tick.volume,
            tick.is_bid_trade,
            tick.timestamp,
            self.config.zero_ratio_handling,
        );
        self.last_timestamp = Some(tick.timestamp);
    }

    /// Process an ordered batch of ticks.
    ///
    /// After the batch the in-progress bar's summary statistics are
    /// refreshed without finalizing it, so observers see up-to-date
    /// numbers for the still-open window.
    pub fn process_batch(&mut self, ticks: &[Tick]) {
        info!(count = ticks.len(), "processing tick batch");
        for tick in ticks {
            self.process_tick(tick);
        }
        if let Some(bar) = &mut self.current_bar {
            bar.update_bar_statistics(self.config.value_area_fraction);
        }
    }

    /// Force-close the in-progress bar, e.g. at end of stream.
    ///
    /// No-op when nothing is in progress.
    pub fn finalize_current(&mut self) {
        if let Some(bar) = self.current_bar.take() {
            self.finalize_bar(bar);
        }
    }

    /// Snapshot of the finalized history, oldest first.
    ///
    /// Returns owned copies; mutating them does not affect engine state.
    pub fn completed_bars(&self) -> Vec<FootprintBar> {
        self.bars.iter().cloned().collect()
    }

    /// The bar currently being built, if any.
    pub fn current_bar(&self) -> Option<&FootprintBar> {
        self.current_bar.as_ref()
    }

    /// The engine configuration.
    pub fn config(&self) -> &FootprintConfig {
        &self.config
    }

    /// Total ticks seen, including rejected ones.
    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }

    /// Ticks rejected by the input contract.
    pub fn ticks_rejected(&self) -> u64 {
        self.ticks_rejected
    }

    /// Input contract checks. Rejections are logged and counted.
    fn accept(&mut self, tick: &Tick) -> bool {
        if tick.volume == 0 {
            warn!(timestamp = tick.timestamp, "rejected tick: non-positive volume");
            self.ticks_rejected += 1;
            return false;
        }
        if !tick.price.is_finite() {
            warn!(timestamp = tick.timestamp, "rejected tick: non-finite price");
            self.ticks_rejected += 1;
            return false;
        }
        if let Some(last) = self.last_timestamp {
            if tick.timestamp < last {
                warn!(
                    timestamp = tick.timestamp,
                    last_timestamp = last,
                    "rejected tick: out of order"
                );
                self.ticks_rejected += 1;
                return false;
            }
        }
        true
    }

    /// Quantize a price to the nearest multiple of the configured tick
    /// size. Ties round away from zero.
    fn quantize(&self, price: f64) -> f64 {
        (price / self.config.tick_size).round() * self.config.tick_size
    }

    /// Compute final statistics, append to history, evict the oldest bars
    /// past the retention bound.
    fn finalize_bar(&mut self, mut bar: FootprintBar) {
        bar.update_bar_statistics(self.config.value_area_fraction);
        debug!(
            start = %ts_to_datetime(bar.start_time),
            end = %ts_to_datetime(bar.end_time),
            volume = bar.total_bar_volume,
            delta = bar.bar_delta,
            "finalized bar"
        );
        self.bars.push_back(bar);
        while self.bars.len() > self.config.max_bars_in_memory {
            self.bars.pop_front();
        }
    }
}
