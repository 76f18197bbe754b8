//! Synthetic tick data generation.
//!
//! Produces a reproducible random-walk tick stream for demos and offline
//! experiments: one price step of ±tick_size or zero per tick, uniform
//! volume, random aggressor side.

use footprint_core::{Tick, TimestampMs, Volume};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for the synthetic stream.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Price the walk starts from.
    pub start_price: f64,
    /// Price step size; also the lower bound the walk is clamped to.
    pub tick_size: f64,
    /// Timestamp of the first tick.
    pub start_time: TimestampMs,
    /// Mean spacing between ticks in milliseconds.
    pub tick_interval_ms: i64,
    /// Volumes are drawn uniformly from `1..=max_volume`.
    pub max_volume: Volume,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_price: 4500.0,
            tick_size: 0.25,
            start_time: 0,
            tick_interval_ms: 500,
            max_volume: 50,
        }
    }
}

/// Seeded random-walk tick generator.
pub struct SyntheticTickGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    current_price: f64,
    current_time: TimestampMs,
}

impl SyntheticTickGenerator {
    /// Create a generator. Identical seeds produce identical streams.
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        let current_price = config.start_price;
        let current_time = config.start_time;
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            current_price,
            current_time,
        }
    }

    /// Produce the next tick of the walk.
    pub fn next_tick(&mut self) -> Tick {
        let timestamp = self.current_time;
        let price = self.current_price;
        let volume = self.rng.gen_range(1..=self.config.max_volume.max(1));
        let is_bid_trade = self.rng.gen_bool(0.5);

        // Advance the walk for the following tick.
        let step = match self.rng.gen_range(0..3) {
            0 => -self.config.tick_size,
            1 => 0.0,
            _ => self.config.tick_size,
        };
        self.current_price = (self.current_price + step).max(self.config.tick_size);
        self.current_time += self.rng.gen_range(1..=2 * self.config.tick_interval_ms.max(1));

        Tick::new(timestamp, price, volume, is_bid_trade)
    }

    /// Produce a batch of `count` ticks.
    pub fn generate(&mut self, count: usize) -> Vec<Tick> {
        (0..count).map(|_| self.next_tick()).collect()
    }
}
