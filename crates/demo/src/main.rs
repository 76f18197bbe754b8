//! Demonstration driver for the footprint aggregation engine.
//!
//! Generates a simulated tick stream and runs it through a time-based and
//! a tick-based engine, logging a summary for every completed bar.

use anyhow::Result;
use footprint_aggregation::{FootprintBar, FootprintEngine};
use footprint_core::{
    ts_to_datetime, AggregationType, AggregationValue, FootprintConfig,
};
use footprint_ingestion::{GeneratorConfig, SyntheticTickGenerator, TickStreamValidator};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn log_bar_summary(bar: &FootprintBar, kind: &str) {
    let poc = bar
        .poc_price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    let value_area = match (bar.value_area_low, bar.value_area_high) {
        (Some(low), Some(high)) => format!("{:.2} to {:.2}", low, high),
        _ => "-".to_string(),
    };

    info!(
        "[{} bar] {} to {} | O={:.2} H={:.2} L={:.2} C={:.2} | volume={} (bid {} / ask {}) \
         delta={} | POC={} VA={} | ticks={}",
        kind,
        ts_to_datetime(bar.start_time).format("%H:%M:%S%.3f"),
        ts_to_datetime(bar.end_time).format("%H:%M:%S%.3f"),
        bar.open_price,
        bar.high_price,
        bar.low_price,
        bar.close_price,
        bar.total_bar_volume,
        bar.total_bar_bid_volume,
        bar.total_bar_ask_volume,
        bar.bar_delta,
        poc,
        value_area,
        bar.tick_count,
    );
}

fn run_engine(config: FootprintConfig, ticks: &[footprint_core::Tick], kind: &str) -> Result<()> {
    let mut engine = FootprintEngine::new(config)?;
    engine.process_batch(ticks);
    engine.finalize_current();

    let completed = engine.completed_bars();
    info!("{} engine produced {} completed bars", kind, completed.len());
    for bar in &completed {
        log_bar_summary(bar, kind);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2025-08-09 09:30:00 UTC.
    let start_time = 1_754_731_800_000;
    let mut generator = SyntheticTickGenerator::new(
        GeneratorConfig {
            start_price: 4500.0,
            tick_size: 0.25,
            start_time,
            tick_interval_ms: 500,
            max_volume: 50,
        },
        42,
    );
    let raw_ticks = generator.generate(500);

    let mut validator = TickStreamValidator::new();
    let ticks = validator.filter_batch(&raw_ticks);
    info!(
        "generated {} ticks, {} accepted by the stream validator",
        raw_ticks.len(),
        validator.stats().accepted_ticks
    );

    run_engine(
        FootprintConfig {
            tick_size: 0.25,
            aggregation_type: AggregationType::Time,
            aggregation_value: AggregationValue::Duration("1min".to_string()),
            ..FootprintConfig::default()
        },
        &ticks,
        "time",
    )?;

    run_engine(
        FootprintConfig {
            tick_size: 0.25,
            aggregation_type: AggregationType::Tick,
            aggregation_value: AggregationValue::Count(100),
            ..FootprintConfig::default()
        },
        &ticks,
        "tick",
    )?;

    Ok(())
}
