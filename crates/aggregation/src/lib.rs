//! Footprint bar formation and aggregation.
//!
//! This crate handles:
//! - Per-price-level bid/ask volume accumulation
//! - Bar-level summary statistics (POC, Value Area, delta)
//! - Bar boundary decisions (time / tick / volume modes)
//! - Tick ingestion and the finalized-bar history

pub mod bar;
pub mod boundary;
pub mod engine;
pub mod price_level;

pub use bar::FootprintBar;
pub use boundary::BoundaryPolicy;
pub use engine::FootprintEngine;
pub use price_level::PriceLevelAggregate;
