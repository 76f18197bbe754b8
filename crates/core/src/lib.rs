//! Core types and configuration for the footprint-analyzer system.
//!
//! This crate provides shared types used across all other crates:
//! - Tick data and aggregation enumerations
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod display;
pub mod error;
pub mod types;

pub use config::{AggregationValue, ChartStyleConfig, FootprintConfig};
pub use error::{Error, Result};
pub use types::*;
