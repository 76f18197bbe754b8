//! Tick-stream supply and normalization for the footprint-analyzer system.
//!
//! This crate handles:
//! - Input-contract validation of tick streams
//! - Synthetic tick generation for demos and offline experiments

pub mod generator;
pub mod validator;

pub use generator::{GeneratorConfig, SyntheticTickGenerator};
pub use validator::{TickStreamValidator, ValidationStats};
