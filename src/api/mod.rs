//! API Module
//!
//! Command surface used by the forecasting pipeline and feedback tools.
//!
//! Usage:
//! - `api::reinforce_predictions("Fire", 8, Some(31.0), Some(4.0), Some(0.9))`
//! - `api::evaluate_mitigation_feedback("Fire", action, 7.0)`
//! - `api::analyze_performance()`

pub mod commands;

pub use commands::*;
