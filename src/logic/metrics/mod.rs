//! Metrics Module
//!
//! Prediction records, running accuracy counters and aggregate reports.
//!
//! ## Structure
//! - `record.rs` - PredictionRecord (one log row per feedback cycle)
//! - `recorder.rs` - counters + in-memory buffer awaiting flush
//! - `report.rs` - PerformanceMetrics and PerformanceReport

pub mod record;
pub mod recorder;
pub mod report;

pub use record::{PredictionRecord, COLUMNS};
pub use recorder::{accuracy_percent, MetricsRecorder};
pub use report::{rolling_accuracy, PerformanceMetrics, PerformanceReport, ThreatPerformance};
