//! Threat Module
//!
//! Threat categories, severity labels and the static mitigation catalog.
//!
//! ## Structure
//! - `types`: ThreatCategory, ThreatOrigin, Severity
//! - `catalog`: candidate mitigation actions per threat

pub mod types;
pub mod catalog;

pub use types::{ThreatCategory, ThreatOrigin, Severity, ParseSeverityError};
pub use catalog::{mitigations_for, is_cataloged, NO_MITIGATION_AVAILABLE};
