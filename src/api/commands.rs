//! Agent Commands - entry points for the threat forecasting pipeline
//!
//! Thin wrappers over the managed agent (`logic::service`). Errors are
//! flattened to `String` for callers that only display them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRECIPITATION, DEFAULT_TEMPERATURE};
use crate::logic::metrics::{PerformanceMetrics, PerformanceReport};
use crate::logic::service::{self, AgentService};
use crate::logic::threat::{self, Severity, ThreatCategory};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Severity + mitigation suggestion without learning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveritySuggestion {
    pub threat_type: String,
    pub origin: String,
    pub severity: String,
    pub mitigation: String,
    pub accuracy: f64,
}

// ============================================================================
// DECISION COMMANDS
// ============================================================================

/// Feed one forecaster prediction through the agent and return a mitigation.
///
/// `severity_score` is the forecaster's 1-10 score, used as ground truth.
/// Missing readings fall back to 25.0 C / 10.0 mm.
pub fn reinforce_predictions(
    threat_type: &str,
    severity_score: i64,
    temperature: Option<f64>,
    precipitation: Option<f64>,
    confidence: Option<f64>,
) -> Result<String, String> {
    reinforce_with(
        service::global(),
        threat_type,
        severity_score,
        temperature,
        precipitation,
        confidence,
    )
}

/// Severity/mitigation suggestion for a threat, nothing is learned
pub fn suggest_severity(
    threat_type: &str,
    temperature: Option<f64>,
    precipitation: Option<f64>,
    confidence: Option<f64>,
) -> SeveritySuggestion {
    suggest_with(service::global(), threat_type, temperature, precipitation, confidence)
}

/// Record human feedback (0-10) on an applied mitigation
pub fn evaluate_mitigation_feedback(
    threat_type: &str,
    mitigation: &str,
    effectiveness_score: f64,
) -> Result<bool, String> {
    evaluate_with(service::global(), threat_type, mitigation, effectiveness_score)
}

// ============================================================================
// ANALYSIS COMMANDS
// ============================================================================

pub fn analyze_performance() -> Result<PerformanceReport, String> {
    service::global().performance_report().map_err(|e| e.to_string())
}

pub fn get_performance_metrics() -> PerformanceMetrics {
    service::global().get_performance_metrics()
}

/// Export the prediction log as CSV, returns the number of rows
pub fn export_performance_csv(path: String) -> Result<usize, String> {
    service::global()
        .export_csv(Path::new(&path))
        .map_err(|e| e.to_string())
}

/// Flush state and log to disk now (no-op error if the agent never started)
pub fn save_agent() -> Result<bool, String> {
    service::instance()
        .and_then(|agent| agent.flush())
        .map_err(|e| e.to_string())?;
    Ok(true)
}

// ============================================================================
// CATALOG COMMANDS
// ============================================================================

/// Candidate mitigations for a threat (empty for unlisted threats)
pub fn mitigation_options(threat_type: &str) -> Vec<String> {
    threat::mitigations_for(&ThreatCategory::from(threat_type))
        .map(|actions| actions.iter().map(|a| a.to_string()).collect())
        .unwrap_or_default()
}

/// "Natural", "Human Made" or "Unknown"
pub fn threat_origin(threat_type: &str) -> String {
    ThreatCategory::from(threat_type).origin().to_string()
}

// ============================================================================
// INTERNAL
// ============================================================================

fn reinforce_with(
    service: &AgentService,
    threat_type: &str,
    severity_score: i64,
    temperature: Option<f64>,
    precipitation: Option<f64>,
    confidence: Option<f64>,
) -> Result<String, String> {
    let threat = ThreatCategory::from(threat_type);
    let actual = Severity::from_score(severity_score);

    let prediction = service
        .predict_with_feedback(
            &threat,
            temperature.unwrap_or(DEFAULT_TEMPERATURE),
            precipitation.unwrap_or(DEFAULT_PRECIPITATION),
            actual,
            confidence,
        )
        .map_err(|e| e.to_string())?;

    // Autosave already flushed unless it is off
    if service.needs_flush() {
        service.flush().map_err(|e| e.to_string())?;
    }

    Ok(prediction.mitigation.to_string())
}

fn suggest_with(
    service: &AgentService,
    threat_type: &str,
    temperature: Option<f64>,
    precipitation: Option<f64>,
    confidence: Option<f64>,
) -> SeveritySuggestion {
    let threat = ThreatCategory::from(threat_type);
    let prediction = service.predict(
        &threat,
        temperature.unwrap_or(DEFAULT_TEMPERATURE),
        precipitation.unwrap_or(DEFAULT_PRECIPITATION),
        confidence,
    );

    SeveritySuggestion {
        threat_type: threat.to_string(),
        origin: threat.origin().to_string(),
        severity: prediction.severity.to_string(),
        mitigation: prediction.mitigation.to_string(),
        accuracy: prediction.accuracy,
    }
}

fn evaluate_with(
    service: &AgentService,
    threat_type: &str,
    mitigation: &str,
    effectiveness_score: f64,
) -> Result<bool, String> {
    service
        .evaluate_mitigation(&ThreatCategory::from(threat_type), mitigation, effectiveness_score)
        .map_err(|e| e.to_string())?;
    Ok(true)
}
