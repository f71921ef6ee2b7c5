use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::threat::{Severity, ThreatCategory};

/// One row of the prediction log, written per decision+feedback cycle.
/// Field names are the log's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub timestamp: DateTime<Utc>,
    pub threat_type: ThreatCategory,
    #[serde(with = "reading")]
    pub temperature: f64,
    #[serde(with = "reading")]
    pub precipitation: f64,
    pub predicted_severity: Severity,
    pub actual_severity: Option<Severity>,
    pub reward: f64,
    pub is_correct: bool,
    /// Running accuracy (percent) right after this record was counted
    pub current_accuracy: f64,
}

/// Column order for tabular exports
pub const COLUMNS: [&str; 9] = [
    "timestamp",
    "threat_type",
    "temperature",
    "precipitation",
    "predicted_severity",
    "actual_severity",
    "reward",
    "is_correct",
    "current_accuracy",
];

/// Raw sensor readings, which may be NaN or infinite.
///
/// Finite values stay JSON numbers; others are written as the strings
/// `"NaN"`, `"inf"`, `"-inf"`. A `null` reads back as NaN.
mod reading {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(value)) => Ok(value),
            Some(Raw::Text(text)) => text
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid reading: {}", text))),
            None => Ok(f64::NAN),
        }
    }
}
