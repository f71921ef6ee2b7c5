//! Aggregate performance statistics over the prediction log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::PredictionRecord;
use super::recorder::accuracy_percent;
use crate::constants::ROLLING_WINDOW;

/// Live agent metrics (pure read of counters and hyperparameters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub accuracy: f64,
    pub total_predictions: u64,
    pub learning_rate: f64,
    pub exploration_rate: f64,
}

/// Accuracy and volume for one threat category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatPerformance {
    pub accuracy: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub overall_accuracy: f64,
    pub total_predictions: usize,
    pub threat_performance: BTreeMap<String, ThreatPerformance>,
    /// Trailing-window accuracy; empty until the log holds a full window
    pub rolling_accuracy: Vec<f64>,
    pub accuracy_trend: Vec<f64>,
    pub agent_metrics: PerformanceMetrics,
}

impl PerformanceReport {
    /// Build a report from records in log order
    pub fn from_records(records: &[PredictionRecord], agent_metrics: PerformanceMetrics) -> Self {
        let correct = records.iter().filter(|r| r.is_correct).count();

        let mut per_threat: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for record in records {
            let entry = per_threat.entry(record.threat_type.to_string()).or_default();
            entry.0 += 1;
            if record.is_correct {
                entry.1 += 1;
            }
        }

        let threat_performance = per_threat
            .into_iter()
            .map(|(threat, (count, correct))| {
                let perf = ThreatPerformance {
                    accuracy: accuracy_percent(correct as u64, count as u64),
                    count,
                };
                (threat, perf)
            })
            .collect();

        Self {
            overall_accuracy: accuracy_percent(correct as u64, records.len() as u64),
            total_predictions: records.len(),
            threat_performance,
            rolling_accuracy: rolling_accuracy(records, ROLLING_WINDOW),
            accuracy_trend: records.iter().map(|r| r.current_accuracy).collect(),
            agent_metrics,
        }
    }
}

/// Accuracy over each trailing `window` of records.
///
/// One value per record from index `window - 1` onward; empty when fewer
/// than `window` records exist.
pub fn rolling_accuracy(records: &[PredictionRecord], window: usize) -> Vec<f64> {
    if window == 0 || records.len() < window {
        return Vec::new();
    }
    records
        .windows(window)
        .map(|w| {
            let correct = w.iter().filter(|r| r.is_correct).count();
            accuracy_percent(correct as u64, window as u64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::{Severity, ThreatCategory};
    use chrono::Utc;

    fn record(threat: ThreatCategory, is_correct: bool) -> PredictionRecord {
        PredictionRecord {
            timestamp: Utc::now(),
            threat_type: threat,
            temperature: 25.0,
            precipitation: 10.0,
            predicted_severity: Severity::Low,
            actual_severity: Some(if is_correct { Severity::Low } else { Severity::High }),
            reward: if is_correct { 1.0 } else { -1.0 },
            is_correct,
            current_accuracy: 0.0,
        }
    }

    fn metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            accuracy: 0.0,
            total_predictions: 0,
            learning_rate: 0.1,
            exploration_rate: 0.1,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = PerformanceReport::from_records(&[], metrics());
        assert_eq!(report.overall_accuracy, 0.0);
        assert_eq!(report.total_predictions, 0);
        assert!(report.threat_performance.is_empty());
        assert!(report.rolling_accuracy.is_empty());
    }

    #[test]
    fn test_per_threat_breakdown() {
        let records = vec![
            record(ThreatCategory::Fire, true),
            record(ThreatCategory::Fire, false),
            record(ThreatCategory::Flood, true),
            record(ThreatCategory::Fire, true),
        ];
        let report = PerformanceReport::from_records(&records, metrics());

        assert_eq!(report.overall_accuracy, 75.0);
        let fire = report.threat_performance["Fire"];
        assert_eq!(fire.count, 3);
        assert_eq!(fire.accuracy, 200.0 / 3.0);
        assert_eq!(report.threat_performance["Flood"].accuracy, 100.0);
    }

    #[test]
    fn test_rolling_needs_full_window() {
        let records: Vec<_> = (0..9).map(|_| record(ThreatCategory::Storm, true)).collect();
        assert!(rolling_accuracy(&records, 10).is_empty());
    }

    #[test]
    fn test_rolling_window_values() {
        // 10 correct, then 2 incorrect
        let mut records: Vec<_> = (0..10).map(|_| record(ThreatCategory::Storm, true)).collect();
        records.push(record(ThreatCategory::Storm, false));
        records.push(record(ThreatCategory::Storm, false));

        let rolling = rolling_accuracy(&records, 10);
        assert_eq!(rolling, vec![100.0, 90.0, 80.0]);
    }
}
