//! Agent Facade
//!
//! The single stateful object composing encoder, value store, policy, learner,
//! metrics and persistence.
//!
//! Lifecycle: construction tries the persisted state (`Loaded`) and falls back
//! to defaults (`Fresh`) when it is absent or unreadable; the first accepted
//! operation moves the agent to `Active`.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::learner::{normalize_effectiveness, severity_reward, Learner};
use super::policy::{EpsilonGreedy, MitigationChoice};
use super::state::{encode, State};
use super::table::{MitigationValueTable, SeverityValueTable};
use crate::logic::config::{AgentConfig, Hyperparameters};
use crate::logic::error::AgentResult;
use crate::logic::metrics::{MetricsRecorder, PerformanceMetrics, PerformanceReport, PredictionRecord};
use crate::logic::storage::{self, AgentState, MetricsLog};
use crate::logic::threat::{self, Severity, ThreatCategory};

/// Where the agent is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentPhase {
    /// Started from defaults (no usable persisted state)
    Fresh,
    /// Restored from the persisted state
    Loaded,
    /// Has accepted at least one operation
    Active,
}

/// Result of one decision step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub severity: Severity,
    pub mitigation: MitigationChoice,
    /// Running accuracy (percent) after this step
    pub accuracy: f64,
}

pub struct AdaptiveAgent {
    config: AgentConfig,
    hyperparameters: Hyperparameters,
    severity_values: SeverityValueTable,
    mitigation_values: MitigationValueTable,
    metrics: MetricsRecorder,
    metrics_log: MetricsLog,
    rng: StdRng,
    phase: AgentPhase,
    /// In-memory state differs from the durable blob
    dirty: bool,
}

impl AdaptiveAgent {
    /// Load persisted state from `config.data_dir`, or start fresh.
    /// Never fails: unreadable state is logged, quarantined and replaced.
    pub fn new(config: AgentConfig) -> Self {
        let path = config.state_path();

        match storage::load_state(&path) {
            Ok(Some(state)) => {
                log::info!(
                    "RL agent state loaded: {} predictions, {} severity states, {} mitigation values",
                    state.total_predictions,
                    state.severity_values.len(),
                    state.mitigation_values.len()
                );
                Self::from_state(config, state, AgentPhase::Loaded)
            }
            Ok(None) => {
                log::info!("No RL agent state at {:?}, starting fresh", path);
                Self::fresh(config)
            }
            Err(e) => {
                log::warn!("RL agent state unreadable ({}), starting fresh", e);
                if e.is_corruption() {
                    match storage::quarantine_state(&path) {
                        Ok(moved) => log::warn!("Corrupted state moved to {:?}", moved),
                        Err(err) => log::error!("Failed to quarantine {:?}: {}", path, err),
                    }
                }
                Self::fresh(config)
            }
        }
    }

    /// Default hyperparameters from config, empty tables, zero counters
    pub fn fresh(config: AgentConfig) -> Self {
        let state = AgentState {
            hyperparameters: config.hyperparameters,
            ..Default::default()
        };
        Self::from_state(config, state, AgentPhase::Fresh)
    }

    fn from_state(config: AgentConfig, state: AgentState, phase: AgentPhase) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let metrics_log = MetricsLog::new(config.metrics_path());

        Self {
            hyperparameters: state.hyperparameters.bounded(),
            severity_values: state.severity_values,
            mitigation_values: state.mitigation_values,
            metrics: MetricsRecorder::from_counters(state.total_predictions, state.correct_predictions),
            metrics_log,
            rng,
            dirty: phase == AgentPhase::Fresh,
            phase,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Decision + feedback
    // ------------------------------------------------------------------

    /// Decision step with ground-truth feedback.
    ///
    /// Picks a severity, scores it against `ground_truth`, applies the TD
    /// update, records the outcome and picks a mitigation. With autosave on,
    /// flushes before returning; a flush error is returned but the in-memory
    /// update stands.
    pub fn predict_with_feedback(
        &mut self,
        threat: &ThreatCategory,
        temperature: f64,
        precipitation: f64,
        ground_truth: Severity,
        confidence: Option<f64>,
    ) -> AgentResult<Prediction> {
        self.phase = AgentPhase::Active;

        let state = encode(threat, temperature, precipitation);
        let severity = self.choose_severity(&state, confidence);

        let is_correct = severity == ground_truth;
        let accuracy = self.metrics.count(is_correct);

        let reward = severity_reward(is_correct, confidence);
        self.learner()
            .update_severity(&mut self.severity_values, &state, severity, reward, &state);
        self.dirty = true;

        self.metrics.push(PredictionRecord {
            timestamp: chrono::Utc::now(),
            threat_type: threat.clone(),
            temperature,
            precipitation,
            predicted_severity: severity,
            actual_severity: Some(ground_truth),
            reward,
            is_correct,
            current_accuracy: accuracy,
        });

        let mitigation = self.choose_mitigation(threat);

        log::debug!(
            "{} @ ({}, {}): predicted {} (actual {}), reward {:.3}, mitigation: {}",
            threat, state.temperature_bucket, state.precipitation_bucket,
            severity, ground_truth, reward, mitigation
        );

        if self.config.autosave {
            self.flush()?;
        }

        Ok(Prediction { severity, mitigation, accuracy })
    }

    /// Pure inference: policy selection only, nothing is learned or recorded
    pub fn predict(
        &mut self,
        threat: &ThreatCategory,
        temperature: f64,
        precipitation: f64,
        confidence: Option<f64>,
    ) -> Prediction {
        self.phase = AgentPhase::Active;

        let state = encode(threat, temperature, precipitation);
        let severity = self.choose_severity(&state, confidence);
        let mitigation = self.choose_mitigation(threat);

        Prediction {
            severity,
            mitigation,
            accuracy: self.metrics.accuracy(),
        }
    }

    /// Best known (or random, when untrained) mitigation for a threat
    pub fn choose_mitigation(&mut self, threat: &ThreatCategory) -> MitigationChoice {
        self.phase = AgentPhase::Active;
        self.policy()
            .choose_mitigation(&self.mitigation_values, threat, &mut self.rng)
    }

    /// Human feedback on a mitigation, `score` on a 0-10 scale
    pub fn evaluate_mitigation(
        &mut self,
        threat: &ThreatCategory,
        action: &str,
        score: f64,
    ) -> AgentResult<()> {
        self.phase = AgentPhase::Active;

        if !threat::is_cataloged(threat, action) {
            log::warn!("Feedback for uncataloged mitigation '{}' ({}), storing anyway", action, threat);
        }

        let effectiveness = normalize_effectiveness(score);
        let value = self
            .learner()
            .update_mitigation(&mut self.mitigation_values, threat, action, effectiveness);
        self.dirty = true;
        log::debug!("Mitigation '{}' for {} now {:.3}", action, threat, value);

        if self.config.autosave {
            self.flush()?;
        }
        Ok(())
    }

    fn choose_severity(&mut self, state: &State, confidence: Option<f64>) -> Severity {
        self.policy().choose_severity(
            &self.severity_values,
            state,
            &Severity::ALL,
            confidence,
            &mut self.rng,
        )
    }

    fn policy(&self) -> EpsilonGreedy {
        EpsilonGreedy::new(self.hyperparameters.exploration_rate)
    }

    fn learner(&self) -> Learner {
        Learner::from_hyperparameters(&self.hyperparameters)
    }

    // ------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------

    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            accuracy: self.metrics.accuracy(),
            total_predictions: self.metrics.total(),
            learning_rate: self.hyperparameters.learning_rate,
            exploration_rate: self.hyperparameters.exploration_rate,
        }
    }

    /// Aggregate report over the durable log plus unflushed records
    pub fn performance_report(&self) -> AgentResult<PerformanceReport> {
        let records = self.records()?;
        Ok(PerformanceReport::from_records(&records, self.get_performance_metrics()))
    }

    /// Write every prediction record (logged and pending) as CSV
    pub fn export_csv(&self, destination: &Path) -> AgentResult<usize> {
        let records = self.records()?;
        storage::export_csv(&records, destination)?;
        log::info!("Exported {} prediction records to {:?}", records.len(), destination);
        Ok(records.len())
    }

    fn records(&self) -> AgentResult<Vec<PredictionRecord>> {
        let mut records = self.metrics_log.read_all()?;
        records.extend_from_slice(self.metrics.pending());
        Ok(records)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the state blob atomically, then append pending records to the log.
    ///
    /// The blob is only rewritten when something changed since the last save.
    /// Records stay buffered until the append succeeds.
    pub fn flush(&mut self) -> AgentResult<()> {
        if self.dirty {
            let path = self.config.state_path();
            if let Err(e) = storage::save_state(&self.snapshot(), &path) {
                log::error!("Failed to save RL agent state to {:?}: {}", path, e);
                return Err(e);
            }
            self.dirty = false;
        }

        let pending = self.metrics.pending().len();
        if pending > 0 {
            match self.metrics_log.append(self.metrics.pending()) {
                Ok(written) => self.metrics.mark_flushed(written),
                Err(e) => {
                    log::error!("Failed to append to {:?}: {}", self.metrics_log.path(), e);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Copy of everything that gets persisted
    pub fn snapshot(&self) -> AgentState {
        AgentState {
            hyperparameters: self.hyperparameters,
            total_predictions: self.metrics.total(),
            correct_predictions: self.metrics.correct(),
            accuracy: self.metrics.accuracy(),
            severity_values: self.severity_values.clone(),
            mitigation_values: self.mitigation_values.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn severity_values(&self) -> &SeverityValueTable {
        &self.severity_values
    }

    pub fn mitigation_values(&self) -> &MitigationValueTable {
        &self.mitigation_values
    }

    /// Unsaved learning or pending records
    pub fn needs_flush(&self) -> bool {
        self.dirty || !self.metrics.pending().is_empty()
    }

    /// Records awaiting the next flush
    pub fn pending_records(&self) -> usize {
        self.metrics.pending().len()
    }

    #[cfg(test)]
    pub(crate) fn seed_severity(&mut self, state: &State, label: Severity, value: f64) {
        self.severity_values.set(state, label, value);
    }
}
