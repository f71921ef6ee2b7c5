//! Learner
//!
//! One-step temporal-difference update for severity estimates and an
//! incremental average for mitigation effectiveness.

use super::state::State;
use super::table::{MitigationValueTable, SeverityValueTable};
use crate::logic::config::Hyperparameters;
use crate::logic::threat::{Severity, ThreatCategory};

/// Upper bound of the human effectiveness scale
pub const EFFECTIVENESS_SCALE: f64 = 10.0;

/// +multiplier when correct, -multiplier otherwise.
/// The multiplier is the upstream confidence clamped to [0, 1] when present
/// and finite, else 1.0.
pub fn severity_reward(is_correct: bool, confidence: Option<f64>) -> f64 {
    let multiplier = confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(1.0);
    if is_correct { multiplier } else { -multiplier }
}

/// Map a 0-10 effectiveness score onto [0, 1] (clamped)
pub fn normalize_effectiveness(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, EFFECTIVENESS_SCALE) / EFFECTIVENESS_SCALE
}

/// Applies update rules with the agent's alpha/gamma
#[derive(Debug, Clone, Copy)]
pub struct Learner {
    pub learning_rate: f64,
    pub discount_factor: f64,
}

impl Learner {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self { learning_rate, discount_factor }
    }

    pub fn from_hyperparameters(hp: &Hyperparameters) -> Self {
        Self::new(hp.learning_rate, hp.discount_factor)
    }

    /// `Q(s,a) += α (r + γ max Q(s',·) - Q(s,a))`, returns the new value.
    ///
    /// The future term is read before the write, so when `next_state == state`
    /// it sees the pre-update row.
    pub fn update_severity(
        &self,
        table: &mut SeverityValueTable,
        state: &State,
        label: Severity,
        reward: f64,
        next_state: &State,
    ) -> f64 {
        let future_best = table.max_value(next_state);
        let old_value = table.value(state, label);
        let new_value =
            old_value + self.learning_rate * (reward + self.discount_factor * future_best - old_value);
        if !new_value.is_finite() {
            log::warn!("Discarding non-finite severity update for {} ({})", state.threat, label);
            return old_value;
        }
        table.set(state, label, new_value);
        new_value
    }

    /// `E += α (observed - E)`, returns the new value
    pub fn update_mitigation(
        &self,
        table: &mut MitigationValueTable,
        threat: &ThreatCategory,
        action: &str,
        effectiveness: f64,
    ) -> f64 {
        let old_value = table.value(threat, action);
        let new_value = old_value + self.learning_rate * (effectiveness - old_value);
        if !new_value.is_finite() {
            log::warn!("Discarding non-finite mitigation update for '{}' ({})", action, threat);
            return old_value;
        }
        table.set(threat, action, new_value);
        new_value
    }
}
