//! Policy
//!
//! Epsilon-greedy severity selection with confidence-scaled exploration, and
//! greedy mitigation selection over the static catalog.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::State;
use super::table::{MitigationValueTable, SeverityValueTable};
use crate::logic::threat::{self, Severity, ThreatCategory, NO_MITIGATION_AVAILABLE};

/// Exploration rate after confidence adjustment.
///
/// `base * (1 + (1 - confidence))`: lower upstream confidence explores more.
/// Confidence is clamped to [0, 1]; a non-finite confidence counts as absent.
pub fn effective_exploration_rate(base: f64, confidence: Option<f64>) -> f64 {
    match confidence.filter(|c| c.is_finite()) {
        Some(c) => base * (1.0 + (1.0 - c.clamp(0.0, 1.0))),
        None => base,
    }
}

/// Outcome of mitigation selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MitigationChoice {
    Action(&'static str),
    /// Threat has no catalog entry
    Unavailable,
}

impl MitigationChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationChoice::Action(action) => *action,
            MitigationChoice::Unavailable => NO_MITIGATION_AVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MitigationChoice::Action(_))
    }
}

impl fmt::Display for MitigationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Epsilon-greedy policy
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedy {
    pub exploration_rate: f64,
}

impl EpsilonGreedy {
    pub fn new(exploration_rate: f64) -> Self {
        Self { exploration_rate }
    }

    /// Pick a severity label for `state`.
    ///
    /// Explores uniformly with the effective rate; otherwise exploits the
    /// highest estimate (first label in `candidates` wins ties). A state with
    /// no estimates cannot be exploited and falls back to a uniform pick.
    pub fn choose_severity<R: Rng + ?Sized>(
        &self,
        table: &SeverityValueTable,
        state: &State,
        candidates: &[Severity],
        confidence: Option<f64>,
        rng: &mut R,
    ) -> Severity {
        let candidates = if candidates.is_empty() { &Severity::ALL[..] } else { candidates };
        let epsilon = effective_exploration_rate(self.exploration_rate, confidence);

        if rng.gen::<f64>() < epsilon || table.row(state).is_none() {
            return uniform(candidates, rng);
        }

        let mut best = candidates[0];
        let mut best_value = table.value(state, best);
        for &label in &candidates[1..] {
            let value = table.value(state, label);
            if value > best_value {
                best = label;
                best_value = value;
            }
        }
        best
    }

    /// Pick a mitigation for `threat`.
    ///
    /// Untouched threats (every catalog estimate still 0.0) get a uniform
    /// pick; otherwise the most effective action, first in catalog order on ties.
    pub fn choose_mitigation<R: Rng + ?Sized>(
        &self,
        table: &MitigationValueTable,
        threat: &ThreatCategory,
        rng: &mut R,
    ) -> MitigationChoice {
        let Some(actions) = threat::mitigations_for(threat) else {
            return MitigationChoice::Unavailable;
        };

        let values: Vec<f64> = actions.iter().map(|a| table.value(threat, a)).collect();
        if values.iter().all(|v| *v == 0.0) {
            return actions
                .choose(rng)
                .map(|a| MitigationChoice::Action(*a))
                .unwrap_or(MitigationChoice::Unavailable);
        }

        let mut best = 0;
        for (i, value) in values.iter().enumerate().skip(1) {
            if *value > values[best] {
                best = i;
            }
        }
        MitigationChoice::Action(actions[best])
    }
}

fn uniform<R: Rng + ?Sized>(candidates: &[Severity], rng: &mut R) -> Severity {
    candidates.choose(rng).copied().unwrap_or(Severity::Medium)
}
