//! Value Store
//!
//! Two strongly-typed tables:
//! - severity values keyed by `State`, one estimate per severity label
//! - mitigation effectiveness keyed by (threat, action)
//!
//! Absent entries read as 0.0. Both tables serialize as sorted entry lists so
//! keys are stored as structured records, never as re-parsed strings.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::state::State;
use crate::logic::threat::{Severity, ThreatCategory};

// ============================================================================
// SEVERITY VALUE TABLE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SeverityEntry>", into = "Vec<SeverityEntry>")]
pub struct SeverityValueTable {
    values: HashMap<State, BTreeMap<Severity, f64>>,
}

/// Persisted row of the severity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityEntry {
    #[serde(flatten)]
    pub state: State,
    pub values: BTreeMap<Severity, f64>,
}

impl SeverityValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate for (state, label), 0.0 when absent
    pub fn value(&self, state: &State, label: Severity) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.get(&label))
            .copied()
            .unwrap_or(0.0)
    }

    /// Learned estimates for a state, if any
    pub fn row(&self, state: &State) -> Option<&BTreeMap<Severity, f64>> {
        self.values.get(state).filter(|row| !row.is_empty())
    }

    /// `max(values(state) ∪ {0.0})`
    pub fn max_value(&self, state: &State) -> f64 {
        self.values
            .get(state)
            .map(|row| row.values().copied().fold(0.0, f64::max))
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: &State, label: Severity, value: f64) {
        self.values
            .entry(state.clone())
            .or_default()
            .insert(label, value);
    }

    /// Number of states with at least one estimate
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries sorted by state (stable serialization order)
    pub fn entries(&self) -> Vec<SeverityEntry> {
        let mut entries: Vec<SeverityEntry> = self
            .values
            .iter()
            .map(|(state, values)| SeverityEntry {
                state: state.clone(),
                values: values.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.state.cmp(&b.state));
        entries
    }
}

impl From<Vec<SeverityEntry>> for SeverityValueTable {
    fn from(entries: Vec<SeverityEntry>) -> Self {
        let mut table = SeverityValueTable::new();
        for entry in entries {
            table.values.entry(entry.state).or_default().extend(entry.values);
        }
        table
    }
}

impl From<SeverityValueTable> for Vec<SeverityEntry> {
    fn from(table: SeverityValueTable) -> Self {
        table.entries()
    }
}

// ============================================================================
// MITIGATION VALUE TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct MitigationKey {
    threat: ThreatCategory,
    action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MitigationEntry>", into = "Vec<MitigationEntry>")]
pub struct MitigationValueTable {
    values: HashMap<MitigationKey, f64>,
}

/// Persisted row of the mitigation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationEntry {
    pub threat: ThreatCategory,
    pub action: String,
    pub effectiveness: f64,
}

impl MitigationValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effectiveness for (threat, action), 0.0 when absent
    pub fn value(&self, threat: &ThreatCategory, action: &str) -> f64 {
        self.values
            .get(&MitigationKey {
                threat: threat.clone(),
                action: action.to_string(),
            })
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, threat: &ThreatCategory, action: &str, value: f64) {
        self.values.insert(
            MitigationKey {
                threat: threat.clone(),
                action: action.to_string(),
            },
            value,
        );
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn entries(&self) -> Vec<MitigationEntry> {
        let mut keys: Vec<&MitigationKey> = self.values.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| MitigationEntry {
                threat: key.threat.clone(),
                action: key.action.clone(),
                effectiveness: self.values[key],
            })
            .collect()
    }
}

impl From<Vec<MitigationEntry>> for MitigationValueTable {
    fn from(entries: Vec<MitigationEntry>) -> Self {
        let mut table = MitigationValueTable::new();
        for entry in entries {
            table.set(&entry.threat, &entry.action, entry.effectiveness);
        }
        table
    }
}

impl From<MitigationValueTable> for Vec<MitigationEntry> {
    fn from(table: MitigationValueTable) -> Self {
        table.entries()
    }
}
