//! Storage Types
//!
//! `AgentState` and the versioned envelope it is persisted in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::config::Hyperparameters;
use crate::logic::rl::table::{MitigationValueTable, SeverityValueTable};

/// Current on-disk schema. Bump on any incompatible change to `AgentState`.
pub const STATE_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// AGENT STATE
// ============================================================================

/// Everything the agent has learned, plus the knobs it learned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub hyperparameters: Hyperparameters,
    pub total_predictions: u64,
    pub correct_predictions: u64,
    /// Derived from the counters, stored for external readers
    pub accuracy: f64,
    pub severity_values: SeverityValueTable,
    pub mitigation_values: MitigationValueTable,
}

/// Versioned envelope written to disk.
///
/// `checksum` is the hex SHA-256 of the serialized `state` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile<S> {
    pub schema_version: u32,
    pub checksum: String,
    pub saved_at: DateTime<Utc>,
    pub state: S,
}
