//! State Validation
//!
//! Schema gate, payload checksum and finiteness checks for the state blob.

use sha2::{Digest, Sha256};

use super::types::{StateFile, AgentState, STATE_SCHEMA_VERSION};
use crate::logic::error::{AgentError, AgentResult};

/// Hex SHA-256 over the serialized state payload
pub fn state_checksum(state: &AgentState) -> AgentResult<String> {
    let payload = serde_json::to_vec(state)?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(hex::encode(hasher.finalize()))
}

/// Reject states holding NaN or infinity.
///
/// JSON has no encoding for them (`serde_json` writes `null`), so such a
/// blob would save cleanly and then fail to load.
pub fn validate_finite(state: &AgentState) -> AgentResult<()> {
    let hp = &state.hyperparameters;
    let scalars = [
        ("learning_rate", hp.learning_rate),
        ("discount_factor", hp.discount_factor),
        ("exploration_rate", hp.exploration_rate),
        ("accuracy", state.accuracy),
    ];
    if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AgentError::NonFinite(format!("{} = {}", name, value)));
    }

    for entry in state.severity_values.entries() {
        if let Some((label, value)) = entry.values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AgentError::NonFinite(format!(
                "severity {} at {}/{}/{} = {}",
                label,
                entry.state.threat,
                entry.state.temperature_bucket,
                entry.state.precipitation_bucket,
                value
            )));
        }
    }

    for entry in state.mitigation_values.entries() {
        if !entry.effectiveness.is_finite() {
            return Err(AgentError::NonFinite(format!(
                "mitigation '{}' ({}) = {}",
                entry.action, entry.threat, entry.effectiveness
            )));
        }
    }
    Ok(())
}

/// Reject files written under another schema
pub fn validate_schema(version: u32) -> AgentResult<()> {
    if version != STATE_SCHEMA_VERSION {
        return Err(AgentError::SchemaMismatch {
            expected: STATE_SCHEMA_VERSION,
            actual: version,
        });
    }
    Ok(())
}

/// Validate schema version and payload checksum of a decoded file
pub fn validate_state_file(file: &StateFile<AgentState>) -> AgentResult<()> {
    validate_schema(file.schema_version)?;

    let expected = state_checksum(&file.state)?;
    if !expected.eq_ignore_ascii_case(&file.checksum) {
        return Err(AgentError::ChecksumMismatch);
    }
    Ok(())
}
