//! State Store
//!
//! Atomic save, validated load and quarantine of the agent state blob.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::types::{AgentState, StateFile, STATE_SCHEMA_VERSION};
use super::validate::{state_checksum, validate_finite, validate_schema, validate_state_file};
use crate::logic::error::{AgentError, AgentResult};

/// Save agent state atomically.
///
/// Writes `<path>.tmp`, syncs it, then renames over `path`. A failure at any
/// step leaves the previously durable file untouched. States holding a
/// non-finite value are rejected before anything is written.
pub fn save_state(state: &AgentState, path: &Path) -> AgentResult<()> {
    validate_finite(state)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = StateFile {
        schema_version: STATE_SCHEMA_VERSION,
        checksum: state_checksum(state)?,
        saved_at: Utc::now(),
        state,
    };
    let json = serde_json::to_vec_pretty(&file)?;

    let tmp = temp_path(path);
    let result = write_synced(&tmp, &json).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(AgentError::Io(e));
    }
    Ok(())
}

/// Load agent state with schema and checksum validation.
///
/// Returns `Ok(None)` when no state file exists.
pub fn load_state(path: &Path) -> AgentResult<Option<AgentState>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read(path)?;

    // Version gate before decoding the payload shape
    let raw: serde_json::Value = serde_json::from_slice(&data)?;
    let version = raw
        .get("schema_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;
    validate_schema(version)?;

    let file: StateFile<AgentState> = serde_json::from_value(raw)?;
    validate_state_file(&file)?;

    Ok(Some(file.state))
}

/// Move an untrusted state file aside as `<file>.corrupt-<timestamp>`
pub fn quarantine_state(path: &Path) -> std::io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d-%H%M%S")));
    let target = path.with_file_name(name);

    fs::rename(path, &target)?;
    Ok(target)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
