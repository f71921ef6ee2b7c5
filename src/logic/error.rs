//! Error handling

use thiserror::Error;

pub type AgentResult<T> = Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("State schema mismatch: expected v{expected}, got v{actual}")]
    SchemaMismatch { expected: u32, actual: u32 },

    #[error("State checksum mismatch (file corrupted)")]
    ChecksumMismatch,

    #[error("Refusing to persist non-finite value: {0}")]
    NonFinite(String),

    #[error("Agent service not initialized")]
    NotInitialized,
}

impl AgentError {
    /// File was readable but its contents cannot be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            AgentError::Serialization(_)
                | AgentError::SchemaMismatch { .. }
                | AgentError::ChecksumMismatch
        )
    }
}
