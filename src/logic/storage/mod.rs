//! Storage Module - Persistence Layer
//!
//! - `types`: AgentState and the versioned on-disk envelope
//! - `state_store`: atomic save / validated load of the state blob
//! - `validate`: schema version, checksum and finiteness checks
//! - `metrics_log`: append-only JSONL prediction log
//! - `export`: CSV export of the prediction log

pub mod types;
pub mod validate;
pub mod state_store;
pub mod metrics_log;
pub mod export;


pub use types::{AgentState, StateFile, STATE_SCHEMA_VERSION};
pub use state_store::{save_state, load_state, quarantine_state};
pub use metrics_log::{MetricsLog, read_records};
pub use export::{export_csv, export_log_csv};
