//! Threat RL Core
//!
//! Adaptive decision agent that refines threat severity estimates and
//! recommends mitigations from feedback, persisting what it learns.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::config::{AgentConfig, Hyperparameters};
pub use logic::error::{AgentError, AgentResult};
pub use logic::rl::{AdaptiveAgent, AgentPhase, MitigationChoice, Prediction};
pub use logic::service::AgentService;
pub use logic::threat::{Severity, ThreatCategory, ThreatOrigin};
