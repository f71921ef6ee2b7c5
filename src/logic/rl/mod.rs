//! RL Module - Adaptive Decision Agent
//!
//! Tabular reinforcement learning over discretized environment states.
//!
//! ## Structure
//! - `state`: State Encoder (bucketing)
//! - `table`: Value Store (severity + mitigation tables)
//! - `policy`: epsilon-greedy selection
//! - `learner`: TD / incremental-average updates
//! - `agent`: facade with lifecycle and persistence
//!
//! ## Usage
//! ```ignore
//! use crate::logic::rl::AdaptiveAgent;
//!
//! let mut agent = AdaptiveAgent::new(AgentConfig::from_env());
//! let p = agent.predict_with_feedback(&ThreatCategory::Fire, 31.0, 4.0, Severity::High, Some(0.8))?;
//! agent.evaluate_mitigation(&ThreatCategory::Fire, p.mitigation.as_str(), 8.0)?;
//! ```

pub mod state;
pub mod table;
pub mod policy;
pub mod learner;
pub mod agent;

#[cfg(test)]
mod tests;

pub use state::{encode, State};
pub use table::{SeverityValueTable, MitigationValueTable};
pub use policy::{EpsilonGreedy, MitigationChoice, effective_exploration_rate};
pub use learner::{Learner, severity_reward, normalize_effectiveness};
pub use agent::{AdaptiveAgent, AgentPhase, Prediction};
