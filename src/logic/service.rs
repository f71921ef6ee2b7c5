//! Agent Service
//!
//! Thread-safe handle around a single `AdaptiveAgent`. Every decision or
//! feedback call takes the write lock, so TD updates and counters never
//! interleave; metrics reads share the read lock.
//!
//! A process-wide instance lives in a `OnceCell`. `init` fixes its
//! configuration (first call wins), `global` lazily builds it from the
//! environment.

use std::path::Path;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::logic::config::AgentConfig;
use crate::logic::error::{AgentError, AgentResult};
use crate::logic::metrics::{PerformanceMetrics, PerformanceReport};
use crate::logic::rl::{AdaptiveAgent, AgentPhase, MitigationChoice, Prediction};
use crate::logic::threat::{Severity, ThreatCategory};

/// Global agent instance
static AGENT: OnceCell<AgentService> = OnceCell::new();

/// Initialize the global agent with an explicit config.
/// Later calls return the existing instance and ignore `config`.
pub fn init(config: AgentConfig) -> &'static AgentService {
    AGENT.get_or_init(|| {
        log::info!("Initializing RL agent (data dir: {:?})", config.data_dir);
        AgentService::new(config)
    })
}

/// Global agent, if `init`/`global` has run
pub fn get() -> Option<&'static AgentService> {
    AGENT.get()
}

/// Global agent, or `NotInitialized` before `init`/`global`
pub fn instance() -> AgentResult<&'static AgentService> {
    AGENT.get().ok_or(AgentError::NotInitialized)
}

/// Global agent, configured from the environment on first use
pub fn global() -> &'static AgentService {
    AGENT.get_or_init(|| AgentService::new(AgentConfig::from_env()))
}

pub struct AgentService {
    agent: RwLock<AdaptiveAgent>,
}

impl AgentService {
    pub fn new(config: AgentConfig) -> Self {
        Self::from_agent(AdaptiveAgent::new(config))
    }

    pub fn from_agent(agent: AdaptiveAgent) -> Self {
        Self {
            agent: RwLock::new(agent),
        }
    }

    pub fn predict_with_feedback(
        &self,
        threat: &ThreatCategory,
        temperature: f64,
        precipitation: f64,
        ground_truth: Severity,
        confidence: Option<f64>,
    ) -> AgentResult<Prediction> {
        self.agent
            .write()
            .predict_with_feedback(threat, temperature, precipitation, ground_truth, confidence)
    }

    pub fn predict(
        &self,
        threat: &ThreatCategory,
        temperature: f64,
        precipitation: f64,
        confidence: Option<f64>,
    ) -> Prediction {
        self.agent.write().predict(threat, temperature, precipitation, confidence)
    }

    pub fn choose_mitigation(&self, threat: &ThreatCategory) -> MitigationChoice {
        self.agent.write().choose_mitigation(threat)
    }

    pub fn evaluate_mitigation(&self, threat: &ThreatCategory, action: &str, score: f64) -> AgentResult<()> {
        self.agent.write().evaluate_mitigation(threat, action, score)
    }

    pub fn flush(&self) -> AgentResult<()> {
        self.agent.write().flush()
    }

    pub fn needs_flush(&self) -> bool {
        self.agent.read().needs_flush()
    }

    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        self.agent.read().get_performance_metrics()
    }

    pub fn performance_report(&self) -> AgentResult<PerformanceReport> {
        self.agent.read().performance_report()
    }

    pub fn export_csv(&self, destination: &Path) -> AgentResult<usize> {
        self.agent.read().export_csv(destination)
    }

    pub fn phase(&self) -> AgentPhase {
        self.agent.read().phase()
    }
}
