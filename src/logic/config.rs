//! Agent configuration
//!
//! Hyperparameters and on-disk locations. Values come from the environment
//! (see `constants`) and fall back to compiled defaults.

use std::path::{Path, PathBuf};

use crate::constants::{self, DATA_DIR_NAME, METRICS_FILE_NAME, STATE_FILE_NAME};

/// Learning hyperparameters (persisted with the agent state)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hyperparameters {
    /// Alpha
    pub learning_rate: f64,
    /// Gamma
    pub discount_factor: f64,
    /// Base epsilon
    pub exploration_rate: f64,
}

impl Hyperparameters {
    /// Each rate forced into [0, 1]; a non-finite rate takes its default.
    ///
    /// Keeps every TD target bounded, so learned values stay finite.
    pub fn bounded(self) -> Self {
        let defaults = Self::default();
        let bounded = Self {
            learning_rate: unit_interval(self.learning_rate, defaults.learning_rate),
            discount_factor: unit_interval(self.discount_factor, defaults.discount_factor),
            exploration_rate: unit_interval(self.exploration_rate, defaults.exploration_rate),
        };
        if bounded != self {
            log::warn!("Hyperparameters {:?} out of range, using {:?}", self, bounded);
        }
        bounded
    }
}

fn unit_interval(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: constants::DEFAULT_LEARNING_RATE,
            discount_factor: constants::DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: constants::DEFAULT_EXPLORATION_RATE,
        }
    }
}

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Defaults used when no persisted state exists
    pub hyperparameters: Hyperparameters,

    /// Directory holding the state blob and the prediction log
    pub data_dir: PathBuf,

    /// Flush after every feedback-bearing call
    pub autosave: bool,

    /// Fixed RNG seed, entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            hyperparameters: Hyperparameters::default(),
            data_dir: default_data_dir(),
            autosave: true,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            hyperparameters: Hyperparameters {
                learning_rate: constants::get_learning_rate(),
                discount_factor: constants::get_discount_factor(),
                exploration_rate: constants::get_exploration_rate(),
            }
            .bounded(),
            data_dir: std::env::var("THREAT_RL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            autosave: constants::is_autosave_enabled(),
            seed: constants::get_seed(),
        }
    }

    /// Config rooted at a specific directory (tests, embedded use)
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = hyperparameters.bounded();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE_NAME)
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.data_dir.join(METRICS_FILE_NAME)
    }
}

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
