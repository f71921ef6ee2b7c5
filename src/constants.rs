//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override these at startup (see `logic::config`).

/// Default learning rate (alpha)
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default discount factor (gamma)
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;

/// Default exploration rate (epsilon)
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;

/// Temperature bucket width (degrees C)
pub const TEMPERATURE_BUCKET_WIDTH: f64 = 5.0;

/// Precipitation bucket width (mm)
pub const PRECIPITATION_BUCKET_WIDTH: f64 = 10.0;

/// Window size for the rolling accuracy series
pub const ROLLING_WINDOW: usize = 10;

/// Temperature used when the upstream forecaster supplies none
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Precipitation used when the upstream forecaster supplies none
pub const DEFAULT_PRECIPITATION: f64 = 10.0;

/// Persisted agent state file name
pub const STATE_FILE_NAME: &str = "rl_agent_state.json";

/// Append-only prediction log file name
pub const METRICS_FILE_NAME: &str = "rl_performance.jsonl";

/// Data directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "threat-rl";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Threat RL Core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get learning rate from environment or use default
pub fn get_learning_rate() -> f64 {
    env_f64("THREAT_RL_LEARNING_RATE").unwrap_or(DEFAULT_LEARNING_RATE)
}

/// Get discount factor from environment or use default
pub fn get_discount_factor() -> f64 {
    env_f64("THREAT_RL_DISCOUNT_FACTOR").unwrap_or(DEFAULT_DISCOUNT_FACTOR)
}

/// Get exploration rate from environment or use default
pub fn get_exploration_rate() -> f64 {
    env_f64("THREAT_RL_EXPLORATION_RATE").unwrap_or(DEFAULT_EXPLORATION_RATE)
}

/// Check if every feedback-bearing call should flush to disk
pub fn is_autosave_enabled() -> bool {
    std::env::var("THREAT_RL_AUTOSAVE")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Optional fixed RNG seed (reproducible runs)
pub fn get_seed() -> Option<u64> {
    std::env::var("THREAT_RL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
