//! Threat RL Core - performance analysis entry point

use anyhow::Context;

use threat_rl_core::constants::{APP_NAME, APP_VERSION};
use threat_rl_core::logic::config::AgentConfig;
use threat_rl_core::logic::service;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let agent = service::init(AgentConfig::from_env());
    log::info!("RL agent ready ({:?})", agent.phase());

    let report = agent
        .performance_report()
        .context("failed to read prediction log")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    let metrics = &report.agent_metrics;
    log::info!(
        "Accuracy {:.2}% over {} predictions (alpha {}, epsilon {})",
        metrics.accuracy,
        metrics.total_predictions,
        metrics.learning_rate,
        metrics.exploration_rate
    );

    Ok(())
}
