use super::agent::{AdaptiveAgent, AgentPhase};
use super::policy::MitigationChoice;
use super::state::encode;
use crate::logic::config::{AgentConfig, Hyperparameters};
use crate::logic::threat::{mitigations_for, Severity, ThreatCategory};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn greedy_config(dir: &Path) -> AgentConfig {
    AgentConfig::in_dir(dir)
        .with_hyperparameters(Hyperparameters {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.0,
        })
        .with_seed(42)
}

#[test]
fn test_fresh_agent_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let agent = AdaptiveAgent::new(greedy_config(dir.path()));

    assert_eq!(agent.phase(), AgentPhase::Fresh);
    let metrics = agent.get_performance_metrics();
    assert_eq!(metrics.accuracy, 0.0);
    assert_eq!(metrics.total_predictions, 0);
    assert_eq!(metrics.learning_rate, 0.1);
    assert_eq!(metrics.exploration_rate, 0.0);
}

#[test]
fn test_fire_scripted_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));
    let fire = ThreatCategory::Fire;
    let state = encode(&fire, 25.0, 10.0);

    // Neutral entry so exploitation starts from the canonical first label
    agent.seed_severity(&state, Severity::Low, 0.0);

    let truths = [Severity::Low, Severity::Low, Severity::Medium];
    let mut chosen = Vec::new();
    for truth in truths {
        let p = agent.predict_with_feedback(&fire, 25.0, 10.0, truth, None).unwrap();
        chosen.push(p.severity);
    }

    assert_eq!(chosen, vec![Severity::Low; 3]);
    // 0.1, then 0.1 + 0.1 * (1 + 0.09 - 0.1), then that + 0.1 * (-1 + 0.9 * v - v)
    let v1 = 0.0 + 0.1 * (1.0 + 0.9 * 0.0 - 0.0);
    let v2 = v1 + 0.1 * (1.0 + 0.9 * v1 - v1);
    let v3 = v2 + 0.1 * (-1.0 + 0.9 * v2 - v2);
    assert_eq!(agent.severity_values().value(&state, Severity::Low), v3);
    assert!((v3 - 0.09701).abs() < 1e-12);
    assert_eq!(agent.get_performance_metrics().accuracy, 200.0 / 3.0);
    assert_eq!(agent.phase(), AgentPhase::Active);
}

#[test]
fn test_accuracy_bookkeeping() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));
    let drought = ThreatCategory::Drought;

    // Separate states so each greedy pick is Low
    let cases = [
        (0.0, Severity::Low),
        (10.0, Severity::Low),
        (20.0, Severity::High),
        (30.0, Severity::Low),
        (40.0, Severity::Severe),
    ];
    for (temp, _) in cases {
        agent.seed_severity(&encode(&drought, temp, 0.0), Severity::Low, 0.0);
    }

    let mut last = 0.0;
    for (temp, truth) in cases {
        last = agent.predict_with_feedback(&drought, temp, 0.0, truth, None).unwrap().accuracy;
    }

    let metrics = agent.get_performance_metrics();
    assert_eq!(metrics.total_predictions, 5);
    assert_eq!(metrics.accuracy, 60.0);
    assert_eq!(last, 60.0);
}

#[test]
fn test_confidence_scales_reward() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));
    let flood = ThreatCategory::Flood;
    let state = encode(&flood, 12.0, 150.0);
    agent.seed_severity(&state, Severity::Low, 0.0);

    agent.predict_with_feedback(&flood, 12.0, 150.0, Severity::Low, Some(0.5)).unwrap();
    // 0.1 * (0.5 + 0.9 * 0 - 0)
    assert_eq!(agent.severity_values().value(&state, Severity::Low), 0.05);

    let records = agent.performance_report().unwrap();
    assert_eq!(records.total_predictions, 1);
}

#[test]
fn test_pure_inference_learns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));

    let p = agent.predict(&ThreatCategory::Storm, 14.0, 60.0, Some(0.7));
    assert!(Severity::ALL.contains(&p.severity));
    assert!(p.mitigation.is_available());
    assert!(agent.severity_values().is_empty());
    assert_eq!(agent.get_performance_metrics().total_predictions, 0);
    assert_eq!(agent.pending_records(), 0);
    assert!(!agent.config().state_path().exists());
}

#[test]
fn test_poaching_mitigation_uniform_when_untrained() {
    let catalog = mitigations_for(&ThreatCategory::Poaching).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let mut seen = HashSet::new();
    for seed in 0..60 {
        let mut agent = AdaptiveAgent::fresh(AgentConfig::in_dir(dir.path()).with_seed(seed));
        match agent.choose_mitigation(&ThreatCategory::Poaching) {
            MitigationChoice::Action(action) => {
                assert!(catalog.contains(&action));
                seen.insert(action);
            }
            MitigationChoice::Unavailable => panic!("Poaching is cataloged"),
        }
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_volcano_has_no_mitigation() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));

    let choice = agent.choose_mitigation(&ThreatCategory::from("Volcano"));
    assert_eq!(choice, MitigationChoice::Unavailable);
    assert_eq!(choice.as_str(), "No mitigation available.");

    // Severity learning still works for unlisted threats
    let p = agent
        .predict_with_feedback(&ThreatCategory::from("Volcano"), 45.0, 0.0, Severity::Severe, None)
        .unwrap();
    assert_eq!(p.mitigation, MitigationChoice::Unavailable);
}

#[test]
fn test_mitigation_feedback_drives_choice() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));
    let fire = ThreatCategory::Fire;
    let catalog = mitigations_for(&fire).unwrap();

    agent.evaluate_mitigation(&fire, catalog[2], 9.0).unwrap();
    agent.evaluate_mitigation(&fire, catalog[0], 3.0).unwrap();

    assert!((agent.mitigation_values().value(&fire, catalog[2]) - 0.09).abs() < 1e-12);
    for _ in 0..10 {
        assert_eq!(agent.choose_mitigation(&fire), MitigationChoice::Action(catalog[2]));
    }
}

#[test]
fn test_round_trip_through_new_instance() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());
    let fire = ThreatCategory::Fire;

    let mut first = AdaptiveAgent::new(config.clone());
    first.predict_with_feedback(&fire, 31.0, 4.0, Severity::High, Some(0.9)).unwrap();
    first.predict_with_feedback(&ThreatCategory::Flood, 12.0, 180.0, Severity::Medium, None).unwrap();
    first.evaluate_mitigation(&fire, mitigations_for(&fire).unwrap()[1], 7.0).unwrap();
    let before = first.snapshot();
    drop(first);

    let second = AdaptiveAgent::new(config);
    assert_eq!(second.phase(), AgentPhase::Loaded);
    assert_eq!(second.snapshot(), before);
    assert_eq!(second.get_performance_metrics().total_predictions, 2);

    let report = second.performance_report().unwrap();
    assert_eq!(report.total_predictions, 2);
    assert_eq!(report.threat_performance["Fire"].count, 1);
}

#[test]
fn test_persisted_hyperparameters_win() {
    let dir = tempfile::tempdir().unwrap();
    let custom = Hyperparameters {
        learning_rate: 0.3,
        discount_factor: 0.5,
        exploration_rate: 0.25,
    };

    let mut first = AdaptiveAgent::new(AgentConfig::in_dir(dir.path()).with_hyperparameters(custom));
    first.flush().unwrap();

    let second = AdaptiveAgent::new(AgentConfig::in_dir(dir.path()));
    assert_eq!(*second.hyperparameters(), custom);
}

#[test]
fn test_corrupted_state_falls_back_to_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());
    fs::write(config.state_path(), b"\x00\x01 definitely not json").unwrap();

    let agent = AdaptiveAgent::new(config.clone());
    assert_eq!(agent.phase(), AgentPhase::Fresh);
    assert_eq!(agent.get_performance_metrics().total_predictions, 0);

    // Bad file is kept aside, not overwritten
    assert!(!config.state_path().exists());
    let quarantined = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().contains(".corrupt-"));
    assert!(quarantined);
}

#[test]
fn test_flush_failure_keeps_memory_state() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"a file where a directory should be").unwrap();

    let mut agent = AdaptiveAgent::new(greedy_config(&blocker.join("data")));
    let result = agent.predict_with_feedback(&ThreatCategory::Storm, 20.0, 50.0, Severity::High, None);

    assert!(result.is_err());
    assert_eq!(agent.get_performance_metrics().total_predictions, 1);
    assert_eq!(agent.severity_values().len(), 1);
    assert_eq!(agent.pending_records(), 1);
}

#[test]
fn test_manual_flush_when_autosave_off() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = greedy_config(dir.path());
    config.autosave = false;

    let mut agent = AdaptiveAgent::new(config.clone());
    agent.predict_with_feedback(&ThreatCategory::Disease, 22.0, 70.0, Severity::Low, None).unwrap();
    assert!(!config.state_path().exists());
    assert_eq!(agent.pending_records(), 1);

    agent.flush().unwrap();
    assert!(config.state_path().exists());
    assert_eq!(agent.pending_records(), 0);
    assert_eq!(fs::read_to_string(config.metrics_path()).unwrap().lines().count(), 1);
}

#[test]
fn test_export_includes_pending_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = greedy_config(dir.path());
    config.autosave = false;

    let mut agent = AdaptiveAgent::new(config);
    agent.predict_with_feedback(&ThreatCategory::Fire, 30.0, 0.0, Severity::High, None).unwrap();
    agent.flush().unwrap();
    agent.predict_with_feedback(&ThreatCategory::Storm, 15.0, 80.0, Severity::Medium, None).unwrap();

    let dest = dir.path().join("export.csv");
    assert_eq!(agent.export_csv(&dest).unwrap(), 2);
    let csv = fs::read_to_string(&dest).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(2).unwrap().contains("\"Storm\""));
}

#[test]
fn test_rolling_accuracy_after_full_window() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = AdaptiveAgent::new(greedy_config(dir.path()));

    for i in 0..9 {
        agent
            .predict_with_feedback(&ThreatCategory::Landslide, i as f64 * 10.0, 200.0, Severity::Severe, None)
            .unwrap();
    }
    assert!(agent.performance_report().unwrap().rolling_accuracy.is_empty());

    for i in 9..12 {
        agent
            .predict_with_feedback(&ThreatCategory::Landslide, i as f64 * 10.0, 200.0, Severity::Severe, None)
            .unwrap();
    }
    let report = agent.performance_report().unwrap();
    assert_eq!(report.total_predictions, 12);
    assert_eq!(report.rolling_accuracy.len(), 3);
    assert_eq!(report.accuracy_trend.len(), 12);
    assert_eq!(report.threat_performance["Landslide"].count, 12);
}

#[test]
fn test_oversized_confidence_keeps_state_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());
    let fire = ThreatCategory::Fire;

    let mut agent = AdaptiveAgent::new(config.clone());
    agent.evaluate_mitigation(&fire, mitigations_for(&fire).unwrap()[0], 8.0).unwrap();
    for _ in 0..4 {
        agent
            .predict_with_feedback(&fire, 25.0, 10.0, Severity::Low, Some(f64::MAX))
            .unwrap();
    }

    let state = encode(&fire, 25.0, 10.0);
    for label in Severity::ALL {
        let value = agent.severity_values().value(&state, label);
        assert!(value.is_finite() && value.abs() <= 1.0, "{} = {}", label, value);
    }
    drop(agent);

    let reopened = AdaptiveAgent::new(config);
    assert_eq!(reopened.phase(), AgentPhase::Loaded);
    assert_eq!(reopened.get_performance_metrics().total_predictions, 4);
    assert_eq!(reopened.mitigation_values().len(), 1);
}

#[test]
fn test_persisted_hyperparameters_are_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());

    let mut state = AdaptiveAgent::fresh(config.clone()).snapshot();
    state.hyperparameters.learning_rate = 1e308;
    state.hyperparameters.discount_factor = 4.0;
    crate::logic::storage::save_state(&state, &config.state_path()).unwrap();

    let agent = AdaptiveAgent::new(config);
    assert_eq!(agent.phase(), AgentPhase::Loaded);
    assert_eq!(agent.hyperparameters().learning_rate, 1.0);
    assert_eq!(agent.hyperparameters().discount_factor, 1.0);
}

#[test]
fn test_clean_flush_does_not_rewrite_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());
    let mut agent = AdaptiveAgent::new(config.clone());

    agent.predict_with_feedback(&ThreatCategory::Flood, 15.0, 90.0, Severity::High, None).unwrap();
    assert!(!agent.needs_flush());

    fs::remove_file(config.state_path()).unwrap();
    agent.flush().unwrap();
    assert!(!config.state_path().exists());

    agent.evaluate_mitigation(&ThreatCategory::Flood, mitigations_for(&ThreatCategory::Flood).unwrap()[0], 5.0).unwrap();
    assert!(config.state_path().exists());
    assert_eq!(fs::read_to_string(config.metrics_path()).unwrap().lines().count(), 1);
}

#[test]
fn test_non_finite_readings_stay_in_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = greedy_config(dir.path());

    let mut agent = AdaptiveAgent::new(config.clone());
    agent
        .predict_with_feedback(&ThreatCategory::Storm, f64::NAN, f64::INFINITY, Severity::High, None)
        .unwrap();
    agent.predict_with_feedback(&ThreatCategory::Storm, 18.0, 40.0, Severity::High, None).unwrap();
    drop(agent);

    let reopened = AdaptiveAgent::new(config);
    let report = reopened.performance_report().unwrap();
    assert_eq!(report.total_predictions as u64, reopened.get_performance_metrics().total_predictions);
    assert_eq!(report.threat_performance["Storm"].count, 2);
}
