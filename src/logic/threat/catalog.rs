//! Mitigation Catalog
//!
//! Static candidate mitigation actions per threat category.
//! This is configuration data, never learned.

use super::types::ThreatCategory;

/// Returned when a threat has no catalog entry
pub const NO_MITIGATION_AVAILABLE: &str = "No mitigation available.";

const DEFORESTATION: &[&str] = &[
    "Implement reforestation programs.",
    "Enforce stricter logging regulations.",
    "Engage local communities in conservation efforts.",
    "Promote sustainable land-use practices.",
    "Increase monitoring of forest areas.",
];

const DROUGHT: &[&str] = &[
    "Implement water conservation strategies.",
    "Monitor drought indices closely.",
    "Develop drought-resistant vegetation plans.",
    "Educate farmers on sustainable practices during droughts.",
    "Establish water-sharing agreements among communities.",
];

const DISEASE: &[&str] = &[
    "Conduct regular health checks on forest ecosystems.",
    "Implement disease management strategies for affected species.",
    "Increase research on disease-resistant species.",
    "Engage communities in monitoring wildlife health.",
    "Educate the public on disease prevention measures.",
];

const FIRE: &[&str] = &[
    "Increase controlled burns to reduce fuel load.",
    "Ensure firebreaks are well-maintained.",
    "Alert local fire services and prepare for rapid response.",
    "Conduct regular fire drills for local communities.",
    "Implement community awareness programs about fire safety.",
];

const FLOOD: &[&str] = &[
    "Check and reinforce flood defenses.",
    "Clear drainage systems to prevent water accumulation.",
    "Prepare evacuation plans for low-lying areas.",
    "Monitor river levels closely during heavy rains.",
    "Educate communities about flood preparedness.",
];

const LANDSLIDE: &[&str] = &[
    "Conduct geological assessments of vulnerable areas.",
    "Implement erosion control measures.",
    "Establish early warning systems for landslides.",
    "Engage local communities in monitoring activities.",
    "Reinforce infrastructure in landslide-prone zones.",
];

const LIGHTNING: &[&str] = &[
    "Install lightning protection systems in vulnerable areas.",
    "Educate communities about lightning safety measures.",
    "Conduct regular maintenance of tall structures to prevent strikes.",
];

const OVERGRAZING: &[&str] = &[
    "Implement rotational grazing practices.",
    "Engage local farmers in sustainable grazing education.",
    "Monitor pasture health regularly to prevent degradation.",
];

const POACHING: &[&str] = &[
    "Increase patrols in vulnerable wildlife areas.",
    "Engage community watch programs to report illegal activities.",
    "Collaborate with NGOs for wildlife protection initiatives.",
];

const POLLUTION: &[&str] = &[
    "Implement stricter regulations on industrial waste disposal.",
    "Engage communities in clean-up efforts of polluted areas.",
    "Monitor air and water quality regularly.",
];

const STORM: &[&str] = &[
    "Develop emergency response plans for severe weather events.",
    "Ensure infrastructure is resilient to storm impacts.",
    "Educate communities about storm preparedness and safety.",
];

const EARTHQUAKE: &[&str] = &[
    "Reinforce critical infrastructure to withstand tremors.",
    "Develop and practice evacuation plans for high-risk areas.",
    "Monitor seismic activity and issue early warnings.",
    "Educate communities on earthquake safety measures.",
];

/// Candidate mitigations for a threat, `None` for unlisted threats
pub fn mitigations_for(threat: &ThreatCategory) -> Option<&'static [&'static str]> {
    let actions = match threat {
        ThreatCategory::Deforestation => DEFORESTATION,
        ThreatCategory::Drought => DROUGHT,
        ThreatCategory::Disease => DISEASE,
        ThreatCategory::Fire => FIRE,
        ThreatCategory::Flood => FLOOD,
        ThreatCategory::Landslide => LANDSLIDE,
        ThreatCategory::Lightning => LIGHTNING,
        ThreatCategory::Overgrazing => OVERGRAZING,
        ThreatCategory::Poaching => POACHING,
        ThreatCategory::Pollution => POLLUTION,
        ThreatCategory::Storm => STORM,
        ThreatCategory::Earthquake => EARTHQUAKE,
        ThreatCategory::Unlisted(_) => return None,
    };
    Some(actions)
}

/// Is `action` one of the catalog entries for `threat`
pub fn is_cataloged(threat: &ThreatCategory, action: &str) -> bool {
    mitigations_for(threat).map_or(false, |actions| actions.contains(&action))
}
