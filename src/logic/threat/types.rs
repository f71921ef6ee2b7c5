//! Threat Types
//!
//! Core types for threat categories and severity labels.
//! No learning logic here - only data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// THREAT CATEGORY
// ============================================================================

/// Threat category predicted upstream.
///
/// Names outside the known set are kept verbatim in `Unlisted` so the agent
/// can still learn severities for them; they simply have no mitigations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThreatCategory {
    Deforestation,
    Drought,
    Disease,
    Fire,
    Flood,
    Landslide,
    Lightning,
    Overgrazing,
    Poaching,
    Pollution,
    Storm,
    Earthquake,
    Unlisted(String),
}

impl ThreatCategory {
    /// All known categories, in catalog order
    pub const KNOWN: [ThreatCategory; 12] = [
        ThreatCategory::Deforestation,
        ThreatCategory::Drought,
        ThreatCategory::Disease,
        ThreatCategory::Fire,
        ThreatCategory::Flood,
        ThreatCategory::Landslide,
        ThreatCategory::Lightning,
        ThreatCategory::Overgrazing,
        ThreatCategory::Poaching,
        ThreatCategory::Pollution,
        ThreatCategory::Storm,
        ThreatCategory::Earthquake,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ThreatCategory::Deforestation => "Deforestation",
            ThreatCategory::Drought => "Drought",
            ThreatCategory::Disease => "Disease",
            ThreatCategory::Fire => "Fire",
            ThreatCategory::Flood => "Flood",
            ThreatCategory::Landslide => "Landslide",
            ThreatCategory::Lightning => "Lightning",
            ThreatCategory::Overgrazing => "Overgrazing",
            ThreatCategory::Poaching => "Poaching",
            ThreatCategory::Pollution => "Pollution",
            ThreatCategory::Storm => "Storm",
            ThreatCategory::Earthquake => "Earthquake",
            ThreatCategory::Unlisted(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ThreatCategory::Unlisted(_))
    }

    /// Natural vs human-made classification
    pub fn origin(&self) -> ThreatOrigin {
        match self {
            ThreatCategory::Deforestation
            | ThreatCategory::Overgrazing
            | ThreatCategory::Poaching
            | ThreatCategory::Pollution => ThreatOrigin::HumanMade,
            ThreatCategory::Unlisted(_) => ThreatOrigin::Unknown,
            _ => ThreatOrigin::Natural,
        }
    }
}

impl From<&str> for ThreatCategory {
    fn from(name: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == name)
            .cloned()
            .unwrap_or_else(|| ThreatCategory::Unlisted(name.to_string()))
    }
}

impl From<String> for ThreatCategory {
    fn from(name: String) -> Self {
        ThreatCategory::from(name.as_str())
    }
}

impl From<ThreatCategory> for String {
    fn from(category: ThreatCategory) -> Self {
        match category {
            ThreatCategory::Unlisted(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a threat comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatOrigin {
    Natural,
    HumanMade,
    Unknown,
}

impl ThreatOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatOrigin::Natural => "Natural",
            ThreatOrigin::HumanMade => "Human Made",
            ThreatOrigin::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ThreatOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity category estimate.
///
/// Declaration order is the canonical order used for deterministic tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Low, Severity::Medium, Severity::High, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Severe => "Severe",
        }
    }

    /// Map an upstream 1-10 severity score to a label.
    /// Scores outside 1..=10 map to Medium.
    pub fn from_score(score: i64) -> Self {
        match score {
            1..=3 => Severity::Low,
            4..=6 => Severity::Medium,
            7..=8 => Severity::High,
            9..=10 => Severity::Severe,
            _ => Severity::Medium,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown severity label: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}
