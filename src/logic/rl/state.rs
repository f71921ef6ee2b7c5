//! State Encoder
//!
//! Discretizes (threat, temperature, precipitation) into a finite lookup key.
//! Readings that round to the same buckets are the same state.

use serde::{Deserialize, Serialize};

use crate::constants::{PRECIPITATION_BUCKET_WIDTH, TEMPERATURE_BUCKET_WIDTH};
use crate::logic::threat::ThreatCategory;

/// Discretized environment state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub threat: ThreatCategory,
    pub temperature_bucket: i64,
    pub precipitation_bucket: i64,
}

/// Encode raw readings into a state. Total: any input is accepted.
pub fn encode(threat: &ThreatCategory, temperature: f64, precipitation: f64) -> State {
    State {
        threat: threat.clone(),
        temperature_bucket: bucket(temperature, TEMPERATURE_BUCKET_WIDTH),
        precipitation_bucket: bucket(precipitation, PRECIPITATION_BUCKET_WIDTH),
    }
}

/// `round(x / width) * width`, ties to even.
///
/// Non-finite input saturates (NaN lands in bucket 0).
pub fn bucket(x: f64, width: f64) -> i64 {
    let steps = (x / width).round_ties_even() as i64;
    steps.saturating_mul(width as i64)
}
