//! Feature summary handed to a choreography generator

use crate::model::{AudioFeatures, PoseLibrary};
use serde::{Deserialize, Serialize};

/// Everything a generator gets to see about a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreographyRequest {
    pub name: String,
    pub bpm: f64,
    /// Seconds
    pub duration: f64,
    /// Mean of the energy envelope, out of 255
    pub energy_level: f32,
    /// Seconds per beat
    pub beat_length: f64,
    /// Pose identifiers the generator may use
    pub poses: Vec<String>,
}

impl ChoreographyRequest {
    pub fn new(features: &AudioFeatures, library: &PoseLibrary) -> Self {
        Self {
            name: features.name.clone(),
            bpm: features.bpm,
            duration: features.duration,
            energy_level: features.mean_energy(),
            beat_length: features.beat_length(),
            poses: library
                .names()
                .into_iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}
