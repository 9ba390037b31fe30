//! Fixed-tempo analyzer
//!
//! Skips onset detection and reports a tempo the caller already knows
//! (from tags or the command line). The envelope is still computed.

use super::decode::DecodedAudio;
use super::energy::{energy_envelope, ENVELOPE_BUCKETS};
use super::traits::AudioAnalyzer;
use crate::model::AudioFeatures;

/// Analyzer that trusts a known tempo
#[derive(Debug, Clone)]
pub struct FixedTempoAnalyzer {
    bpm: f64,
}

impl FixedTempoAnalyzer {
    pub fn new(bpm: f64) -> Self {
        Self { bpm }
    }
}

impl AudioAnalyzer for FixedTempoAnalyzer {
    fn analyze(&self, audio: &DecodedAudio, name: &str) -> AudioFeatures {
        log::debug!("Fixed tempo {} BPM for {}", self.bpm, name);

        AudioFeatures {
            bpm: self.bpm,
            energy: energy_envelope(audio.samples(), ENVELOPE_BUCKETS),
            duration: audio.duration(),
            name: name.to_string(),
        }
    }
}
