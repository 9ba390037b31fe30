//! Peak-picking analyzer
//!
//! Estimates tempo from amplitude onsets and builds the energy envelope.

use super::decode::DecodedAudio;
use super::energy::{energy_envelope, ENVELOPE_BUCKETS};
use super::onset::{detect_onsets, estimate_tempo, OnsetConfig};
use super::traits::AudioAnalyzer;
use crate::model::AudioFeatures;

/// Analyzer that detects tempo from the waveform
#[derive(Debug, Clone)]
pub struct PeakAnalyzer {
    onsets: OnsetConfig,
    buckets: usize,
}

impl PeakAnalyzer {
    pub fn new() -> Self {
        Self {
            onsets: OnsetConfig::default(),
            buckets: ENVELOPE_BUCKETS,
        }
    }

    /// Use custom onset tuning
    pub fn with_onset_config(mut self, config: OnsetConfig) -> Self {
        self.onsets = config;
        self
    }

    /// Change the envelope length
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn onset_config(&self) -> &OnsetConfig {
        &self.onsets
    }
}

impl Default for PeakAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioAnalyzer for PeakAnalyzer {
    fn analyze(&self, audio: &DecodedAudio, name: &str) -> AudioFeatures {
        let samples = audio.samples();
        let onsets = detect_onsets(samples, audio.sample_rate(), &self.onsets);
        let bpm = estimate_tempo(&onsets, &self.onsets);

        if onsets.len() < self.onsets.min_onsets {
            log::debug!(
                "Only {} onset(s) in {}, using default tempo {}",
                onsets.len(),
                name,
                bpm
            );
        } else {
            log::debug!("{} onsets in {} -> {} BPM", onsets.len(), name, bpm);
        }

        AudioFeatures {
            bpm,
            energy: energy_envelope(samples, self.buckets),
            duration: audio.duration(),
            name: name.to_string(),
        }
    }
}
