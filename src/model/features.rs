use serde::{Deserialize, Serialize};

/// Feature summary for one track
///
/// This is the sole contract handed to the choreography generator, and the
/// read-only data the UI shows (tempo, name, energy bars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Estimated tempo in beats per minute
    pub bpm: f64,

    /// RMS loudness per bucket, scaled to 0-255
    pub energy: Vec<f32>,

    /// Track duration in seconds
    pub duration: f64,

    /// Display name (tag title or file name)
    pub name: String,
}

impl AudioFeatures {
    /// Mean of the energy envelope (0-255), or 0 for an empty envelope
    pub fn mean_energy(&self) -> f32 {
        if self.energy.is_empty() {
            return 0.0;
        }
        self.energy.iter().sum::<f32>() / self.energy.len() as f32
    }

    /// Length of one beat in seconds
    pub fn beat_length(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Playback progress in [0, 1]
    pub fn progress(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (time / self.duration).clamp(0.0, 1.0)
    }

    /// Number of energy bars already played at `time`
    ///
    /// Bar `k` counts as played once `k / len <= progress`, so bar 0 is lit
    /// from the start.
    pub fn active_energy_bars(&self, time: f64) -> usize {
        let len = self.energy.len();
        let progress = self.progress(time);
        (0..len)
            .take_while(|&k| k as f64 / len as f64 <= progress)
            .count()
    }
}
