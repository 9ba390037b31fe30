//! Peak-based onset detection and tempo estimation
//!
//! Scans the buffer at a coarse stride for samples above an amplitude
//! threshold. Each hit is an onset; a refractory skip after every hit keeps
//! one physical beat from registering several times. Tempo is derived from
//! the mean inter-onset interval.

/// Tempo reported when too few onsets are found
pub const DEFAULT_BPM: f64 = 120.0;

/// Tuning for onset detection
///
/// The defaults are empirical; nothing depends on their exact values.
#[derive(Debug, Clone, PartialEq)]
pub struct OnsetConfig {
    /// Scan every Nth sample
    pub stride: usize,
    /// Absolute amplitude (on a [-1, 1] scale) a sample must exceed
    pub threshold: f32,
    /// Samples skipped after each onset
    pub refractory: usize,
    /// Fewer onsets than this fall back to `fallback_bpm`
    pub min_onsets: usize,
    pub fallback_bpm: f64,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            stride: 200,
            threshold: 0.8,
            refractory: 10_000,
            min_onsets: 3,
            fallback_bpm: DEFAULT_BPM,
        }
    }
}

impl OnsetConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_refractory(mut self, refractory: usize) -> Self {
        self.refractory = refractory;
        self
    }
}

/// Onset times in seconds, in ascending order
pub fn detect_onsets(samples: &[f32], sample_rate: u32, config: &OnsetConfig) -> Vec<f64> {
    let stride = config.stride.max(1);
    let mut onsets = Vec::new();
    let mut i = 0usize;

    while i < samples.len() {
        if samples[i].abs() > config.threshold {
            onsets.push(i as f64 / sample_rate as f64);
            i = i.saturating_add(config.refractory);
        }
        i = i.saturating_add(stride);
    }

    onsets
}

/// Tempo from onset times: 60 / mean interval, rounded
///
/// Returns `config.fallback_bpm` with fewer than `config.min_onsets` onsets,
/// or when the rounded tempo would not be positive.
pub fn estimate_tempo(onsets: &[f64], config: &OnsetConfig) -> f64 {
    if onsets.len() < config.min_onsets.max(2) {
        return config.fallback_bpm;
    }

    let intervals: Vec<f64> = onsets.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    if mean <= 0.0 {
        return config.fallback_bpm;
    }

    // Intervals over two minutes round down to 0 BPM
    let bpm = (60.0 / mean).round();
    if bpm > 0.0 {
        bpm
    } else {
        config.fallback_bpm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Silence with a full-scale click every `period` samples
    fn click_track(len: usize, period: usize) -> Vec<f32> {
        (0..len)
            .map(|i| if i % period == 0 { 1.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_onsets_at_clicks() {
        // 0.5s period at 44.1kHz, clicks land on the 200-sample stride grid
        let samples = click_track(44100 * 4, 22000);
        let onsets = detect_onsets(&samples, 44100, &OnsetConfig::default());
        assert_eq!(onsets.len(), 9);
        assert_eq!(onsets[0], 0.0);
        assert!((onsets[1] - 22000.0 / 44100.0).abs() < 1e-12);
    }

    #[test]
    fn test_refractory_suppresses_double_hits() {
        // A dense burst of loud samples counts once per refractory window
        let mut samples = vec![0.0f32; 50_000];
        for s in samples.iter_mut().take(5_000) {
            *s = 0.9;
        }
        let onsets = detect_onsets(&samples, 44100, &OnsetConfig::default());
        assert_eq!(onsets, vec![0.0]);
    }

    #[test]
    fn test_scan_resumes_after_refractory_and_stride() {
        // Hit at 0, scan resumes at 10_200; a loud sample at 10_000 is skipped
        let mut samples = vec![0.0f32; 20_000];
        samples[0] = 1.0;
        samples[10_000] = 1.0;
        samples[10_200] = 1.0;
        let onsets = detect_onsets(&samples, 10_000, &OnsetConfig::default());
        assert_eq!(onsets, vec![0.0, 1.02]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let samples = vec![0.8f32; 1000];
        assert!(detect_onsets(&samples, 44100, &OnsetConfig::default()).is_empty());
    }

    #[test]
    fn test_tempo_from_regular_onsets() {
        let onsets = [0.0, 0.5, 1.0, 1.5];
        assert_eq!(estimate_tempo(&onsets, &OnsetConfig::default()), 120.0);
    }

    #[test]
    fn test_tempo_is_rounded() {
        // Mean interval 0.47s -> 127.66 BPM
        let onsets = [0.0, 0.47, 0.94];
        assert_eq!(estimate_tempo(&onsets, &OnsetConfig::default()), 128.0);
    }

    #[test]
    fn test_too_few_onsets_fall_back() {
        let config = OnsetConfig::default();
        assert_eq!(estimate_tempo(&[], &config), 120.0);
        assert_eq!(estimate_tempo(&[0.3], &config), 120.0);
        assert_eq!(estimate_tempo(&[0.3, 0.6], &config), 120.0);
    }

    #[test]
    fn test_sparse_onsets_fall_back() {
        // Three clicks 200s apart at 1kHz
        let mut samples = vec![0.0f32; 400_001];
        samples[0] = 1.0;
        samples[200_000] = 1.0;
        samples[400_000] = 1.0;
        let config = OnsetConfig::default();

        let onsets = detect_onsets(&samples, 1000, &config);
        assert_eq!(onsets, vec![0.0, 200.0, 400.0]);
        assert_eq!(estimate_tempo(&onsets, &config), 120.0);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(detect_onsets(&[], 44100, &OnsetConfig::default()).is_empty());
    }
}
