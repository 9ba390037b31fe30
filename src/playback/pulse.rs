//! Beat pulse oscillator
//!
//! Jumps to 1 on every beat and decays cubically to 0 by the next one.

/// Pulse intensity in [0, 1] at `time` seconds for a tempo of `bpm`
///
/// Periodic with period `60 / bpm`. A non-positive or non-finite tempo
/// yields 0.
pub fn beat_pulse(bpm: f64, time: f64) -> f64 {
    if !(bpm.is_finite() && bpm > 0.0) {
        return 0.0;
    }

    let beats_per_second = bpm / 60.0;
    let phase = (time * beats_per_second).rem_euclid(1.0);
    if !phase.is_finite() {
        return 0.0;
    }
    (1.0 - phase).powi(3)
}
