//! Audio feature extraction
//!
//! Turns decoded samples into the feature summary (tempo, energy envelope,
//! duration, name). Decoding itself is handled by symphonia; the analyzers
//! behind the [`AudioAnalyzer`] trait are pure functions of the samples.

mod batch;
mod decode;
mod energy;
mod fixed;
mod metadata;
mod onset;
mod peak;
mod traits;

pub use batch::{analyze_file, analyze_files, collect_audio_files};
pub use decode::{decode_file, DecodedAudio};
pub use energy::{energy_envelope, ENVELOPE_BUCKETS};
pub use fixed::FixedTempoAnalyzer;
pub use metadata::track_name;
pub use onset::{detect_onsets, estimate_tempo, OnsetConfig, DEFAULT_BPM};
pub use peak::PeakAnalyzer;
pub use traits::AudioAnalyzer;
