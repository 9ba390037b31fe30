//! Error taxonomy
//!
//! Only conditions that callers must handle get a variant here. A weak
//! signal (too few onsets), zero-length timeline segments and unknown pose
//! identifiers are all absorbed where they occur and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before feature extraction can start
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The audio container could not be decoded; the extractor is never entered
    #[error("Failed to process audio {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Decoded audio reported a sample rate of zero
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

/// Recoverable problems with a generated timeline
///
/// These never block playback: the loader substitutes the single IDLE step
/// and hands one of these back as a notice for the UI.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// The generator response was not a JSON array of steps
    #[error("Malformed timeline: {0}")]
    Malformed(String),

    /// The generator returned zero steps
    #[error("Timeline is empty")]
    Empty,

    /// The generator itself failed to produce a response
    #[error("Choreography source failed: {0}")]
    Source(String),
}
