//! Analyzer trait definition

use super::decode::DecodedAudio;
use crate::model::AudioFeatures;

/// Audio analyzer trait - allows swapping tempo strategies
///
/// Implementations are pure: identical samples produce identical features
/// and no state carries over between calls.
pub trait AudioAnalyzer {
    /// Extract the feature summary for one decoded track
    fn analyze(&self, audio: &DecodedAudio, name: &str) -> AudioFeatures;
}
