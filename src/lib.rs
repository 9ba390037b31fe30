//! GenDance - audio-driven dance choreography playback
//!
//! Extracts tempo and an energy envelope from an audio track, turns a
//! generated (and possibly malformed) pose timeline into a playable one, and
//! resolves that timeline into blended poses, move labels and a beat pulse
//! for every rendered frame.

pub mod analysis;
pub mod choreography;
pub mod error;
pub mod model;
pub mod playback;
pub mod validation;

pub use choreography::{load_timeline, ChoreographyRequest, LoadedTimeline};
pub use error::{AnalysisError, TimelineError};
pub use playback::{PlaybackConfig, PlaybackSession};
