//! Data model shared by analysis, choreography and playback
//!
//! These types are independent of both the audio container format and
//! whatever collaborator renders the figure.

mod features;
mod pose;
mod timeline;

pub use features::AudioFeatures;
pub use pose::{smoothstep, JointRotation, Pose, PoseLibrary};
pub use timeline::{PoseId, Timeline, TimelineStep, IDLE_POSE};
