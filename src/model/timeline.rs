use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the pose every timeline and pose library falls back to
pub const IDLE_POSE: &str = "IDLE";

/// Opaque key into the pose library
///
/// The core only compares these; joint data lives in [`super::PoseLibrary`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseId(String);

impl PoseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn idle() -> Self {
        Self(IDLE_POSE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_idle(&self) -> bool {
        self.0 == IDLE_POSE
    }
}

impl fmt::Display for PoseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One entry of a choreography: switch to `pose` at `timestamp` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub timestamp: f64,

    /// Generators emit `poseName`; we write `poseId`
    #[serde(rename = "poseId", alias = "poseName")]
    pub pose: PoseId,
}

impl TimelineStep {
    pub fn new(timestamp: f64, pose: impl Into<String>) -> Self {
        Self {
            timestamp,
            pose: PoseId::new(pose),
        }
    }

    pub fn idle_at_start() -> Self {
        Self {
            timestamp: 0.0,
            pose: PoseId::idle(),
        }
    }
}

/// A normalized choreography
///
/// Always non-empty, non-decreasing in timestamp, first step at t=0.
/// Only the normalizer and [`Timeline::fallback`] construct one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    steps: Vec<TimelineStep>,
}

impl Timeline {
    /// The single-step IDLE timeline used whenever generation fails
    pub fn fallback() -> Self {
        Self {
            steps: vec![TimelineStep::idle_at_start()],
        }
    }

    /// Wrap steps that already satisfy the timeline invariants
    pub(crate) fn from_normalized(steps: Vec<TimelineStep>) -> Self {
        debug_assert!(!steps.is_empty());
        debug_assert_eq!(steps[0].timestamp, 0.0);
        debug_assert!(steps.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        Self { steps }
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&TimelineStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a normalized timeline
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn pose_at(&self, index: usize) -> Option<&PoseId> {
        self.steps.get(index).map(|s| &s.pose)
    }
}
