//! Per-tick frame assembly

use super::config::PlaybackConfig;
use super::labels::{display_labels, skeleton_target};
use super::pulse::beat_pulse;
use super::resolver::{resolve, PlaybackCursor};
use crate::model::{AudioFeatures, Pose, PoseId, PoseLibrary, Timeline};

/// Everything a renderer and HUD need for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Playback time this frame was resolved for
    pub time: f64,
    pub cursor: PlaybackCursor,

    /// Pose pair the skeleton blends between
    pub skeleton_from: PoseId,
    pub skeleton_to: PoseId,
    /// Joint targets after easing and unknown-id fallback
    pub pose: Pose,

    /// Move names for display; may run ahead of the skeleton
    pub current_move: PoseId,
    pub next_move: PoseId,

    /// Beat pulse in [0, 1]
    pub pulse: f64,
    /// Playback progress in [0, 1]
    pub progress: f64,
    /// Energy bars already played
    pub active_energy_bars: usize,
}

/// A track's features, its timeline and the poses to render them with
///
/// Holds no playback state; every frame is a pure function of the time.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    features: AudioFeatures,
    timeline: Timeline,
    poses: PoseLibrary,
    config: PlaybackConfig,
}

impl PlaybackSession {
    pub fn new(features: AudioFeatures, timeline: Timeline, poses: PoseLibrary) -> Self {
        Self {
            features,
            timeline,
            poses,
            config: PlaybackConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn features(&self) -> &AudioFeatures {
        &self.features
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Resolve the frame for playback time `time`
    pub fn frame(&self, time: f64) -> Frame {
        let cursor = resolve(&self.timeline, time, self.config.speed_multiplier);
        let skeleton = skeleton_target(&self.timeline, &cursor);
        let labels = display_labels(&self.timeline, &cursor, self.config.label_switch_threshold);

        Frame {
            time,
            cursor,
            skeleton_from: skeleton.from.clone(),
            skeleton_to: skeleton.to.clone(),
            pose: self.poses.blend(skeleton.from, skeleton.to, skeleton.blend),
            current_move: labels.current.clone(),
            next_move: labels.next.clone(),
            pulse: beat_pulse(self.features.bpm, time),
            progress: self.features.progress(time),
            active_energy_bars: self.features.active_energy_bars(time),
        }
    }
}
