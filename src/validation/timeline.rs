//! Timeline diagnostics

use crate::model::{PoseId, PoseLibrary, Timeline};

/// What a timeline contains that playback will quietly work around
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineReport {
    /// Number of steps
    pub steps: usize,
    /// Steps whose pose the library does not know (rendered as IDLE)
    pub unknown_poses: Vec<(usize, PoseId)>,
    /// Steps sharing a timestamp with their predecessor
    pub duplicate_timestamps: usize,
    /// Steps starting at or after the end of the track
    pub beyond_duration: usize,
}

impl TimelineReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_poses.is_empty() && self.duplicate_timestamps == 0 && self.beyond_duration == 0
    }
}

/// Inspect `timeline` against a pose library and track duration
pub fn validate_timeline(timeline: &Timeline, poses: &PoseLibrary, duration: f64) -> TimelineReport {
    let steps = timeline.steps();

    let unknown_poses: Vec<(usize, PoseId)> = steps
        .iter()
        .enumerate()
        .filter(|(_, step)| !poses.contains(&step.pose))
        .map(|(i, step)| (i, step.pose.clone()))
        .collect();

    let duplicate_timestamps = steps
        .windows(2)
        .filter(|w| w[0].timestamp == w[1].timestamp)
        .count();

    let beyond_duration = if duration > 0.0 {
        steps.iter().filter(|s| s.timestamp >= duration).count()
    } else {
        0
    };

    let report = TimelineReport {
        steps: steps.len(),
        unknown_poses,
        duplicate_timestamps,
        beyond_duration,
    };

    for (index, pose) in &report.unknown_poses {
        log::warn!("Step {}: unknown pose {:?}, will render as IDLE", index, pose.as_str());
    }
    if report.duplicate_timestamps > 0 {
        log::warn!(
            "{} step(s) share a timestamp with the previous step",
            report.duplicate_timestamps
        );
    }
    if report.beyond_duration > 0 {
        log::warn!(
            "{} step(s) start after the track ends ({:.1}s)",
            report.beyond_duration,
            duration
        );
    }
    if report.is_clean() {
        log::info!("✅ Timeline valid: {} steps", report.steps);
    }

    report
}
