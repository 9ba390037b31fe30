//! Timeline normalization
//!
//! Makes a raw step sequence safe to play: timestamps are clamped to be
//! non-negative, steps are stably ordered by time, and an IDLE step is
//! prepended when nothing starts at t=0. Pose ids are left untouched; the
//! renderer decides what an unknown id looks like.

use crate::model::{Timeline, TimelineStep};

/// Normalize raw generator output into a playable timeline
pub fn normalize(raw: Vec<TimelineStep>) -> Timeline {
    let mut steps: Vec<TimelineStep> = raw
        .into_iter()
        .map(|mut step| {
            // NaN.max(0.0) is 0.0
            step.timestamp = step.timestamp.max(0.0);
            step
        })
        .collect();

    // Stable: steps sharing a timestamp keep their input order
    steps.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    if steps.first().map_or(true, |first| first.timestamp > 0.0) {
        steps.insert(0, TimelineStep::idle_at_start());
    }

    Timeline::from_normalized(steps)
}
