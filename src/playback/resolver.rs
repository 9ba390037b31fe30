//! Playback position resolution
//!
//! Maps a playback time onto the timeline: which step is active and how far
//! the blend toward the following step has progressed. Resolution keeps no
//! history, so seeking backwards or jumping ahead needs no special handling.

use crate::model::Timeline;

/// Where playback is within the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCursor {
    /// Greatest step whose timestamp is <= the playback time (0 before the first step)
    pub active_index: usize,
    /// Progress of the blend toward the next step, in [0, 1]
    pub blend_factor: f64,
}

/// Resolve `time` against `timeline`
///
/// Raw segment progress is multiplied by `speed_multiplier` and clamped, so
/// transitions finish early in their segment and then hold. Zero-length
/// segments cut instantly (blend 1); the final step always holds (blend 0).
pub fn resolve(timeline: &Timeline, time: f64, speed_multiplier: f64) -> PlaybackCursor {
    let steps = timeline.steps();
    let active_index = steps
        .partition_point(|step| step.timestamp <= time)
        .saturating_sub(1);

    let active = &steps[active_index];
    let Some(next) = steps.get(active_index + 1) else {
        return PlaybackCursor {
            active_index,
            blend_factor: 0.0,
        };
    };

    // Before the first step, or a NaN time
    if !(time >= active.timestamp) {
        return PlaybackCursor {
            active_index,
            blend_factor: 0.0,
        };
    }

    // Unreachable for normalized timelines: ties resolve to the later index,
    // so the next step is always strictly later
    let duration = next.timestamp - active.timestamp;
    let blend_factor = if duration <= 0.0 {
        1.0
    } else {
        let elapsed = time - active.timestamp;
        ((elapsed / duration) * speed_multiplier).clamp(0.0, 1.0)
    };

    PlaybackCursor {
        active_index,
        blend_factor,
    }
}
