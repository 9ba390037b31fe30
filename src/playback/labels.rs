//! Skeleton and label read paths
//!
//! Both read the same cursor but deliberately disagree near the middle of a
//! transition. The skeleton always blends from the active step toward the
//! next one. The labels jump ahead once the blend passes the switch
//! threshold, so the displayed move name changes when the new pose visibly
//! dominates rather than when the transition begins.

use super::resolver::PlaybackCursor;
use crate::model::{PoseId, Timeline};

/// Pose pair the renderer interpolates between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonTarget<'a> {
    pub from: &'a PoseId,
    pub to: &'a PoseId,
    pub blend: f64,
}

/// Move names for on-screen display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLabels<'a> {
    pub current: &'a PoseId,
    pub next: &'a PoseId,
}

/// Raw active/next pair, independent of the blend factor
pub fn skeleton_target<'a>(timeline: &'a Timeline, cursor: &PlaybackCursor) -> SkeletonTarget<'a> {
    let (from, to) = raw_pair(timeline, cursor.active_index);
    SkeletonTarget {
        from,
        to,
        blend: cursor.blend_factor,
    }
}

/// Labels that advance once `cursor.blend_factor > switch_threshold`
pub fn display_labels<'a>(
    timeline: &'a Timeline,
    cursor: &PlaybackCursor,
    switch_threshold: f64,
) -> MoveLabels<'a> {
    let index = cursor.active_index;
    let (current, next) = raw_pair(timeline, index);

    if cursor.blend_factor > switch_threshold {
        MoveLabels {
            current: next,
            next: timeline.pose_at(index + 2).unwrap_or(next),
        }
    } else {
        MoveLabels { current, next }
    }
}

fn raw_pair(timeline: &Timeline, index: usize) -> (&PoseId, &PoseId) {
    let current = timeline
        .pose_at(index)
        .unwrap_or_else(|| &timeline.steps()[0].pose);
    let next = timeline.pose_at(index + 1).unwrap_or(current);
    (current, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::normalize;
    use crate::model::TimelineStep;
    use crate::playback::config::DEFAULT_LABEL_SWITCH;

    fn dance() -> Timeline {
        normalize(vec![
            TimelineStep::new(0.0, "IDLE"),
            TimelineStep::new(1.0, "DAB"),
            TimelineStep::new(2.0, "KICK_LEFT"),
            TimelineStep::new(3.0, "VOGUE"),
        ])
    }

    fn cursor(active_index: usize, blend_factor: f64) -> PlaybackCursor {
        PlaybackCursor {
            active_index,
            blend_factor,
        }
    }

    fn names(labels: MoveLabels<'_>) -> (&str, &str) {
        (labels.current.as_str(), labels.next.as_str())
    }

    #[test]
    fn test_labels_before_midpoint() {
        let timeline = dance();
        let labels = display_labels(&timeline, &cursor(1, 0.5), DEFAULT_LABEL_SWITCH);
        assert_eq!(names(labels), ("DAB", "KICK_LEFT"));
    }

    #[test]
    fn test_labels_after_midpoint_look_ahead() {
        let timeline = dance();
        let labels = display_labels(&timeline, &cursor(1, 0.51), DEFAULT_LABEL_SWITCH);
        assert_eq!(names(labels), ("KICK_LEFT", "VOGUE"));
    }

    #[test]
    fn test_labels_near_end_repeat_last_move() {
        let timeline = dance();
        let labels = display_labels(&timeline, &cursor(2, 1.0), DEFAULT_LABEL_SWITCH);
        assert_eq!(names(labels), ("VOGUE", "VOGUE"));

        let labels = display_labels(&timeline, &cursor(3, 0.0), DEFAULT_LABEL_SWITCH);
        assert_eq!(names(labels), ("VOGUE", "VOGUE"));
    }

    #[test]
    fn test_skeleton_ignores_midpoint_switch() {
        let timeline = dance();
        let late = cursor(1, 0.9);

        let skeleton = skeleton_target(&timeline, &late);
        assert_eq!(skeleton.from.as_str(), "DAB");
        assert_eq!(skeleton.to.as_str(), "KICK_LEFT");
        assert_eq!(skeleton.blend, 0.9);

        // Same cursor, different answer for the label
        let labels = display_labels(&timeline, &late, DEFAULT_LABEL_SWITCH);
        assert_eq!(labels.current.as_str(), "KICK_LEFT");
        assert_ne!(labels.current, skeleton.from);
    }

    #[test]
    fn test_single_step_timeline() {
        let timeline = Timeline::fallback();
        let skeleton = skeleton_target(&timeline, &cursor(0, 0.0));
        assert!(skeleton.from.is_idle() && skeleton.to.is_idle());

        let labels = display_labels(&timeline, &cursor(0, 0.0), DEFAULT_LABEL_SWITCH);
        assert!(labels.current.is_idle() && labels.next.is_idle());
    }
}
