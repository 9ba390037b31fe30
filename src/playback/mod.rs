//! Playback engine
//!
//! Every tick maps the current playback time to a cursor on the timeline,
//! then reads that cursor twice: once for the skeleton, once for the
//! on-screen move labels. The beat pulse is computed alongside from the
//! tempo. All of it is stateless, so arbitrary seeks resolve correctly.

pub mod clock;
pub mod config;
mod labels;
mod pulse;
mod resolver;
mod session;

pub use clock::{run_ticks, PlaybackClock, SimulatedClock, WallClock};
pub use config::{PlaybackConfig, DEFAULT_LABEL_SWITCH, DEFAULT_SPEED_MULTIPLIER};
pub use labels::{display_labels, skeleton_target, MoveLabels, SkeletonTarget};
pub use pulse::beat_pulse;
pub use resolver::{resolve, PlaybackCursor};
pub use session::{Frame, PlaybackSession};
