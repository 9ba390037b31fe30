//! Playback configuration

/// Blend progress runs this many times faster than the segment
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 5.0;

/// Blend factor past which labels show the upcoming move
pub const DEFAULT_LABEL_SWITCH: f64 = 0.5;

/// Configuration for the tick loop
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Transition speed-up; a multiplier of 5 finishes each blend within
    /// the first fifth of its segment
    pub speed_multiplier: f64,

    /// Blend factor above which the on-screen labels advance
    pub label_switch_threshold: f64,

    /// Ticks per second when sampling the playback clock
    pub frame_rate: f64,
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self {
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            label_switch_threshold: DEFAULT_LABEL_SWITCH,
            frame_rate: 60.0,
        }
    }

    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Seconds between ticks
    pub fn frame_interval(&self) -> f64 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / 60.0
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}
