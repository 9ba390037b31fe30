//! Fixed-rate sampling of an external playback clock
//!
//! The audio player owns playback time. Each tick asks the clock where
//! playback is, resolves a frame for that time and hands it on. There is no
//! internal scheduler: stopping playback just means the clock stops
//! answering.

use super::session::{Frame, PlaybackSession};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Source of playback time
pub trait PlaybackClock {
    /// Current playback position in seconds, or `None` once stopped
    fn now(&mut self) -> Option<f64>;
}

/// Clock that advances a fixed step per tick; for dry runs and tests
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    time: f64,
    step: f64,
    end: f64,
}

impl SimulatedClock {
    /// Tick from `start` in increments of `step` while the time is <= `end`
    pub fn new(start: f64, step: f64, end: f64) -> Self {
        Self {
            time: start,
            step,
            end,
        }
    }
}

impl PlaybackClock for SimulatedClock {
    fn now(&mut self) -> Option<f64> {
        if !(self.step > 0.0) || self.time > self.end {
            return None;
        }
        let now = self.time;
        self.time += self.step;
        Some(now)
    }
}

/// Real-time clock paced at a fixed frame interval
#[derive(Debug)]
pub struct WallClock {
    start: Instant,
    next_tick: Instant,
    interval: Duration,
    end: f64,
}

impl WallClock {
    pub fn new(frame_interval: f64, end: f64) -> Self {
        let start = Instant::now();
        Self {
            start,
            next_tick: start,
            interval: Duration::from_secs_f64(frame_interval.max(0.001)),
            end,
        }
    }
}

impl PlaybackClock for WallClock {
    fn now(&mut self) -> Option<f64> {
        let now = Instant::now();
        if now < self.next_tick {
            std::thread::sleep(self.next_tick - now);
        }
        self.next_tick += self.interval;

        let elapsed = self.start.elapsed().as_secs_f64();
        if elapsed > self.end {
            None
        } else {
            Some(elapsed)
        }
    }
}

/// Sample `clock` once per tick until it stops or `on_frame` breaks
///
/// Returns the number of frames delivered.
pub fn run_ticks<C, F>(session: &PlaybackSession, clock: &mut C, mut on_frame: F) -> usize
where
    C: PlaybackClock + ?Sized,
    F: FnMut(&Frame) -> ControlFlow<()>,
{
    let mut frames = 0;

    while let Some(time) = clock.now() {
        let frame = session.frame(time);
        frames += 1;
        log::trace!(
            "t={:.3} step={} blend={:.2} pulse={:.2}",
            frame.time,
            frame.cursor.active_index,
            frame.cursor.blend_factor,
            frame.pulse
        );
        if on_frame(&frame).is_break() {
            break;
        }
    }

    log::debug!("Tick loop ended after {} frames", frames);
    frames
}
