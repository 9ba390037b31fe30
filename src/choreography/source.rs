//! Choreography generators
//!
//! A generator turns a [`ChoreographyRequest`] into a raw response. The
//! response is untrusted text; parsing and normalization happen afterwards
//! no matter which generator produced it.

use super::request::ChoreographyRequest;
use crate::model::{TimelineStep, IDLE_POSE};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// External choreography generator
pub trait ChoreographySource {
    /// Produce a raw JSON response for the request
    fn generate(&self, request: &ChoreographyRequest) -> Result<String>;
}

/// Replays a previously generated response stored on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ChoreographySource for JsonFileSource {
    fn generate(&self, request: &ChoreographyRequest) -> Result<String> {
        log::debug!("Reading choreography for {} from {:?}", request.name, self.path);
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read timeline file: {:?}", self.path))
    }
}

/// Offline generator: one move every few beats, cycling through poses
///
/// The first move lands on the first beat boundary after t=0, so the
/// normalizer supplies the opening IDLE step.
#[derive(Debug, Clone)]
pub struct BeatGridSource {
    beats_per_move: u32,
    poses: Vec<String>,
}

impl BeatGridSource {
    /// Cycle through every non-IDLE pose the request offers
    pub fn new(beats_per_move: u32) -> Self {
        Self {
            beats_per_move: beats_per_move.max(1),
            poses: Vec::new(),
        }
    }

    /// Cycle through this fixed sequence instead
    pub fn with_poses(mut self, poses: Vec<String>) -> Self {
        self.poses = poses;
        self
    }

    fn sequence<'a>(&'a self, request: &'a ChoreographyRequest) -> Vec<&'a str> {
        let source = if self.poses.is_empty() {
            &request.poses
        } else {
            &self.poses
        };
        source
            .iter()
            .map(String::as_str)
            .filter(|p| *p != IDLE_POSE)
            .collect()
    }
}

impl ChoreographySource for BeatGridSource {
    fn generate(&self, request: &ChoreographyRequest) -> Result<String> {
        let sequence = self.sequence(request);
        let interval = request.beat_length * self.beats_per_move as f64;

        let mut steps = Vec::new();
        if !sequence.is_empty()
            && interval.is_finite()
            && interval > 0.0
            && request.duration.is_finite()
        {
            let mut k = 1usize;
            loop {
                let timestamp = interval * k as f64;
                if timestamp >= request.duration {
                    break;
                }
                steps.push(TimelineStep::new(timestamp, sequence[(k - 1) % sequence.len()]));
                k += 1;
            }
        }

        log::debug!(
            "Beat grid for {}: {} moves every {:.3}s",
            request.name,
            steps.len(),
            interval
        );
        serde_json::to_string(&steps).context("Failed to serialize beat grid")
    }
}
