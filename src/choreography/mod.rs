//! Choreography acquisition
//!
//! Asks a generator for a timeline, parses its response and normalizes the
//! result. Every failure on this path degrades to the single IDLE step so
//! playback is never blocked by a bad timeline.

mod normalize;
mod parse;
mod request;
mod source;

pub use normalize::normalize;
pub use parse::parse_steps;
pub use request::ChoreographyRequest;
pub use source::{BeatGridSource, ChoreographySource, JsonFileSource};

use crate::error::TimelineError;
use crate::model::Timeline;

/// A playable timeline plus an optional notice for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTimeline {
    pub timeline: Timeline,
    /// Set when the fallback timeline was substituted
    pub notice: Option<TimelineError>,
}

impl LoadedTimeline {
    fn fallback(notice: TimelineError) -> Self {
        log::warn!("{}; falling back to IDLE", notice);
        Self {
            timeline: Timeline::fallback(),
            notice: Some(notice),
        }
    }
}

/// Parse and normalize a raw generator response
pub fn timeline_from_response(raw: &str) -> LoadedTimeline {
    let steps = match parse_steps(raw) {
        Ok(steps) => steps,
        Err(e) => return LoadedTimeline::fallback(e),
    };

    if steps.is_empty() {
        return LoadedTimeline::fallback(TimelineError::Empty);
    }

    let timeline = normalize(steps);
    log::info!("Timeline ready: {} steps", timeline.len());
    LoadedTimeline {
        timeline,
        notice: None,
    }
}

/// Run a generator and turn whatever it returns into a playable timeline
pub fn load_timeline<S: ChoreographySource + ?Sized>(
    source: &S,
    request: &ChoreographyRequest,
) -> LoadedTimeline {
    match source.generate(request) {
        Ok(raw) => timeline_from_response(&raw),
        Err(e) => LoadedTimeline::fallback(TimelineError::Source(format!("{:#}", e))),
    }
}
