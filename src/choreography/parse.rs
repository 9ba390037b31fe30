//! Parsing of untrusted generator responses

use crate::error::TimelineError;
use crate::model::TimelineStep;

/// Parse a JSON array of `{timestamp, poseName|poseId}` objects
///
/// Steps keep their input order; nothing is validated beyond the shape.
pub fn parse_steps(raw: &str) -> Result<Vec<TimelineStep>, TimelineError> {
    serde_json::from_str(raw.trim()).map_err(|e| TimelineError::Malformed(e.to_string()))
}
