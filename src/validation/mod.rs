//! Validation utilities
//!
//! Reports on a normalized timeline without changing it

mod timeline;

pub use timeline::{validate_timeline, TimelineReport};
