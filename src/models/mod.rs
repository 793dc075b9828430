//! Data models for the iptracker service
//!
//! The core domain model is the location record: the set of display
//! fields describing a resolved IP address or domain.

pub mod record;

// Re-export all public types for convenient access
pub use record::{Coordinates, LocationRecord};
