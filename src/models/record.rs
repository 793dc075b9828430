//! Location record model for resolved lookups

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a `[lat, lon]` display string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// The set of display fields describing a resolved address.
///
/// Latitude and longitude live together in `coordinates`, so a record can
/// never carry one without the other. A record is populated wholesale from a
/// resolver response and reset wholesale on invalid input or lookup failure;
/// fields are never updated piecemeal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LocationRecord {
    /// Resolved IP address (dotted quad)
    pub ip: String,
    /// Resolved coordinates; `None` until a lookup has succeeded
    pub coordinates: Option<Coordinates>,
    /// City name
    pub city: String,
    /// Internet service provider
    pub isp: String,
    /// Display-formatted timezone, e.g. "UTC -08:00"
    pub timezone: String,
}

impl LocationRecord {
    /// The empty record used before any lookup and after any failure
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this record holds a successful lookup result
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}
