//! Map view binding
//!
//! Computes the view model the map widget consumes: a center coordinate, a
//! zoom level, and a marker position. The tile source and marker icon come
//! from configuration instead of globals, so the widget needs nothing beyond
//! what the API hands it.

use serde::Serialize;

use crate::config::MapConfig;
use crate::models::{Coordinates, LocationRecord};

/// View model the map widget re-renders from
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapViewModel {
    /// Center coordinate
    pub center: Coordinates,
    /// Zoom level
    pub zoom: u8,
    /// Marker position, always the same as the center
    pub marker: Coordinates,
}

impl MapViewModel {
    /// Compute the view for a location record.
    ///
    /// An unresolved record falls back to the configured default center;
    /// the marker follows the center either way.
    #[must_use]
    pub fn for_record(record: &LocationRecord, config: &MapConfig) -> Self {
        let center = record
            .coordinates
            .unwrap_or_else(|| Coordinates::new(config.fallback_latitude, config.fallback_longitude));

        Self {
            center,
            zoom: config.zoom,
            marker: center,
        }
    }
}

/// Static map configuration handed to the frontend at load time
#[derive(Debug, Serialize, Clone)]
pub struct MapSettings {
    /// Tile URL template with {s}/{x}/{y}/{z} placeholders
    pub tile_url: String,
    /// Tile server subdomains
    pub subdomains: Vec<String>,
    /// Maximum zoom level of the tile source
    pub max_zoom: u8,
    /// Marker icon asset path
    pub marker_icon: String,
}

impl From<&MapConfig> for MapSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            tile_url: config.tile_url.clone(),
            subdomains: config.subdomains.clone(),
            max_zoom: config.max_zoom,
            marker_icon: config.marker_icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_record_recenters_the_map() {
        let config = MapConfig::default();
        let record = LocationRecord {
            ip: "1.2.3.4".to_string(),
            coordinates: Some(Coordinates::new(10.0, 20.0)),
            city: "X".to_string(),
            isp: "Y".to_string(),
            timezone: "UTC -08:00".to_string(),
        };

        let view = MapViewModel::for_record(&record, &config);
        assert_eq!(view.center, Coordinates::new(10.0, 20.0));
        assert_eq!(view.marker, view.center);
        assert_eq!(view.zoom, 13);
    }

    #[test]
    fn test_empty_record_falls_back_to_default_center() {
        let config = MapConfig::default();
        let view = MapViewModel::for_record(&LocationRecord::empty(), &config);

        assert_eq!(view.center, Coordinates::new(-33.8688, 151.2093));
        assert_eq!(view.marker, view.center);
    }

    #[test]
    fn test_map_settings_from_config() {
        let config = MapConfig::default();
        let settings = MapSettings::from(&config);

        assert!(settings.tile_url.contains("{x}"));
        assert_eq!(settings.subdomains.len(), 4);
        assert_eq!(settings.max_zoom, 20);
        assert!(settings.marker_icon.ends_with(".svg"));
    }
}
