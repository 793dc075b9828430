//! `iptracker` - IP address tracker web service
//!
//! This library resolves an IP address or domain name to geolocation data
//! via an external geo resolver and drives an interactive map view with the
//! result.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod lookup;
pub mod map_view;
pub mod models;
pub mod myip;
pub mod resolver;
pub mod web;

// Re-export core types for public API
pub use classifier::LookupTarget;
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use lookup::LookupService;
pub use map_view::{MapSettings, MapViewModel};
pub use models::{Coordinates, LocationRecord};
pub use resolver::{GeoResolver, IpApiResolver, IpifyResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
