//! Configuration management for the `iptracker` service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TrackerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `iptracker` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerConfig {
    /// Geo resolver configuration
    #[serde(default)]
    pub geo: GeoConfig,
    /// Map view configuration
    #[serde(default)]
    pub map: MapConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geo resolver configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Which geo resolver backend to use ("ipify" or "ip-api")
    #[serde(default = "default_geo_provider")]
    pub provider: String,
    /// API key for the ipify backend (ip-api needs none)
    pub api_key: Option<String>,
    /// IP-echo service URL used to detect the visitor's public IP
    #[serde(default = "default_myip_url")]
    pub myip_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geo_timeout")]
    pub timeout_seconds: u32,
}

/// Map view configuration settings.
///
/// The tile source and marker icon were implicit globals in earlier versions
/// of this application; here they are explicit configuration handed to the
/// frontend as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Tile URL template with {s}/{x}/{y}/{z} placeholders
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    /// Tile server subdomains substituted for {s}
    #[serde(default = "default_subdomains")]
    pub subdomains: Vec<String>,
    /// Maximum zoom level the tile source supports
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    /// Zoom level used when centering on a result
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Marker icon asset path
    #[serde(default = "default_marker_icon")]
    pub marker_icon: String,
    /// Fallback center latitude, used when no lookup has succeeded
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    /// Fallback center longitude
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory the single-page frontend is served from
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_geo_provider() -> String {
    "ipify".to_string()
}

fn default_myip_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_geo_timeout() -> u32 {
    30
}

fn default_tile_url() -> String {
    "https://{s}.google.com/vt/lyrs=m&x={x}&y={y}&z={z}".to_string()
}

fn default_subdomains() -> Vec<String> {
    vec![
        "mt0".to_string(),
        "mt1".to_string(),
        "mt2".to_string(),
        "mt3".to_string(),
    ]
}

fn default_max_zoom() -> u8 {
    20
}

fn default_zoom() -> u8 {
    13
}

fn default_marker_icon() -> String {
    "/images/icon-location.svg".to_string()
}

fn default_fallback_latitude() -> f64 {
    -33.8688
}

fn default_fallback_longitude() -> f64 {
    151.2093
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provider: default_geo_provider(),
            api_key: None,
            myip_url: default_myip_url(),
            timeout_seconds: default_geo_timeout(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            subdomains: default_subdomains(),
            max_zoom: default_max_zoom(),
            zoom: default_zoom(),
            marker_icon: default_marker_icon(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with IPTRACKER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("IPTRACKER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TrackerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("iptracker").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_provider()?;
        self.validate_map()?;
        self.validate_logging()?;
        Ok(())
    }

    /// Validate the geo resolver selection and credentials
    fn validate_provider(&self) -> Result<()> {
        let valid_providers = ["ipify", "ip-api"];
        if !valid_providers.contains(&self.geo.provider.as_str()) {
            return Err(TrackerError::config(format!(
                "Invalid geo provider '{}'. Must be one of: {}",
                self.geo.provider,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.geo.provider == "ipify" {
            match &self.geo.api_key {
                None => {
                    return Err(TrackerError::config(
                        "The ipify geo provider requires an API key. Set geo.api_key or IPTRACKER_GEO__API_KEY."
                    ).into());
                }
                Some(api_key) if api_key.is_empty() => {
                    return Err(TrackerError::config(
                        "Geo API key cannot be empty. Please check your API key.",
                    )
                    .into());
                }
                Some(_) => {}
            }
        }

        if !self.geo.myip_url.starts_with("http://") && !self.geo.myip_url.starts_with("https://") {
            return Err(
                TrackerError::config("IP-echo URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.geo.timeout_seconds == 0 || self.geo.timeout_seconds > 300 {
            return Err(
                TrackerError::config("Geo request timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        Ok(())
    }

    /// Validate map view settings
    fn validate_map(&self) -> Result<()> {
        if !self.map.tile_url.starts_with("http://") && !self.map.tile_url.starts_with("https://") {
            return Err(
                TrackerError::config("Tile URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.map.zoom > self.map.max_zoom {
            return Err(TrackerError::config(format!(
                "Map zoom {} cannot exceed the tile source's max zoom {}",
                self.map.zoom, self.map.max_zoom
            ))
            .into());
        }

        if !(-90.0..=90.0).contains(&self.map.fallback_latitude) {
            return Err(
                TrackerError::config("Fallback latitude must be between -90 and 90").into(),
            );
        }

        if !(-180.0..=180.0).contains(&self.map.fallback_longitude) {
            return Err(
                TrackerError::config("Fallback longitude must be between -180 and 180").into(),
            );
        }

        Ok(())
    }

    /// Validate logging settings
    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TrackerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
