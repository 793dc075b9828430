//! Geo resolver backends
//!
//! A lookup translates an IP address or domain name into a location record
//! via an external geolocation service. Two interchangeable backends exist:
//! - ipify: `geo.ipify.org`, API-key-gated, nested response format
//! - ip-api: `ip-api.com`, no key, flat response format
//!
//! The backend is selected by configuration at startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::TrackerError;
use crate::config::GeoConfig;
use crate::models::LocationRecord;

pub mod ip_api;
pub mod ipify;

pub use ip_api::IpApiResolver;
pub use ipify::IpifyResolver;

/// Capability of translating an IP or domain into a location record.
///
/// Both operations populate the record wholesale on success. Failures carry
/// no partial data; the caller resets its display state instead.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve an IPv4 literal
    async fn resolve_ip(&self, ip: &str) -> Result<LocationRecord>;
    /// Resolve a domain name
    async fn resolve_domain(&self, domain: &str) -> Result<LocationRecord>;
}

/// Build the configured geo resolver backend
pub fn from_config(config: &GeoConfig) -> Result<Arc<dyn GeoResolver>> {
    let client = build_http_client(config.timeout_seconds)?;

    match config.provider.as_str() {
        "ipify" => {
            let api_key = config.geo_api_key()?;
            Ok(Arc::new(IpifyResolver::new(client, api_key)))
        }
        "ip-api" => Ok(Arc::new(IpApiResolver::new(client))),
        other => {
            Err(TrackerError::config(format!("Unknown geo provider '{other}'")).into())
        }
    }
}

/// Build the shared HTTP client used for all external calls
pub fn build_http_client(timeout_seconds: u32) -> Result<Client> {
    let timeout = Duration::from_secs(timeout_seconds.into());

    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("iptracker/", env!("CARGO_PKG_VERSION")))
        .build()
        .with_context(|| "Failed to create HTTP client")
}

impl GeoConfig {
    fn geo_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TrackerError::config("The ipify geo provider requires an API key").into()
            })
    }
}
