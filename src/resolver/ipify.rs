//! ipify geo resolver backend (`geo.ipify.org`)
//!
//! Keyed by API credential; the response nests the location fields under a
//! `location` object, with `ip` and `isp` at the top level.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::TrackerError;
use crate::models::{Coordinates, LocationRecord};
use crate::resolver::GeoResolver;

const BASE_URL: &str = "https://geo.ipify.org/api/v2/country,city";

/// Geo resolver backed by the ipify geolocation API
pub struct IpifyResolver {
    client: Client,
    api_key: String,
}

impl IpifyResolver {
    /// Create a new ipify resolver
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    async fn lookup(&self, param: &str, value: &str) -> Result<LocationRecord> {
        let url = format!(
            "{}?apiKey={}&{}={}",
            BASE_URL,
            self.api_key,
            param,
            urlencoding::encode(value)
        );

        debug!("ipify request: {}={}", param, value);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "ipify request failed")?;

        let status = response.status();
        if !status.is_success() {
            error!("ipify returned HTTP {} for {}={}", status, param, value);
            return Err(TrackerError::lookup(format!(
                "Geolocation request failed with status: {status}"
            ))
            .into());
        }

        let geo: wire::GeoResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse ipify geolocation response")?;

        let record = LocationRecord::from(geo);
        info!(
            "Resolved {}={} to {} ({})",
            param,
            value,
            record.city,
            record.coordinates.map(|c| c.format()).unwrap_or_default()
        );

        Ok(record)
    }
}

#[async_trait]
impl GeoResolver for IpifyResolver {
    async fn resolve_ip(&self, ip: &str) -> Result<LocationRecord> {
        self.lookup("ipAddress", ip).await
    }

    async fn resolve_domain(&self, domain: &str) -> Result<LocationRecord> {
        self.lookup("domain", domain).await
    }
}

/// ipify API response structures
mod wire {
    use serde::Deserialize;

    use super::{Coordinates, LocationRecord};

    #[derive(Debug, Deserialize)]
    pub struct GeoResponse {
        pub ip: String,
        #[serde(default)]
        pub isp: String,
        pub location: GeoLocation,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeoLocation {
        pub lat: f64,
        pub lng: f64,
        #[serde(default)]
        pub city: String,
        #[serde(default)]
        pub timezone: String,
    }

    impl From<GeoResponse> for LocationRecord {
        fn from(geo: GeoResponse) -> Self {
            LocationRecord {
                ip: geo.ip,
                coordinates: Some(Coordinates::new(geo.location.lat, geo.location.lng)),
                city: geo.location.city,
                isp: geo.isp,
                timezone: format!("UTC {}", geo.location.timezone),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_response_populates_record_wholesale() {
        let json = r#"{
            "ip": "1.2.3.4",
            "isp": "Y",
            "location": { "lat": 10.0, "lng": 20.0, "city": "X", "timezone": "-08:00" }
        }"#;

        let geo: wire::GeoResponse = serde_json::from_str(json).unwrap();
        let record = LocationRecord::from(geo);

        assert_eq!(record.ip, "1.2.3.4");
        assert_eq!(record.city, "X");
        assert_eq!(record.isp, "Y");
        assert_eq!(record.timezone, "UTC -08:00");
        assert_eq!(record.coordinates, Some(Coordinates::new(10.0, 20.0)));
    }

    #[test]
    fn test_wire_response_missing_location_is_an_error() {
        let json = r#"{ "ip": "1.2.3.4", "isp": "Y" }"#;
        let result: Result<wire::GeoResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_response_tolerates_missing_optional_fields() {
        let json = r#"{ "ip": "1.2.3.4", "location": { "lat": 1.0, "lng": 2.0 } }"#;
        let geo: wire::GeoResponse = serde_json::from_str(json).unwrap();
        let record = LocationRecord::from(geo);

        assert!(record.is_resolved());
        assert!(record.isp.is_empty());
        assert!(record.city.is_empty());
    }
}
