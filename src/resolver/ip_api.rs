//! ip-api geo resolver backend (`ip-api.com`)
//!
//! No API key; the query (an IP or a hostname the service resolves itself)
//! goes in the path and the response is flat. Failed lookups come back with
//! HTTP 200 and a `fail` status in the body.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::TrackerError;
use crate::models::{Coordinates, LocationRecord};
use crate::resolver::GeoResolver;

const BASE_URL: &str = "http://ip-api.com/json";

/// Geo resolver backed by the ip-api geolocation API
pub struct IpApiResolver {
    client: Client,
}

impl IpApiResolver {
    /// Create a new ip-api resolver
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &str) -> Result<LocationRecord> {
        let url = format!("{}/{}", BASE_URL, urlencoding::encode(query));

        debug!("ip-api request for '{}'", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "ip-api request failed")?;

        let status = response.status();
        if !status.is_success() {
            error!("ip-api returned HTTP {} for '{}'", status, query);
            return Err(TrackerError::lookup(format!(
                "Geolocation request failed with status: {status}"
            ))
            .into());
        }

        let geo: wire::GeoResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse ip-api geolocation response")?;

        let record = LocationRecord::try_from(geo).inspect_err(|_| {
            warn!("ip-api could not locate '{}'", query);
        })?;

        info!(
            "Resolved '{}' to {} ({})",
            query,
            record.city,
            record.coordinates.map(|c| c.format()).unwrap_or_default()
        );

        Ok(record)
    }
}

#[async_trait]
impl GeoResolver for IpApiResolver {
    async fn resolve_ip(&self, ip: &str) -> Result<LocationRecord> {
        self.lookup(ip).await
    }

    async fn resolve_domain(&self, domain: &str) -> Result<LocationRecord> {
        self.lookup(domain).await
    }
}

/// ip-api API response structures
mod wire {
    use serde::Deserialize;

    use super::{Coordinates, LocationRecord, TrackerError};

    #[derive(Debug, Deserialize)]
    pub struct GeoResponse {
        pub status: Option<String>,
        pub query: Option<String>,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
        #[serde(default)]
        pub isp: String,
        #[serde(default)]
        pub city: String,
        #[serde(default)]
        pub timezone: String,
    }

    impl TryFrom<GeoResponse> for LocationRecord {
        type Error = anyhow::Error;

        fn try_from(geo: GeoResponse) -> Result<Self, Self::Error> {
            if geo.status.as_deref() == Some("fail") {
                return Err(TrackerError::lookup("ip-api lookup failed").into());
            }

            let (Some(lat), Some(lon)) = (geo.lat, geo.lon) else {
                return Err(
                    TrackerError::lookup("ip-api response missing coordinates").into(),
                );
            };

            Ok(LocationRecord {
                ip: geo.query.unwrap_or_default(),
                coordinates: Some(Coordinates::new(lat, lon)),
                city: geo.city,
                isp: geo.isp,
                timezone: geo.timezone,
            })
        }
    }
}
