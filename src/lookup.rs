//! Lookup dispatch
//!
//! Ties the input classifier to the configured geo resolver. Every caught
//! failure degrades to the empty record; only public-IP detection errors
//! propagate, since that call had no defined failure handling to preserve.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tracing::warn;

use crate::classifier::{self, LookupTarget};
use crate::models::LocationRecord;
use crate::myip;
use crate::resolver::GeoResolver;

/// Lookup service owning the geo resolver and the IP-echo client
pub struct LookupService {
    resolver: Arc<dyn GeoResolver>,
    client: Client,
    myip_url: String,
}

impl LookupService {
    /// Create a new lookup service
    #[must_use]
    pub fn new(resolver: Arc<dyn GeoResolver>, client: Client, myip_url: String) -> Self {
        Self {
            resolver,
            client,
            myip_url,
        }
    }

    /// Handle a user-submitted query.
    ///
    /// Classifies the input, dispatches to the matching resolver operation,
    /// and absorbs every failure into the empty record. Invalid input makes
    /// no network call at all.
    pub async fn lookup(&self, query: &str) -> LocationRecord {
        let target = match classifier::parse(query) {
            Ok(target) => target,
            Err(e) => {
                warn!("Rejected lookup input '{}': {}", query, e);
                return LocationRecord::empty();
            }
        };

        let result = match &target {
            LookupTarget::Ipv4(ip) => self.resolver.resolve_ip(ip).await,
            LookupTarget::Domain(domain) => self.resolver.resolve_domain(domain).await,
        };

        match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Lookup for '{}' failed: {:#}", target.query(), e);
                LocationRecord::empty()
            }
        }
    }

    /// Detect the visitor's public IP and resolve it.
    ///
    /// Runs once per frontend load to seed the initial map location. An
    /// IP-echo failure propagates; a geo failure degrades to the empty
    /// record like any other lookup.
    pub async fn lookup_self(&self) -> Result<LocationRecord> {
        let ip = myip::detect(&self.client, &self.myip_url).await?;

        match self.resolver.resolve_ip(&ip).await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!("Initial lookup for detected IP {} failed: {:#}", ip, e);
                Ok(LocationRecord::empty())
            }
        }
    }
}
