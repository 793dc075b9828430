//! Public IP detection via an external IP-echo service
//!
//! Used once per frontend load to seed the initial map location. There is no
//! retry here; a failure propagates to the caller as-is.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// IP-echo response, e.g. from `api.ipify.org?format=json`
#[derive(Debug, Deserialize)]
struct MyIpResponse {
    ip: String,
}

/// Detect the caller's public IP address
pub async fn detect(client: &Client, myip_url: &str) -> Result<String> {
    debug!("Detecting public IP via {}", myip_url);

    let response: MyIpResponse = client
        .get(myip_url)
        .send()
        .await
        .with_context(|| "IP-echo request failed")?
        .json()
        .await
        .with_context(|| "Failed to parse IP-echo response")?;

    debug!("Detected public IP {}", response.ip);
    Ok(response.ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_myip_response_parsing() {
        let json = r#"{ "ip": "98.207.254.136" }"#;
        let response: MyIpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.ip, "98.207.254.136");
    }
}
