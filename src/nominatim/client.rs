use anyhow::{Context, Result};
use axum::body::Bytes;
use reqwest::Client;
use serde::de::IgnoredAny;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::GeocoderConfig;
use crate::error::{ProxyError, ProxyResult};

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    url: Url,
}

impl GeocodeClient {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid geocoder URL: {}", url))?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create geocoder HTTP client")?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Self::new(&config.url, &config.user_agent, config.timeout())
    }

    /// Search for `address`, returning the upstream JSON body untouched.
    ///
    /// Only the best match is requested. The body is checked to be JSON but
    /// never re-encoded.
    pub async fn search(&self, address: &str) -> ProxyResult<Bytes> {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        debug!("Geocoding via {}", url);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| ProxyError::upstream(format!("Geocoder returned invalid JSON: {}", e)))?;

        Ok(body)
    }
}
