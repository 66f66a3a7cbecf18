//! MapServer layer query client.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::QueryResponse;
use crate::config::MapServiceConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::models::{AttributeSet, PlanningLayer, PointGeometry};

/// Client for point-intersection queries against one MapServer
#[derive(Clone)]
pub struct MapServiceClient {
    client: Client,
    base_url: String,
}

impl MapServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid map service URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create map service HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &MapServiceConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Build the `/query` URL for one layer
    pub fn query_url(&self, layer: PlanningLayer, geometry: &PointGeometry) -> ProxyResult<Url> {
        let endpoint = format!("{}/{}/query", self.base_url, layer.id());
        let geometry = geometry.to_query_param();

        Url::parse_with_params(
            &endpoint,
            &[
                ("geometry", geometry.as_str()),
                ("geometryType", "esriGeometryPoint"),
                ("inSR", "4326"),
                ("spatialRel", "esriSpatialRelIntersects"),
                ("outFields", "*"),
                ("returnGeometry", "false"),
                ("f", "json"),
            ],
        )
        .map_err(|e| ProxyError::upstream(format!("Invalid layer URL {}: {}", endpoint, e)))
    }

    /// Attributes of the first feature in `layer` intersecting `geometry`.
    ///
    /// `Ok(None)` when nothing intersects.
    pub async fn query_layer(
        &self,
        layer: PlanningLayer,
        geometry: &PointGeometry,
    ) -> ProxyResult<Option<AttributeSet>> {
        let url = self.query_url(layer, geometry)?;
        debug!("Querying {} layer: {}", layer, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            ProxyError::upstream(format!("{} layer request failed: {}", layer, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::upstream(format!(
                "{} layer failed: status={}",
                layer, status
            )));
        }

        let body: QueryResponse = response.json().await.map_err(|e| {
            ProxyError::upstream(format!("{} layer returned invalid JSON: {}", layer, e))
        })?;

        let attributes = body
            .into_first_attributes()
            .map_err(|e| ProxyError::upstream(format!("{} layer: {}", layer, e)))?;

        debug!(
            "{} layer: {}",
            layer,
            if attributes.is_some() { "hit" } else { "no feature" }
        );
        Ok(attributes)
    }
}
