//! Sequential zoning / FSR / height lookups for a single point.

use tracing::{error, info, warn};

use crate::arcgis::MapServiceClient;
use crate::error::ProxyResult;
use crate::models::{AggregateResult, Coords, PlanningLayer, PlanningSummary, PointGeometry};

/// Runs the three planning layer lookups for a point
#[derive(Clone)]
pub struct PlanningAggregator {
    client: MapServiceClient,
}

impl PlanningAggregator {
    pub fn new(client: MapServiceClient) -> Self {
        Self { client }
    }

    /// Query every layer in order and merge the results.
    ///
    /// Any single lookup failure fails the whole call.
    pub async fn aggregate(&self, geometry: &PointGeometry) -> ProxyResult<AggregateResult> {
        let mut result = AggregateResult::default();

        for layer in PlanningLayer::ALL {
            let attributes = self
                .client
                .query_layer(layer, geometry)
                .await
                .inspect_err(|e| error!("Planning lookup failed: {}", e))?;
            result.set(layer, attributes);
        }

        info!(
            "Aggregated planning attributes (zoning: {}, fsr: {}, height: {})",
            result.zoning.is_some(),
            result.fsr.is_some(),
            result.height.is_some()
        );
        Ok(result)
    }

    /// Headline value per layer for a lon/lat point.
    ///
    /// Failed layers are left empty and reported in `diagnostics`.
    pub async fn summarize(&self, coords: Coords, address: String) -> PlanningSummary {
        let geometry = PointGeometry::from(geo_types::Point::from(coords));
        let mut summary = PlanningSummary::new(address, coords);

        for layer in PlanningLayer::ALL {
            match self.client.query_layer(layer, &geometry).await {
                Ok(attributes) => summary.set_layer(layer, attributes.as_ref()),
                Err(e) => {
                    warn!("Skipping {} layer at ({}, {}): {}", layer, coords.lon, coords.lat, e);
                    summary.record_failure(layer, e.to_string());
                }
            }
        }

        summary
    }
}
