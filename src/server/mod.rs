//! HTTP front end for the planning aggregator and the geocode proxy.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::arcgis::MapServiceClient;
use crate::config::{Config, DeploymentInfo};
use crate::nominatim::GeocodeClient;
use crate::planning::PlanningAggregator;

/// Application state shared across handlers
pub struct AppState {
    pub aggregator: PlanningAggregator,
    pub geocoder: GeocodeClient,
    pub deployment: DeploymentInfo,
}

impl AppState {
    pub fn new(config: &Config, deployment: DeploymentInfo) -> Result<Self> {
        let map_service = MapServiceClient::from_config(&config.map_service)?;

        Ok(Self {
            aggregator: PlanningAggregator::new(map_service),
            geocoder: GeocodeClient::from_config(&config.geocoder)?,
            deployment,
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/info", get(handlers::info))
        .route(
            "/api/nswPlanningAtPoint",
            get(handlers::planning_summary).post(handlers::planning_at_point),
        )
        .route("/geocode", get(handlers::geocode))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(Arc::new(state));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
