use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::AppState;
use crate::error::{ProxyError, ProxyResult};
use crate::models::{AggregateResult, PlanningRequest, PlanningSummary, SummaryQuery};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
pub struct InfoResponse {
    ok: bool,
    name: &'static str,
    version: &'static str,
    url: Option<String>,
    env: Option<String>,
    sha: Option<String>,
}

/// Build and deployment details
pub async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        ok: true,
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        url: state.deployment.url.clone(),
        env: state.deployment.env.clone(),
        sha: state.deployment.sha.clone(),
    })
}

/// Zoning, FSR and height attributes for a caller-supplied geometry
pub async fn planning_at_point(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ProxyResult<Json<AggregateResult>> {
    let geometry = PlanningRequest::geometry_from_slice(&body)?;
    let result = state.aggregator.aggregate(&geometry).await?;
    Ok(Json(result))
}

/// Headline planning values for a lat/lon pair
pub async fn planning_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
) -> ProxyResult<Json<PlanningSummary>> {
    let coords = params.coords()?;
    let summary = state
        .aggregator
        .summarize(coords, params.display_address())
        .await;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    q: Option<String>,
}

/// Forward an address search to Nominatim and relay its body
pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> ProxyResult<Response> {
    let address = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ProxyError::bad_request("Missing address parameter")),
    };

    let body = state
        .geocoder
        .search(address)
        .await
        .inspect_err(|e| error!("Geocoding failed: {}", e))?;

    info!("Geocoded {:?} ({} bytes)", address, body.len());
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
