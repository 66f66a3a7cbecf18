//! Single-invocation function adapter around [`PlanningAggregator`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PlanningAggregator;
use crate::error::ProxyError;
use crate::models::PlanningRequest;

/// Incoming event; `body` carries the JSON request as text
#[derive(Debug, Default, Deserialize)]
pub struct FunctionRequest {
    #[serde(default)]
    pub body: Option<String>,
}

/// Status/headers/body envelope returned to the function host
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    fn from_error(err: &ProxyError) -> Self {
        let body = serde_json::to_string(&err.body())
            .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
        Self::json(err.status().as_u16(), body)
    }
}

/// Run one aggregate lookup for a function-style invocation.
pub async fn handle_function(
    aggregator: &PlanningAggregator,
    request: FunctionRequest,
) -> FunctionResponse {
    let body = request.body.unwrap_or_default();

    let geometry = match PlanningRequest::geometry_from_slice(body.as_bytes()) {
        Ok(g) => g,
        Err(e) => return FunctionResponse::from_error(&e),
    };

    let result = match aggregator.aggregate(&geometry).await {
        Ok(r) => r,
        Err(e) => return FunctionResponse::from_error(&e),
    };

    match serde_json::to_string(&result) {
        Ok(body) => FunctionResponse::json(200, body),
        Err(e) => FunctionResponse::from_error(&ProxyError::upstream(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcgis::MapServiceClient;
    use crate::testing::{spawn_upstream, Hits, MAP_SERVER_PATH};
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Json};
    use axum::routing::get;
    use axum::Router;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn aggregator(fail_height: bool) -> (PlanningAggregator, Hits) {
        let router = Router::new().route(
            &format!("{}/{{layer}}/query", MAP_SERVER_PATH),
            get(move |Path(layer): Path<u32>| async move {
                if fail_height && layer == 5 {
                    StatusCode::SERVICE_UNAVAILABLE.into_response()
                } else {
                    Json(json!({ "features": [{ "attributes": { "OBJECTID": layer } }] }))
                        .into_response()
                }
            }),
        );
        let (base, hits) = spawn_upstream(router).await;
        let client =
            MapServiceClient::new(&format!("{}{}", base, MAP_SERVER_PATH), Duration::from_secs(5))
                .unwrap();
        (PlanningAggregator::new(client), hits)
    }

    fn event(body: &str) -> FunctionRequest {
        FunctionRequest {
            body: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_function_success_envelope() {
        let (aggregator, hits) = aggregator(false).await;
        let response =
            handle_function(&aggregator, event(r#"{"geometry": {"x": 151.2, "y": -33.8}}"#)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["zoning"]["OBJECTID"], json!(2));
        assert_eq!(body["fsr"]["OBJECTID"], json!(1));
        assert_eq!(body["height"]["OBJECTID"], json!(5));
        assert_eq!(hits.count(), 3);

        let envelope = serde_json::to_value(&response).unwrap();
        assert_eq!(envelope["statusCode"], json!(200));
    }

    #[tokio::test]
    async fn test_function_missing_geometry() {
        let (aggregator, hits) = aggregator(false).await;

        let response = handle_function(&aggregator, event(r#"{"point": [1, 2]}"#)).await;
        assert_eq!(response.status_code, 400);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], json!("Missing geometry"));

        let response = handle_function(&aggregator, FunctionRequest::default()).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_function_upstream_failure() {
        let (aggregator, _) = aggregator(true).await;
        let response =
            handle_function(&aggregator, event(r#"{"geometry": {"x": 151.2, "y": -33.8}}"#)).await;

        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}
