//! Layer query response envelope.

use serde::Deserialize;

use crate::models::AttributeSet;

/// Body of a MapServer `/query` call with `f=json`
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    features: Option<Vec<Feature>>,
    /// ArcGIS reports request errors in the body with HTTP 200
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Option<AttributeSet>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    code: Option<i64>,
    message: Option<String>,
}

impl QueryResponse {
    /// Attributes of the first feature, or the service's own error text.
    ///
    /// Multiple intersecting features are resolved by upstream ordering only.
    pub fn into_first_attributes(self) -> Result<Option<AttributeSet>, String> {
        if let Some(err) = self.error {
            return Err(format!(
                "map service error {}: {}",
                err.code.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string()),
                err.message.as_deref().unwrap_or("unknown error")
            ));
        }

        Ok(self
            .features
            .and_then(|features| features.into_iter().next())
            .and_then(|feature| feature.attributes))
    }
}
