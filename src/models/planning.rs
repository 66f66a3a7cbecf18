//! Planning layers, point geometries and the aggregated attribute result.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ProxyError, ProxyResult};

/// Attributes of one map-service feature, keyed by field name
pub type AttributeSet = Map<String, Value>;

/// Planning layer within the EPI map service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanningLayer {
    /// Land zoning
    Zoning,
    /// Floor space ratio
    Fsr,
    /// Height of buildings
    Height,
}

impl PlanningLayer {
    /// Lookup order for every aggregate call
    pub const ALL: [PlanningLayer; 3] = [
        PlanningLayer::Zoning,
        PlanningLayer::Fsr,
        PlanningLayer::Height,
    ];

    /// MapServer layer id
    pub fn id(self) -> u32 {
        match self {
            PlanningLayer::Zoning => 2,
            PlanningLayer::Fsr => 1,
            PlanningLayer::Height => 5,
        }
    }

    /// Key used in the aggregated response
    pub fn key(self) -> &'static str {
        match self {
            PlanningLayer::Zoning => "zoning",
            PlanningLayer::Fsr => "fsr",
            PlanningLayer::Height => "height",
        }
    }

    /// Attribute names holding the layer's headline value, highest priority first
    pub fn label_fields(self) -> &'static [&'static str] {
        match self {
            PlanningLayer::Zoning => &["ZONE", "ZONING", "ZoneCode", "Zone", "LABEL"],
            PlanningLayer::Fsr => &["FSR", "MAX_FSR", "Fsr", "RATIO", "LABEL"],
            PlanningLayer::Height => &["HOB", "HEIGHT", "MaxHeight", "LABEL"],
        }
    }
}

impl std::fmt::Display for PlanningLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Point geometry as supplied by the caller.
///
/// The value is opaque: it is forwarded to the map service without
/// validation, so malformed input surfaces as an upstream error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointGeometry(Value);

impl PointGeometry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Esri point JSON in WGS84
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self(json!({
            "x": lon,
            "y": lat,
            "spatialReference": { "wkid": 4326 }
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Text sent as the `geometry` query parameter
    pub fn to_query_param(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<geo_types::Point<f64>> for PointGeometry {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::from_lon_lat(point.x(), point.y())
    }
}

/// Body of `POST /api/nswPlanningAtPoint`
#[derive(Debug)]
pub struct PlanningRequest;

impl PlanningRequest {
    /// Parse a raw request body and pull out the geometry.
    ///
    /// The body must be a JSON object with a non-null `geometry` member.
    pub fn geometry_from_slice(body: &[u8]) -> ProxyResult<PointGeometry> {
        let request: Value = serde_json::from_slice(body)
            .map_err(|e| ProxyError::bad_request(format!("Invalid JSON body: {}", e)))?;

        let geometry = match request {
            Value::Object(mut fields) => fields.remove("geometry"),
            _ => None,
        };

        match geometry {
            Some(Value::Null) | None => Err(ProxyError::bad_request("Missing geometry")),
            Some(value) => Ok(PointGeometry::new(value)),
        }
    }
}

/// Merged result of the three layer lookups. Absent layers serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub zoning: Option<AttributeSet>,
    pub fsr: Option<AttributeSet>,
    pub height: Option<AttributeSet>,
}

impl AggregateResult {
    pub fn get(&self, layer: PlanningLayer) -> Option<&AttributeSet> {
        match layer {
            PlanningLayer::Zoning => self.zoning.as_ref(),
            PlanningLayer::Fsr => self.fsr.as_ref(),
            PlanningLayer::Height => self.height.as_ref(),
        }
    }

    pub fn set(&mut self, layer: PlanningLayer, attributes: Option<AttributeSet>) {
        match layer {
            PlanningLayer::Zoning => self.zoning = attributes,
            PlanningLayer::Fsr => self.fsr = attributes,
            PlanningLayer::Height => self.height = attributes,
        }
    }
}
