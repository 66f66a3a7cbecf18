//! Lat/lon planning summary: one display string per layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{AttributeSet, PlanningLayer};
use crate::error::{ProxyError, ProxyResult};

const DEFAULT_ADDRESS: &str = "Address TBC";

/// Query string of `GET /api/nswPlanningAtPoint`
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    /// Display only, never geocoded
    pub address: Option<String>,
}

impl SummaryQuery {
    pub fn coords(&self) -> ProxyResult<Coords> {
        let lat = self.lat.as_deref().map(str::trim).unwrap_or("");
        let lon = self.lon.as_deref().map(str::trim).unwrap_or("");
        if lat.is_empty() || lon.is_empty() {
            return Err(ProxyError::bad_request("lat/lon required"));
        }

        match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => Ok(Coords { lat, lon }),
            _ => Err(ProxyError::bad_request("lat/lon must be numbers")),
        }
    }

    pub fn display_address(&self) -> String {
        match self.address.as_deref() {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => DEFAULT_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coords> for geo_types::Point<f64> {
    fn from(c: Coords) -> Self {
        geo_types::Point::new(c.lon, c.lat)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanningSummary {
    pub ok: bool,
    pub address: String,
    pub coords: Coords,
    pub zoning: Option<String>,
    pub fsr: Option<String>,
    pub hob: Option<String>,
    /// Layer key → error text for lookups that failed
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub diagnostics: BTreeMap<String, String>,
}

impl PlanningSummary {
    pub fn new(address: String, coords: Coords) -> Self {
        Self {
            ok: true,
            address,
            coords,
            zoning: None,
            fsr: None,
            hob: None,
            diagnostics: BTreeMap::new(),
        }
    }

    /// Record a successful lookup, reduced to its headline value.
    pub fn set_layer(&mut self, layer: PlanningLayer, attributes: Option<&AttributeSet>) {
        let value = pick_label(attributes, layer.label_fields());
        match layer {
            PlanningLayer::Zoning => self.zoning = value,
            PlanningLayer::Fsr => self.fsr = value,
            PlanningLayer::Height => self.hob = value,
        }
    }

    pub fn record_failure(&mut self, layer: PlanningLayer, message: String) {
        self.diagnostics.insert(layer.key().to_string(), message);
    }
}

/// First non-null, non-empty attribute among `fields`, rendered as text.
pub fn pick_label(attributes: Option<&AttributeSet>, fields: &[&str]) -> Option<String> {
    let attributes = attributes?;
    fields.iter().find_map(|field| match attributes.get(*field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Whole-valued floats render without a trailing ".0"
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        other => Some(other.to_string()),
    })
}
