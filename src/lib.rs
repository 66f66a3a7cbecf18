//! Planproxy - NSW planning attribute lookups and a Nominatim geocode proxy
//!
//! This library provides the clients, handlers and adapters shared by the
//! `serve` and `invoke` binaries.

pub mod arcgis;
pub mod config;
pub mod error;
pub mod models;
pub mod nominatim;
pub mod planning;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ProxyError, ProxyResult};
pub use models::{AggregateResult, PlanningLayer, PointGeometry};
