//! Request and response payloads for the planning and geocode proxies.

pub mod planning;
pub mod summary;

pub use planning::{AggregateResult, AttributeSet, PlanningLayer, PlanningRequest, PointGeometry};
pub use summary::{Coords, PlanningSummary, SummaryQuery};
