//! ArcGIS MapServer point queries against the NSW planning layers.

mod client;
mod response;

pub use client::MapServiceClient;
pub use response::QueryResponse;
