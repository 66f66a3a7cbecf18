//! Nominatim forward geocoding pass-through.

mod client;

pub use client::GeocodeClient;
