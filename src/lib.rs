//! DevRadar - find developers near you by the technologies they work with
//!
//! The library holds the search service (proximity search, developer
//! registration, storage adapters, HTTP routes) and the map client that
//! drives a search screen from an injected location provider.

pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, parse_techs, rank_nearby, EmptyFilterPolicy, ProximityQuery, SearchOptions, TechFilter};
pub use models::{Dev, DevsResponse, GeoPoint, SearchQuery, StoreDevRequest};
