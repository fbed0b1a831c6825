//! Map client for the search screen
//!
//! Models the mobile flow without any UI: a [`MapScreen`] state machine fed by
//! an injected [`LocationProvider`] and [`SearchApi`], the markers it would
//! draw, and the stack [`Navigator`] behind the profile tap-through.

pub mod api;
pub mod location;
pub mod navigation;
pub mod screen;

use thiserror::Error;

pub use api::{HttpSearchApi, SearchApi};
pub use location::{Accuracy, Coords, FixedLocationProvider, LocationProvider, PermissionStatus};
pub use navigation::{Navigator, Route};
pub use screen::{Callout, MapScreen, MapState, Marker, Region, INITIAL_DELTA};

/// Errors surfaced by the map client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("search API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("no location acquired yet")]
    NoLocation,

    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
}
