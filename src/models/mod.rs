// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Dev, GeoPoint, InvalidCoordinates};
pub use requests::{SearchQuery, StoreDevRequest};
pub use responses::{DevsResponse, ErrorResponse, HealthResponse};
