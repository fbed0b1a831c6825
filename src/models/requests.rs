use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[serde(default)]
    pub techs: String,
}

/// Request to register a developer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreDevRequest {
    #[validate(length(min = 1, max = 39))]
    pub github_username: String,
    #[serde(default)]
    pub techs: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}
