use serde::{Deserialize, Serialize};
use crate::models::domain::Dev;

/// Response for the search and listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevsResponse {
    pub devs: Vec<Dev>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
