use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::{GitHubError, StoreError};

/// Errors returned by HTTP handlers
///
/// Every variant renders as an [`ErrorResponse`] JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidJson(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("GitHub user not found: {0}")]
    GitHubUserNotFound(String),

    #[error("GitHub request failed: {0}")]
    GitHub(#[source] GitHubError),

    /// Only the context code reaches the client; the source is logged
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        tracing::error!("{}: {}", context, source);
        Self::Store { context, source }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::InvalidJson(_) => "invalid_json",
            Self::InvalidQuery(_) => "invalid_query",
            Self::GitHubUserNotFound(_) => "github_user_not_found",
            Self::GitHub(_) => "github_unavailable",
            Self::Store { context, .. } => *context,
        }
    }
}

impl From<GitHubError> for ApiError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NotFound(username) => Self::GitHubUserNotFound(username),
            other => Self::GitHub(other),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::GitHubUserNotFound(_) => StatusCode::NOT_FOUND,
            Self::GitHub(_) => StatusCode::BAD_GATEWAY,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::InvalidQuery(format!("Invalid query: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_github_not_found_maps_to_404() {
        let err = ApiError::from(GitHubError::NotFound("ghost".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "github_user_not_found");
    }

    #[test]
    fn test_store_error_keeps_context_code() {
        let err = ApiError::store("search_failed", StoreError::InvalidRecord("bad".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "search_failed");
    }

    #[actix_web::test]
    async fn test_store_error_hides_source_from_response() {
        let err = ApiError::store(
            "search_failed",
            StoreError::InvalidRecord("relation \"devs\" does not exist".to_string()),
        );
        assert_eq!(err.to_string(), "search_failed");

        let response = err.error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "search_failed");
        assert_eq!(body.message, "search_failed");
        assert_eq!(body.status_code, 500);
        assert!(!body.message.contains("devs"));
    }
}
