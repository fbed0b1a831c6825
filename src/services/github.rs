use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the GitHub API
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("GitHub user not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid or missing GitHub token")]
    Unauthorized,

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// Public fields of a GitHub user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl GitHubUser {
    /// Display name, falling back to the login when the profile has none
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

/// GitHub REST API client
///
/// Only the users endpoint is needed to fill in a developer's name, avatar
/// and bio on registration.
pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(
        base_url: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("devradar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url, token, client })
    }

    /// Fetch a user's public profile
    pub async fn get_user(&self, username: &str) -> Result<GitHubUser, GitHubError> {
        let url = format!(
            "{}/users/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(username)
        );

        tracing::debug!("Fetching GitHub user from: {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(username.to_string())),
            StatusCode::UNAUTHORIZED => Err(GitHubError::Unauthorized),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch GitHub user {}: {} - {}", username, status, body);
                Err(GitHubError::ApiError(format!("Failed to fetch user: {}", status)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            server.url(),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"login":"octocat","name":"The Octocat","avatar_url":"https://avatars.githubusercontent.com/u/583231","bio":null}"#)
            .create_async()
            .await;

        let user = client_for(&server, None).get_user("octocat").await.unwrap();

        mock.assert_async().await;
        assert_eq!(user.display_name(), "The Octocat");
        assert_eq!(user.bio, None);
    }

    #[tokio::test]
    async fn test_sends_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"login":"octocat","avatar_url":"a"}"#)
            .create_async()
            .await;

        client_for(&server, Some("secret")).get_user("octocat").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_user() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/nobody")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = client_for(&server, None).get_user("nobody").await.unwrap_err();
        assert!(matches!(err, GitHubError::NotFound(ref name) if name == "nobody"));
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let user = GitHubUser {
            login: "octocat".to_string(),
            name: None,
            avatar_url: String::new(),
            bio: None,
        };
        assert_eq!(user.display_name(), "octocat");
    }
}
