use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::client::ClientError;
use crate::models::{Dev, DevsResponse, ErrorResponse};

/// Search capability used by the map screen
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, latitude: f64, longitude: f64, techs: &str) -> Result<Vec<Dev>, ClientError>;
}

/// [`SearchApi`] over HTTP against a DevRadar service
pub struct HttpSearchApi {
    base_url: String,
    client: Client,
}

impl HttpSearchApi {
    /// `base_url` points at the API root, e.g. `http://10.0.2.2:3333/api/v1`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, latitude: f64, longitude: f64, techs: &str) -> Result<Vec<Dev>, ClientError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("techs", techs.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: DevsResponse = response.json().await?;
        tracing::debug!("Search returned {} devs", body.devs.len());

        Ok(body.devs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_search_sends_query_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("lat".into(), "-23.5".into()),
                Matcher::UrlEncoded("lon".into(), "-46.6".into()),
                Matcher::UrlEncoded("techs".into(), "ReactJS, Node.js".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"devs":[]}"#)
            .create_async()
            .await;

        let api = HttpSearchApi::new(format!("{}/api/v1", server.url()), Duration::from_secs(5)).unwrap();
        let devs = api.search(-23.5, -46.6, "ReactJS, Node.js").await.unwrap();

        mock.assert_async().await;
        assert!(devs.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":"validation_failed","message":"lat: out of range","status_code":400}"#)
            .create_async()
            .await;

        let api = HttpSearchApi::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = api.search(123.0, 0.0, "Go").await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "lat: out of range");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
