//! Thin client for the Graph-style JSON APIs both providers expose.

use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};

use crate::ProviderError;

#[derive(Debug, Clone)]
pub(crate) struct GraphClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub(crate) data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<GraphError>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

impl GraphClient {
    pub(crate) fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let resp = self
            .http
            .get(self.url(path))
            .query(query)
            .query(&[("access_token", access_token)])
            .send()
            .await?;

        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(api_error(resp).await)
    }
}

/// Turns a non-success response into [`ProviderError::Api`].
pub(crate) async fn api_error(resp: Response) -> ProviderError {
    let status = resp.status();
    let body = resp.json::<ErrorBody>().await.unwrap_or_default();
    let message = body
        .error
        .map(|err| err.message)
        .or(body.error_message)
        .unwrap_or_else(|| "provider error".to_string());
    ProviderError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = GraphClient::new(Client::new(), "https://graph.example.com/v1/".to_string());
        assert_eq!(client.url("/me/media"), "https://graph.example.com/v1/me/media");
        assert_eq!(client.url("me"), "https://graph.example.com/v1/me");
    }

    #[tokio::test]
    async fn failed_request_does_not_leak_the_token() {
        // nothing listens on the discard port
        let client = GraphClient::new(Client::new(), "http://127.0.0.1:9".to_string());

        let err = client
            .get::<serde_json::Value>("me/media", "SECRET-TOKEN-123", &[("fields", "id")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Http(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN-123"));
        assert!(!format!("{err:?}").contains("SECRET-TOKEN-123"));
    }

    #[test]
    fn page_without_data_is_empty() {
        let page: Page<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
    }
}
