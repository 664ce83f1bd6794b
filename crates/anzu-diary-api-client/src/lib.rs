//! HTTP client for the diary backend.
//!
//! Provides generic GET/POST helpers that map transport failures, timeouts and
//! non-2xx responses onto [`DiaryError`], plus the diary domain methods in
//! [`api`]. The MCP server uses this client directly.

pub mod api;

use anzu_diary_core::{DiaryConfig, DiaryError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the diary API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DiaryError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| {
            DiaryError::ConfigurationInvalid(format!(
                "Invalid diary API base URL '{}': {}",
                base_url, e
            ))
        })?;

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DiaryError::ConfigurationInvalid(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &DiaryConfig) -> Result<Self, DiaryError> {
        Self::new(&config.api_base, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request with query parameters. Deserializes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DiaryError> {
        let url = self.build_url(path);
        let response = self.send(self.client.get(&url).query(query), &url).await?;

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        serde_json::from_str(&body).map_err(|e| {
            DiaryError::backend(format!(
                "Failed to parse response from {} as JSON: {}",
                url, e
            ))
        })
    }

    /// POST request carrying its parameters in the query string. The response
    /// body is not inspected; only the status is.
    pub async fn post_query(&self, path: &str, query: &[(&str, String)]) -> Result<(), DiaryError> {
        let url = self.build_url(path);
        self.send(self.client.post(&url).query(query), &url).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, DiaryError> {
        tracing::debug!(url = %url, "Sending diary API request");

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DiaryError::BackendError {
                status: Some(status.as_u16()),
                message: format!("API request to {} failed: {}", url, error_text),
            });
        }

        Ok(response)
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> DiaryError {
        if err.is_timeout() {
            DiaryError::backend(format!(
                "Request to {} timed out after {}s",
                url,
                self.timeout.as_secs()
            ))
        } else {
            DiaryError::BackendUnreachable {
                url: url.to_string(),
                source: err.into(),
            }
        }
    }
}
