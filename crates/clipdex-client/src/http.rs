//! HTTP implementation of the catalog backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use clipdex_core::{defaults, Error, Result, SearchHit, SearchParams, VideoMetadata};

use crate::backend::CatalogBackend;

/// Catalog API client over HTTP.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

/// Error body shape returned by the catalog API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpCatalogClient {
    /// Create a client against the default base URL.
    pub fn new() -> Self {
        Self::with_config(
            defaults::API_BASE.to_string(),
            Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_config(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        info!(base_url = %base_url, "Initializing catalog client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `CLIPDEX_API_BASE` | `http://localhost:8000/api` | Catalog API base URL |
    /// | `CLIPDEX_HTTP_TIMEOUT_SECS` | `120` | Client-side request timeout |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CLIPDEX_API_BASE").unwrap_or_else(|_| defaults::API_BASE.to_string());
        let timeout = std::env::var("CLIPDEX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        Self::with_config(base_url, Duration::from_secs(timeout))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map a non-success response onto the transport error taxonomy.
    async fn classify_failure(response: Response) -> Error {
        let status = response.status();
        match status {
            StatusCode::GATEWAY_TIMEOUT => Error::Timeout,
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
            _ => match response.json::<ErrorBody>().await {
                Ok(body) => Error::Server(body.detail),
                Err(_) => Error::Request(format!("HTTP {status}")),
            },
        }
    }

    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let err = Self::classify_failure(response).await;
            warn!(error = %err, "Catalog request failed");
            Err(err)
        }
    }
}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogBackend for HttpCatalogClient {
    #[instrument(skip(self), fields(subsystem = "client", op = "analyze"))]
    async fn analyze(&self, url: &str) -> Result<VideoMetadata> {
        debug!(url, "Requesting analysis");
        let response = self
            .client
            .post(self.endpoint("analyze"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        let metadata = Self::check(response).await?.json::<VideoMetadata>().await?;
        info!(url, title = %metadata.title, "Analysis complete");
        Ok(metadata)
    }

    #[instrument(skip_all, fields(subsystem = "client", op = "save"))]
    async fn save(&self, metadata: &VideoMetadata) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("videos"))
            .json(metadata)
            .send()
            .await?;

        Self::check(response).await?;
        info!(title = %metadata.title, "Record persisted");
        Ok(())
    }

    #[instrument(skip(self), fields(subsystem = "client", op = "search", query = %params.query))]
    async fn search(&self, params: SearchParams) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(self.endpoint("search"))
            .json(&params)
            .send()
            .await?;

        let hits = Self::check(response)
            .await?
            .json::<Vec<SearchHit>>()
            .await?;
        debug!(result_count = hits.len(), "Search complete");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client =
            HttpCatalogClient::with_config("http://host/api/".to_string(), Duration::from_secs(1));
        assert_eq!(client.endpoint("analyze"), "http://host/api/analyze");
    }

    #[test]
    fn test_error_body_parses_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"model offline"}"#).unwrap();
        assert_eq!(body.detail, "model offline");
    }
}
