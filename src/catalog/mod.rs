//! HTTP client for the FDSN event catalog service.

mod endpoints;

pub use endpoints::{Endpoints, DEFAULT_API_BASE, DEFAULT_END_TIME, DEFAULT_START_TIME};

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::models::{ApplicationMetadata, FeatureCollection};

pub const USER_AGENT: &str = concat!("quakeboard/", env!("CARGO_PKG_VERSION"));

/// Errors from a single catalog request.
///
/// The board shows one static message per request regardless of variant;
/// the variants exist for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Catalog client with request logging and JSON decoding.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Create a client.
    /// - `user_agent`: None uses the default quakeboard user agent
    /// - `timeout`: None waits indefinitely
    pub fn new(user_agent: Option<&str>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON. Any non-2xx status is an error.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "catalog response"
        );

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn application_metadata(
        &self,
        endpoints: &Endpoints,
    ) -> Result<ApplicationMetadata, FetchError> {
        self.get_json(endpoints.application()).await
    }

    pub async fn earthquakes(&self, endpoints: &Endpoints) -> Result<FeatureCollection, FetchError> {
        self.get_json(endpoints.query()).await
    }
}
