//! HTTP client for the stories backend.
//!
//! Fetches story groups from `/api/stories` and probes `/api/health`.

use crate::config::Config;
use crate::news::models::{Story, parse_stories};
use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Why a stories fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or an interrupted body read
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body is not a valid stories document
    #[error("malformed stories response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Upper bound for the health probe, independent of the stories timeout.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Stories backend client.
#[derive(Debug, Clone)]
pub struct NewsClient {
    /// HTTP client for API requests
    client: Client,
    /// Backend base URL without trailing slash
    base_url: String,
}

impl NewsClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `anyhow::Result<NewsClient>` - New client or error
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        if config.api_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Backend URL is required. Please set api_base_url in config.jsonc"
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all story groups.
    ///
    /// # Returns
    /// * `Result<Vec<Story>, FetchError>` - Every story the backend returned, unfiltered
    ///
    /// # Details
    /// Issues a single `GET /api/stories` with no query parameters.
    /// The body is read as text first so that a malformed document is
    /// reported as such rather than as a network failure.
    pub async fn fetch_stories(&self) -> Result<Vec<Story>, FetchError> {
        let url = format!("{}/api/stories", self.base_url);
        debug!(%url, "fetching stories");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;
        let stories = parse_stories(&body)?;
        info!(count = stories.len(), "stories received");
        Ok(stories)
    }

    /// Probe the backend health endpoint.
    ///
    /// # Returns
    /// * `bool` - True if `/api/health` answered `{"status": "ok"}`
    ///
    /// # Details
    /// Runs after a failed fetch, so it is capped at [`HEALTH_TIMEOUT`]
    /// rather than the configured request timeout.
    pub async fn health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        let response = match self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), "health probe failed");
                return false;
            }
            Err(e) => {
                debug!(error = %e, "health probe failed");
                return false;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(health) => health.status == "ok",
            Err(_) => false,
        }
    }
}
