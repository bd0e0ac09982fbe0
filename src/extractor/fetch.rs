//! HTTP page fetching backed by reqwest

use crate::extractor::traits::PageFetcher;
use crate::utils::config::ExtractorSettings;
use crate::utils::error::ExtractorError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Production page fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher using the user agent and timeout from `settings`
    ///
    /// Settings are normalized first, so a zero timeout becomes one second.
    pub fn new(settings: &ExtractorSettings) -> Result<Self> {
        let settings = settings.clone().normalized();
        let timeout = settings.request_timeout();
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(timeout)
            .build()
            .map_err(ExtractorError::NetworkError)?;

        Ok(Self { client, timeout })
    }

    /// Per-request timeout applied by the client
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Downloading webpage: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractorError::PageFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractorError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| ExtractorError::PageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
