//! Stock-footage service HTTP client.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{StockError, StockResult};
use crate::types::{SearchResponse, StockVideo};

/// Configuration for the stock client.
#[derive(Debug, Clone)]
pub struct StockClientConfig {
    /// Base URL of the stock-footage service
    pub base_url: String,
    /// Request timeout (covers search and download)
    pub timeout: Duration,
}

impl Default for StockClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pexels.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl StockClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STOCK_API_URL")
                .unwrap_or_else(|_| "https://api.pexels.com".to_string()),
            timeout: Duration::from_secs(
                std::env::var("STOCK_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

/// Client for the stock-footage service.
pub struct StockClient {
    http: Client,
    config: StockClientConfig,
}

impl StockClient {
    /// Create a new stock client.
    pub fn new(config: StockClientConfig) -> StockResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StockError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StockResult<Self> {
        Self::new(StockClientConfig::from_env())
    }

    /// Search for a single portrait-orientation clip.
    ///
    /// Returns `None` when the service has no match for the query. The
    /// credential goes out as a bearer-style `Authorization` header.
    pub async fn search_portrait(
        &self,
        query: &str,
        api_key: &str,
    ) -> StockResult<Option<StockVideo>> {
        let url = format!("{}/videos/search", self.config.base_url);

        debug!(query, "Searching stock footage");

        let response = self
            .http
            .get(&url)
            .header("Authorization", api_key)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "portrait"),
                ("size", "medium"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::request_failed(format!(
                "stock service returned {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.videos.into_iter().next())
    }

    /// Download a clip to `dest`, streaming the body straight to disk.
    pub async fn download(&self, url: &str, dest: &Path) -> StockResult<()> {
        debug!(url, dest = %dest.display(), "Downloading stock clip");

        let response = self.http.get(url).send().await?.error_for_status()?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
