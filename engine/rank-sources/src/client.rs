use reqwest::Client;
use tracing::{debug, warn};

use crate::config::SourcesConfig;
use crate::error::{SourceError, SourceResult};

/// HTTP client shared by all ranking sources
///
/// Built once with the configured timeout and user agent; cloning is cheap.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    /// Create a new client from the sources configuration
    pub fn new(config: &SourcesConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self { client })
    }

    /// Fetch a page body, failing on transport errors and non-2xx statuses
    pub async fn get_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching {}", url);

        let response =
            self.client.get(url).send().await.map_err(|e| SourceError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url: url.to_string(), status });
        }

        let body = response.text().await.map_err(|e| SourceError::from_request(url, e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Fetch a page body, logging any failure and returning an empty body instead
    pub async fn get_text_or_empty(&self, url: &str) -> String {
        match self.get_text(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Treating source as empty: {}", e);
                String::new()
            }
        }
    }
}
