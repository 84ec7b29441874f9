use crate::error::{Result, ScrapeError};
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fetches pages over HTTP with a single attempt per URL
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Without a `timeout` requests wait as long as reqwest's default allows
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching URL: {}", url);

        let transport = |source: reqwest::Error| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport)?;

        let html = response.text().await.map_err(transport)?;
        debug!("Downloaded {} bytes of HTML from {}", html.len(), url);

        Ok(html)
    }
}
