use crate::error::Result;
use async_trait::async_trait;

/// Source of page bodies for the scraper.
/// The HTTP implementation talks to the live site; tests serve canned HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}
