use async_trait::async_trait;

use crate::error::FetchError;

/// Source of image bytes for the downloader
/// Lets the download loop run against something other than the network
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the body behind `url` in a single attempt
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Get the name of the fetcher
    fn source_name(&self) -> &'static str;
}
