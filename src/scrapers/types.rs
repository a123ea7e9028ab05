use std::time::Duration;

/// Title used when a listing block has no heading
pub const PLACEHOLDER_TITLE: &str = "Без названия";

/// Parameters for scraping a saved catalog page and fetching its images
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    /// Only image URLs containing this host are downloaded
    pub cdn_host: String,
    /// Title used when a listing block has no heading
    pub placeholder_title: String,
    /// Per-request timeout, no retries
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            cdn_host: "static.tildacdn.com".to_string(),
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            request_timeout: Duration::from_secs(15),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}
