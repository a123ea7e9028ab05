use crate::catalog::DEFAULT_CITY;
use crate::scrapers::ScrapeParams;
use std::path::PathBuf;

/// Directory holding the `object_NN` folders unless `--base` says otherwise
pub const DEFAULT_BASE_DIR: &str = "objects";
/// Saved catalog page read by `download`
pub const DEFAULT_HTML_FILE: &str = "apartments.html";

/// Settings shared by every job; command-line flags override the defaults
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_dir: PathBuf,
    pub html_file: PathBuf,
    /// City used by the title backfill when a record has none
    pub default_city: String,
    pub scrape: ScrapeParams,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            html_file: PathBuf::from(DEFAULT_HTML_FILE),
            default_city: DEFAULT_CITY.to_string(),
            scrape: ScrapeParams::default(),
        }
    }
}
