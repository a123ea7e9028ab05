use serde::{Deserialize, Serialize};

/// File name of the per-listing record
pub const RECORD_FILE: &str = "data.json";
/// File name of the free-text description written by the downloader
pub const DESCRIPTION_FILE: &str = "description.txt";
/// File name of the top-level folder index
pub const INDEX_FILE: &str = "index.json";
/// Prefix shared by every listing folder
pub const FOLDER_PREFIX: &str = "object_";

/// One listing block extracted from a saved catalog page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedListing {
    pub title: String,
    pub description: String,
    /// Sorted and deduplicated
    pub image_urls: Vec<String>,
}

/// Per-folder JSON record (`data.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ListingRecord {
    pub fn new(title: String, description: String, images: Vec<String>) -> Self {
        Self {
            title,
            description,
            images,
            city: None,
        }
    }
}

/// Ordered list of folder names with a valid record
pub type ObjectIndex = Vec<String>;

/// Folder name for the n-th listing on a page (1-based)
pub fn folder_name(position: usize) -> String {
    format!("{}{:02}", FOLDER_PREFIX, position)
}

/// Every JSON file in the catalog is written pretty-printed, non-ASCII kept as is
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
