use crate::models::ScrapedListing;
use crate::scrapers::types::ScrapeParams;
use anyhow::{anyhow, Result};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Parser for catalog pages saved from a Tilda-built site
pub struct TildaPageParser {
    params: ScrapeParams,
    listing: Selector,
    heading: Selector,
    description: Selector,
    slide: Selector,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e}"))
}

impl TildaPageParser {
    pub fn with_params(params: ScrapeParams) -> Result<Self> {
        Ok(Self {
            params,
            listing: selector(".t764")?,
            heading: selector("h1, h2, h3")?,
            description: selector(".t-descr, .t764__descr")?,
            slide: selector(".t-slds__bgimg[data-original]")?,
        })
    }

    /// Extract every listing block from the page, in document order
    pub fn parse_listings(&self, html: &str) -> Vec<ScrapedListing> {
        let document = Html::parse_document(html);

        let blocks: Vec<_> = document.select(&self.listing).collect();
        info!("Found {} listings in page", blocks.len());

        blocks
            .into_iter()
            .map(|block| self.parse_block(block))
            .collect()
    }

    fn parse_block(&self, block: ElementRef<'_>) -> ScrapedListing {
        // First h1/h2/h3 in document order, text nodes trimmed and glued
        let title = block
            .select(&self.heading)
            .next()
            .map(|h| h.text().map(str::trim).collect::<String>())
            .unwrap_or_else(|| self.params.placeholder_title.clone());

        let description = block
            .select(&self.description)
            .map(|d| {
                d.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let image_urls: BTreeSet<String> = block
            .select(&self.slide)
            .filter_map(|slide| slide.value().attr("data-original"))
            .filter(|url| url.contains(&self.params.cdn_host))
            .map(str::to_string)
            .collect();

        debug!("Parsed listing {:?} with {} unique images", title, image_urls.len());

        ScrapedListing {
            title,
            description,
            image_urls: image_urls.into_iter().collect(),
        }
    }
}

/// Contents of `description.txt`: title, blank line, description
pub fn description_file_contents(listing: &ScrapedListing) -> String {
    format!("{}\n\n{}", listing.title, listing.description)
}

/// Used when the URL path carries no usable extension
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Extension of the last path segment of the URL, query string ignored
/// Falls back to `jpg` when the segment has none or it isn't alphanumeric
pub fn image_extension(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .unwrap_or_default(),
        Err(_) => {
            let path = url.split('?').next().unwrap_or(url);
            path.rsplit('/').next().unwrap_or("").to_string()
        }
    };

    Path::new(&segment)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}
