use crate::error::FetchError;
use crate::models::{folder_name, ScrapedListing, DESCRIPTION_FILE};
use crate::scrapers::tilda::{description_file_contents, image_extension};
use crate::scrapers::traits::ImageFetcher;
use crate::scrapers::types::ScrapeParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tracing::{debug, info, warn};

/// Fetches images over HTTP, one attempt per URL
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn with_params(params: &ScrapeParams) -> Result<Self> {
        let client = Client::builder()
            .timeout(params.request_timeout)
            .user_agent(params.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("Fetching image: {}", url);

        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// Outcome of writing one listing folder
#[derive(Debug, Clone)]
pub struct FolderReport {
    pub folder: String,
    /// Unique image URLs found for the listing
    pub unique_images: usize,
    /// Files actually written
    pub saved: Vec<String>,
    /// URLs that failed, with the reason
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub folders: Vec<FolderReport>,
}

/// Write one `object_NN` folder per listing under `out_dir`
/// A failed image download or write is logged and skipped; only a folder or
/// description that can't be written aborts the run
pub async fn download_listings(
    listings: &[ScrapedListing],
    out_dir: &Path,
    fetcher: &dyn ImageFetcher,
) -> Result<DownloadReport> {
    let mut report = DownloadReport::default();

    for (idx, listing) in listings.iter().enumerate() {
        let folder = folder_name(idx + 1);
        let path = out_dir.join(&folder);
        let folder_report = write_listing(listing, &folder, &path, fetcher).await?;

        info!(
            "{}: {} images + description saved",
            folder, folder_report.unique_images
        );
        report.folders.push(folder_report);
    }

    Ok(report)
}

async fn write_listing(
    listing: &ScrapedListing,
    folder: &str,
    path: &Path,
    fetcher: &dyn ImageFetcher,
) -> Result<FolderReport> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    tokio::fs::write(path.join(DESCRIPTION_FILE), description_file_contents(listing))
        .await
        .with_context(|| format!("Failed to write description for {}", folder))?;

    let mut saved = Vec::new();
    let mut failed = Vec::new();

    for (i, url) in listing.image_urls.iter().enumerate() {
        let file_name = format!("img_{:02}.{}", i + 1, image_extension(url));

        let bytes = match fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to download {}: {}", url, e);
                failed.push((url.clone(), e.to_string()));
                continue;
            }
        };

        match tokio::fs::write(path.join(&file_name), bytes).await {
            Ok(()) => saved.push(file_name),
            Err(e) => {
                warn!("Failed to write {}/{}: {}", folder, file_name, e);
                failed.push((url.clone(), e.to_string()));
            }
        }
    }

    Ok(FolderReport {
        folder: folder.to_string(),
        unique_images: listing.image_urls.len(),
        saved,
        failed,
    })
}
