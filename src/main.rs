mod catalog;
mod config;
mod error;
mod models;
mod scrapers;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CatalogConfig;
use scrapers::{download_listings, HttpImageFetcher, ImageFetcher, TildaPageParser};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "housing-catalog")]
#[command(about = "Build a folder-per-listing catalog from a saved real-estate page")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the object_NN folders [default: objects]
    #[arg(short, long, global = true)]
    base: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the saved page, write descriptions and download images
    Download {
        /// Saved catalog page [default: apartments.html]
        #[arg(long)]
        html: Option<PathBuf>,
        /// Only image URLs containing this host are downloaded
        #[arg(long)]
        cdn_host: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// Regenerate data.json in every listing folder
    Records,
    /// Fill in missing titles from the description text
    Titles {
        /// City used when a record has none
        #[arg(long)]
        city: Option<String>,
    },
    /// Rebuild index.json from the listing folders
    Index,
    /// Run records, titles and index in sequence
    Build {
        #[arg(long)]
        city: Option<String>,
    },
}

impl Cli {
    /// Defaults with every flag given on the command line applied on top
    fn config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::default();

        if let Some(base) = &self.base {
            config.base_dir = base.clone();
        }

        match &self.command {
            Commands::Download {
                html,
                cdn_host,
                timeout,
                user_agent,
            } => {
                if let Some(html) = html {
                    config.html_file = html.clone();
                }
                if let Some(host) = cdn_host {
                    config.scrape.cdn_host = host.clone();
                }
                if let Some(secs) = timeout {
                    config.scrape.request_timeout = Duration::from_secs(*secs);
                }
                if let Some(agent) = user_agent {
                    config.scrape.user_agent = agent.clone();
                }
            }
            Commands::Titles { city: Some(city) } | Commands::Build { city: Some(city) } => {
                config.default_city = city.clone();
            }
            _ => {}
        }

        config
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_download(config: &CatalogConfig) -> anyhow::Result<()> {
    let html = &config.html_file;
    let out = &config.base_dir;

    let page = tokio::fs::read_to_string(html)
        .await
        .with_context(|| format!("Failed to read {}", html.display()))?;

    let parser = TildaPageParser::with_params(config.scrape.clone())?;
    let listings = parser.parse_listings(&page);

    let fetcher = HttpImageFetcher::with_params(&config.scrape)?;
    info!("Downloading images via {} fetcher", fetcher.source_name());

    let report = download_listings(&listings, out, &fetcher).await?;

    for folder in report.folders.iter().filter(|f| !f.failed.is_empty()) {
        warn!(
            "{}: {} of {} images failed",
            folder.folder,
            folder.failed.len(),
            folder.unique_images
        );
    }

    let saved: usize = report.folders.iter().map(|f| f.saved.len()).sum();
    info!(
        "💾 Saved {} listing folders with {} images to {}",
        report.folders.len(),
        saved,
        out.display()
    );
    Ok(())
}

fn run_build(config: &CatalogConfig) -> anyhow::Result<()> {
    catalog::build_records(&config.base_dir)?;
    catalog::backfill_titles(&config.base_dir, &config.default_city)?;
    catalog::build_index(&config.base_dir)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();

    match cli.command {
        Commands::Download { .. } => run_download(&config).await?,
        Commands::Records => {
            catalog::build_records(&config.base_dir)?;
        }
        Commands::Titles { .. } => {
            catalog::backfill_titles(&config.base_dir, &config.default_city)?;
        }
        Commands::Index => {
            catalog::build_index(&config.base_dir)?;
        }
        Commands::Build { .. } => run_build(&config)?,
    }

    info!("Done.");
    Ok(())
}
