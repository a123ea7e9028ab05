pub mod download;
pub mod tilda;
pub mod traits;
pub mod types;

pub use download::{download_listings, HttpImageFetcher};
pub use tilda::TildaPageParser;
pub use traits::ImageFetcher;
pub use types::ScrapeParams;
