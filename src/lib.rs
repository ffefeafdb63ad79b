pub mod config;
pub mod error;
pub mod logger;
pub mod page_fetcher;
pub mod extractor;
pub mod resume_manager;
pub mod output_store;
pub mod crawler;

// Exporting types for convenience
pub use config::CrawlConfig;
pub use error::CrawlError;
pub use page_fetcher::{BrowserFetcher, PageSource};
pub use extractor::{Record, RecordExtractor};
pub use resume_manager::CheckpointStore;
pub use output_store::OutputStore;
pub use crawler::{Crawler, CrawlSummary};
