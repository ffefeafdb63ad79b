use std::path::PathBuf;
use std::time::Duration;

pub const SEARCH_TEMPLATE: &str = "https://www.copperknob.co.uk/search?Order=Rating&Lang=Any&SearchType=Any&Level=Any&Beat=-1&Wall=-1&Search=";
pub const OUTPUT_FILE: &str = "copperknob.csv";
pub const CHECKPOINT_FILE: &str = "scrape_checkpoint.txt";
pub const LISTING_SELECTOR: &str = "div.listitem";
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(2);

/// Everything the crawl needs to know about where to read and write.
///
/// The binary always runs with `CrawlConfig::default()`; the fields are
/// public so tests can redirect the stores into a scratch directory.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Search URL without the `recnum` parameter.
    pub search_template: String,
    pub output_path: PathBuf,
    pub checkpoint_path: PathBuf,
    /// Node that marks a rendered listing item.
    pub listing_selector: String,
    /// Upper bound on waiting for client-side rendering after navigation.
    pub render_timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            search_template: SEARCH_TEMPLATE.to_string(),
            output_path: PathBuf::from(OUTPUT_FILE),
            checkpoint_path: PathBuf::from(CHECKPOINT_FILE),
            listing_selector: LISTING_SELECTOR.to_string(),
            render_timeout: RENDER_TIMEOUT,
        }
    }
}

impl CrawlConfig {
    /// Same settings with both stores placed under `dir`.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        CrawlConfig {
            output_path: dir.join(OUTPUT_FILE),
            checkpoint_path: dir.join(CHECKPOINT_FILE),
            ..CrawlConfig::default()
        }
    }
}
