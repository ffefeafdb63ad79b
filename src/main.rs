use copperknob_scraper_lib::{logger, BrowserFetcher, CrawlConfig, Crawler};

use std::error::Error;
use log::{info, error};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init()?;
    info!("Starting CopperKnob step-sheet scraper...");

    let config = CrawlConfig::default();

    // The browser lives inside the crawler and is shut down when it drops,
    // including when `run` returns an error.
    let fetcher = BrowserFetcher::launch(&config)?;
    let mut crawler = Crawler::new(fetcher, &config)?;

    match crawler.run() {
        Ok(summary) => {
            info!(
                "Wrote {} records over {} pages (offset {} -> {}).",
                summary.records, summary.pages, summary.start_offset, summary.end_offset
            );
            Ok(())
        }
        Err(e) => {
            error!("Scraping aborted: {}. Next run resumes from {:?}.", e, crawler.checkpoint_path());
            Err(e.into())
        }
    }
}
