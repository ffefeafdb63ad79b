use log::info;
use std::path::Path;

use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extractor::RecordExtractor;
use crate::output_store::OutputStore;
use crate::page_fetcher::PageSource;
use crate::resume_manager::CheckpointStore;

/// What one invocation of [`Crawler::run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub start_offset: u64,
    pub end_offset: u64,
    /// Pages that produced records; the terminating empty page is not counted.
    pub pages: usize,
    pub records: u64,
}

pub struct Crawler<S: PageSource> {
    source: S,
    extractor: RecordExtractor,
    checkpoint: CheckpointStore,
    output: OutputStore,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, config: &CrawlConfig) -> Result<Self, CrawlError> {
        Ok(Crawler {
            source,
            extractor: RecordExtractor::new(&config.listing_selector)?,
            checkpoint: CheckpointStore::new(&config.checkpoint_path),
            output: OutputStore::new(&config.output_path),
        })
    }

    /// Where the resume offset is kept.
    pub fn checkpoint_path(&self) -> &Path {
        self.checkpoint.path()
    }

    /// Pages through the listing from the checkpointed offset until a page
    /// comes back empty.
    ///
    /// Any error aborts immediately. The checkpoint then still holds the
    /// offset after the last page that reached the output file, so the next
    /// run picks up there.
    pub fn run(&mut self) -> Result<CrawlSummary, CrawlError> {
        let start_offset = self.checkpoint.load()?;
        if start_offset == 0 {
            self.output.initialize()?;
        }

        let mut offset = start_offset;
        let mut pages = 0;
        loop {
            let html = self.source.fetch(offset)?;
            let records = self.extractor.extract(&html, offset);
            if records.is_empty() {
                break;
            }

            self.output.append(&records)?;
            info!("Wrote {} records from offset {}.", records.len(), offset);

            offset += records.len() as u64;
            self.checkpoint.save(offset)?;
            pages += 1;
        }

        info!("Scraping complete. Records are in {:?}.", self.output.path());
        Ok(CrawlSummary {
            start_offset,
            end_offset: offset,
            pages,
            records: offset - start_offset,
        })
    }
}
