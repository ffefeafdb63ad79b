use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a crawl can abort. None of these are retried.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("browser failure: {0}")]
    Browser(String),
    #[error("invalid search url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("checkpoint file {path:?} does not hold an offset: {contents:?}")]
    InvalidCheckpoint { path: PathBuf, contents: String },
}

impl CrawlError {
    pub(crate) fn browser<E: std::fmt::Display>(err: E) -> Self {
        CrawlError::Browser(err.to_string())
    }
}
