use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use log::{info, warn};

use crate::error::CrawlError;
use crate::extractor::{Record, FIELDNAMES};

/// Append-only CSV sink. The file is opened and closed on every call so each
/// page is on disk before the next fetch starts.
#[derive(Debug, Clone)]
pub struct OutputStore {
    path: PathBuf,
}

impl OutputStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        OutputStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncates the file and writes the header row. Only for fresh runs.
    pub fn initialize(&self) -> Result<(), CrawlError> {
        let file = File::create(&self.path)?;
        let mut writer = writer(file);
        writer.write_record(FIELDNAMES)?;
        writer.flush()?;
        info!("Initialized {:?} with header", self.path);
        Ok(())
    }

    pub fn append(&self, records: &[Record]) -> Result<(), CrawlError> {
        if !self.path.exists() {
            warn!("{:?} is missing; appending rows without a header", self.path);
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(title: &str, info: &str) -> Record {
        Record {
            title: title.into(),
            link: format!("/stepsheets/{}", title),
            author_and_date: "Someone".into(),
            info: info.into(),
        }
    }

    #[test]
    fn test_initialize_then_append() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path().join("out.csv"));
        store.initialize().unwrap();
        store.append(&[record("A", "32 Count"), record("B", "")]).unwrap();
        store.append(&[record("C", "4 Wall, Beginner")]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "title,link,author_and_date,info\n\
             A,/stepsheets/A,Someone,32 Count\n\
             B,/stepsheets/B,Someone,\n\
             C,/stepsheets/C,Someone,\"4 Wall, Beginner\"\n"
        );
    }

    #[test]
    fn test_initialize_truncates_previous_run() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path().join("out.csv"));
        fs::write(store.path(), "stale,rows\n").unwrap();
        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "title,link,author_and_date,info\n");
    }

    #[test]
    fn test_append_creates_missing_file_without_header() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path().join("out.csv"));
        store.append(&[record("Z", "x")]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "Z,/stepsheets/Z,Someone,x\n");
    }
}
