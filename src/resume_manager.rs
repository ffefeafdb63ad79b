use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::info;

use crate::error::CrawlError;

/// Durable copy of the crawl offset: one decimal integer in a text file,
/// rewritten after every page that was appended to the output.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CheckpointStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset to resume from. A missing file means a fresh run.
    pub fn load(&self) -> Result<u64, CrawlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No checkpoint at {:?}. Starting fresh.", self.path);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let offset = content.trim().parse::<u64>().map_err(|_| CrawlError::InvalidCheckpoint {
            path: self.path.clone(),
            contents: content.clone(),
        })?;
        info!("Resuming from checkpoint: offset {}", offset);
        Ok(offset)
    }

    /// Writes `offset` to a sibling temp file and renames it over the
    /// checkpoint, so an interrupted save leaves the previous value intact.
    pub fn save(&self, offset: u64) -> Result<(), CrawlError> {
        let tmp = self.tmp_path();
        let mut file = File::create(&tmp)?;
        file.write_all(offset.to_string().as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_starts_at_zero() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("scrape_checkpoint.txt"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("scrape_checkpoint.txt"));
        store.save(1200).unwrap();
        store.save(25).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "25");
        assert_eq!(store.load().unwrap(), 25);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("scrape_checkpoint.txt"));
        store.save(7).unwrap();
        assert!(!dir.path().join("scrape_checkpoint.txt.tmp").exists());
    }

    #[test]
    fn test_stale_temp_file_does_not_affect_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scrape_checkpoint.txt");
        fs::write(&path, "40").unwrap();
        // What an interrupted save leaves behind.
        fs::write(dir.path().join("scrape_checkpoint.txt.tmp"), "").unwrap();

        let store = CheckpointStore::new(&path);
        assert_eq!(store.load().unwrap(), 40);

        store.save(60).unwrap();
        assert_eq!(store.load().unwrap(), 60);
        assert!(!dir.path().join("scrape_checkpoint.txt.tmp").exists());
    }

    #[test]
    fn test_load_tolerates_surrounding_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scrape_checkpoint.txt");
        fs::write(&path, "  50\n").unwrap();
        assert_eq!(CheckpointStore::new(path).load().unwrap(), 50);
    }

    #[test]
    fn test_garbage_checkpoint_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scrape_checkpoint.txt");
        fs::write(&path, "fifty").unwrap();
        match CheckpointStore::new(&path).load() {
            Err(CrawlError::InvalidCheckpoint { contents, .. }) => assert_eq!(contents, "fifty"),
            other => panic!("expected InvalidCheckpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_checkpoint_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scrape_checkpoint.txt");
        fs::write(&path, "-3").unwrap();
        assert!(CheckpointStore::new(path).load().is_err());
    }
}
