//! Table Cache Module
//! Keeps the loaded and cleaned metadata per file, keyed by modification time.

use super::cleaner::{CleanError, CleanedTable, DataCleaner};
use super::loader::{DataLoader, LoaderError};
use polars::prelude::DataFrame;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Failed to clean data: {0}")]
    Clean(#[from] CleanError),
}

struct CacheEntry {
    modified: SystemTime,
    raw: Arc<DataFrame>,
    cleaned: Arc<CleanedTable>,
}

/// Session cache of loaded tables.
///
/// An entry is valid while the file's modification time is unchanged. Owned by
/// whoever drives the workflow and passed down explicitly.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw table as read from disk.
    pub fn load(&mut self, path: &Path) -> Result<Arc<DataFrame>, CacheError> {
        Ok(Arc::clone(&self.entry(path)?.raw))
    }

    /// Cleaned table, derived once per load.
    pub fn cleaned(&mut self, path: &Path) -> Result<Arc<CleanedTable>, CacheError> {
        Ok(Arc::clone(&self.entry(path)?.cleaned))
    }

    /// Forget everything, forcing the next call to re-read.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, path: &Path) -> Result<&CacheEntry, CacheError> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| LoaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) if entry.get().modified == modified => {
                log::debug!("Cache hit for {}", path.display());
                Ok(entry.into_mut())
            }
            entry => {
                log::info!("Cache miss for {}, reading file", path.display());
                let raw = DataLoader::load_csv(path)?;
                let cleaned = DataCleaner::clean(&raw)?;
                let fresh = CacheEntry {
                    modified,
                    raw: Arc::new(raw),
                    cleaned: Arc::new(cleaned),
                };
                Ok(match entry {
                    Entry::Occupied(mut stale) => {
                        stale.insert(fresh);
                        stale.into_mut()
                    }
                    Entry::Vacant(slot) => slot.insert(fresh),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_CSV;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_repeated_calls_return_same_table() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let mut cache = TableCache::new();
        let first = cache.cleaned(&path).unwrap();
        let second = cache.cleaned(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&cache.load(&path).unwrap(), &cache.load(&path).unwrap()));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.height(), 2);
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let mut cache = TableCache::new();
        let first = cache.cleaned(&path).unwrap();

        std::fs::write(&path, "title,journal\nOnly one,Cell\n").unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.cleaned(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.height(), 1);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let tmp = tempdir().unwrap();
        let mut cache = TableCache::new();
        let err = cache.cleaned(&tmp.path().join("missing.csv")).err().unwrap();
        assert!(matches!(err, CacheError::Load(LoaderError::Io { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_forces_reload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let mut cache = TableCache::new();
        let first = cache.cleaned(&path).unwrap();
        cache.clear();
        let second = cache.cleaned(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
