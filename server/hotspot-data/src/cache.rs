//! Parsed-file cache keyed on path + modification time + length.
//!
//! Owned by the caller (the dashboard holds one per data source); the engine never sees it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::DataError;

/// Identity of a file's contents as far as the filesystem reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
  pub modified: Option<SystemTime>,
  pub len: u64,
}

impl FileStamp {
  pub fn of(path: &Path) -> Result<Self, DataError> {
    let meta = std::fs::metadata(path).map_err(|e| DataError::io(path, e))?;
    Ok(Self {
      modified: meta.modified().ok(),
      len: meta.len(),
    })
  }
}

#[derive(Debug)]
struct Entry<T> {
  stamp: FileStamp,
  value: Arc<T>,
}

#[derive(Debug)]
pub struct RecordCache<T> {
  entries: HashMap<PathBuf, Entry<T>>,
  loads: u64,
}

impl<T> Default for RecordCache<T> {
  fn default() -> Self {
    Self {
      entries: HashMap::new(),
      loads: 0,
    }
  }
}

impl<T> RecordCache<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the cached value if the file is unchanged, otherwise (re)load it.
  ///
  /// A failed load leaves any previous entry in place.
  pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<Arc<T>, DataError>
  where
    F: FnOnce(&Path) -> Result<T, DataError>,
  {
    let stamp = FileStamp::of(path)?;
    if let Some(entry) = self.entries.get(path) {
      if entry.stamp == stamp {
        return Ok(Arc::clone(&entry.value));
      }
      tracing::debug!(file = %path.display(), "file changed, reloading");
    }

    let value = Arc::new(load(path)?);
    self.loads += 1;
    self.entries.insert(
      path.to_path_buf(),
      Entry {
        stamp,
        value: Arc::clone(&value),
      },
    );
    Ok(value)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Number of times a loader actually ran.
  pub fn loads(&self) -> u64 {
    self.loads
  }
}
