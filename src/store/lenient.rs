//! Swallow-and-log facade over [`RecordStore`].
//!
//! Each failure is logged at error level and turned into a default value:
//! empty, `None`, `0`, or `false`. Callers cannot tell a missing file from an
//! empty one or from a value that is not present.

use crate::error::Result;
use crate::record::Record;
use crate::store::RecordStore;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LenientStore {
    inner: RecordStore,
}

impl LenientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: RecordStore::new(path),
        }
    }

    /// The strict store underneath, for callers that want the error.
    pub fn inner(&self) -> &RecordStore {
        &self.inner
    }

    /// Returns `true` when the line was written.
    pub fn append(&self, line: &str) -> bool {
        logged("Error writing to the file", self.inner.append(line)).is_some()
    }

    pub fn append_record(&self, record: &Record) -> bool {
        logged("Error writing to the file", self.inner.append_record(record)).is_some()
    }

    pub fn read_all(&self) -> Vec<Record> {
        logged("Error reading the file", self.inner.read_all()).unwrap_or_default()
    }

    pub fn read_last_line(&self) -> Option<String> {
        logged("Error reading the file", self.inner.read_last_line()).flatten()
    }

    pub fn find_by_value(&self, target: &str) -> Option<String> {
        logged("Error searching the file", self.inner.find_by_value(target)).flatten()
    }

    /// Returns `true` when the rewrite completed, whether or not a line matched.
    pub fn update(&self, old: &str, new: &str) -> bool {
        logged("Error updating the file", self.inner.update(old, new)).is_some()
    }

    pub fn delete(&self, value: &str) -> bool {
        logged("Error deleting from the file", self.inner.delete(value)).is_some()
    }

    pub fn count_elements(&self) -> usize {
        logged("Error counting elements in the file", self.inner.count_elements()).unwrap_or(0)
    }

    pub fn clear(&self) -> bool {
        logged("Error clearing the file", self.inner.clear()).is_some()
    }
}

impl From<RecordStore> for LenientStore {
    fn from(inner: RecordStore) -> Self {
        Self { inner }
    }
}

fn logged<T>(context: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{}: {}", context, e);
            None
        }
    }
}
