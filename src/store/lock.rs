//! Advisory locking through a sidecar `<file>.lock`.
//!
//! Writers take an exclusive lock for the whole read-modify-write sequence,
//! readers take a shared one. Only processes going through this crate honour
//! the lock.

use crate::error::{Result, StoreError};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Held lock; released when dropped.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release store lock: {}", e);
        }
    }
}

/// `<dir>/<name>.lock` for a store at `<dir>/<name>`.
pub fn lock_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, ".lock")
}

pub(crate) fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

pub fn exclusive(path: &Path) -> Result<LockGuard> {
    let lock = lock_path(path);
    let file = open_lock_file(&lock).map_err(|e| StoreError::Lock {
        path: lock.clone(),
        source: e,
    })?;
    file.lock_exclusive()
        .map_err(|e| StoreError::Lock { path: lock, source: e })?;
    Ok(LockGuard { file })
}

/// Shared lock for readers.
///
/// Returns `None` when the store file is absent, so a read of a missing store
/// leaves no lock file behind, and when the lock file cannot be created next
/// to a readable store (read-only directory or filesystem). Reads then go
/// ahead unlocked.
pub fn shared(path: &Path) -> Result<Option<LockGuard>> {
    if !path.exists() {
        return Ok(None);
    }
    let lock = lock_path(path);
    let file = match open_lock_file(&lock) {
        Ok(file) => file,
        Err(e) if is_unwritable(&e) => {
            log::debug!("Reading {} without a lock: {}: {}", path.display(), lock.display(), e);
            return Ok(None);
        }
        Err(e) => return Err(StoreError::Lock { path: lock, source: e }),
    };
    FileExt::lock_shared(&file).map_err(|e| StoreError::Lock { path: lock, source: e })?;
    Ok(Some(LockGuard { file }))
}

fn is_unwritable(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem | io::ErrorKind::NotFound
    )
}

fn open_lock_file(lock: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock)
}
