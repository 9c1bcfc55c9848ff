//! Whole-file rewrite for update, delete, and clear.
//!
//! With `atomic` set the new content goes to a sibling `<file>.tmp` which is
//! fsynced and renamed over the original, so a crash mid-write leaves either
//! the old or the new file. Without it the file is truncated in place.

use crate::config::LineEnding;
use crate::error::{Result, StoreError};
use crate::store::lock::sibling_with_suffix;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// `<dir>/<name>.tmp` for a store at `<dir>/<name>`.
pub fn temp_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, ".tmp")
}

/// Replace the contents of `path` with `lines`, one terminator after each.
///
/// A symlinked store is rewritten at its target, and an existing file keeps
/// its permissions.
pub fn write_lines<S: AsRef<str>>(
    op: &'static str,
    path: &Path,
    lines: &[S],
    ending: LineEnding,
    atomic: bool,
) -> Result<()> {
    if !atomic {
        return write_to(op, path, lines, ending);
    }

    let target = resolve_target(op, path)?;
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(StoreError::io(op, &target, e)),
    };

    let tmp = temp_path(&target);
    if tmp.exists() {
        log::warn!("Replacing stale temp file: {}", tmp.display());
    }

    let result = write_to(op, &tmp, lines, ending)
        .and_then(|()| match permissions {
            Some(perms) => fs::set_permissions(&tmp, perms).map_err(|e| StoreError::io(op, &tmp, e)),
            None => Ok(()),
        })
        .and_then(|()| fs::rename(&tmp, &target).map_err(|e| StoreError::io(op, &target, e)));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// The real file behind `path`; `path` itself when it does not exist yet.
fn resolve_target(op: &'static str, path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => {
            if resolved != path {
                log::debug!("Rewriting {} through {}", path.display(), resolved.display());
            }
            Ok(resolved)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(StoreError::io(op, path, e)),
    }
}

fn write_to<S: AsRef<str>>(op: &'static str, path: &Path, lines: &[S], ending: LineEnding) -> Result<()> {
    let io_err = |e| StoreError::io(op, path, e);

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(io_err)?;
        writer.write_all(ending.as_str().as_bytes()).map_err(io_err)?;
    }
    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;
    Ok(())
}
