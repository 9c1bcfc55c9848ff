//! RecordStore: line-oriented operations over a pipe-delimited text file.
//!
//! Every call opens and closes the file; nothing is cached between calls.
//! Reads scan the whole file. Update, delete and clear buffer the full
//! content in memory and rewrite the file (see `rewrite`).

use crate::config::StoreOptions;
use crate::error::{Result, StoreError};
use crate::record::{Record, has_field};
use crate::store::lines::{LineReader, read_lines};
use crate::store::{lock, rewrite};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A record store addressed by a single file path.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    options: StoreOptions,
}

impl RecordStore {
    /// Create a store for `path` with default options. The file is not touched.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Append one line, creating the file if it does not exist.
    pub fn append(&self, line: &str) -> Result<()> {
        let _guard = self.write_lock()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io("append", &self.path, e))?;

        // Single write so concurrent appenders never interleave within a line
        let mut buf = String::with_capacity(line.len() + 2);
        buf.push_str(line);
        buf.push_str(self.options.line_ending.as_str());
        file.write_all(buf.as_bytes())
            .map_err(|e| StoreError::io("append", &self.path, e))?;

        log::debug!("Appended {} bytes to {}", buf.len(), self.path.display());
        Ok(())
    }

    /// Append a record as its `|`-joined line.
    pub fn append_record(&self, record: &Record) -> Result<()> {
        self.append(&record.to_line())
    }

    /// Read every line, split into fields, in file order.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let _guard = self.read_lock()?;
        let records = LineReader::open("read_all", &self.path)?
            .map(|line| line.map(|l| Record::parse(&l)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// The final line of the file, or `None` if it is empty.
    pub fn read_last_line(&self) -> Result<Option<String>> {
        let _guard = self.read_lock()?;
        let mut last = None;
        for line in LineReader::open("read_last_line", &self.path)? {
            last = Some(line?);
        }
        Ok(last)
    }

    /// The first line having a field exactly equal to `target`.
    ///
    /// A field that merely contains `target` does not match.
    pub fn find_by_value(&self, target: &str) -> Result<Option<String>> {
        let _guard = self.read_lock()?;
        for line in LineReader::open("find_by_value", &self.path)? {
            let line = line?;
            if has_field(&line, target) {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Replace every occurrence of `old` with `new` in every line containing it.
    ///
    /// Matching is by substring, across field boundaries. Lines without `old`
    /// are written back unchanged and order is preserved. Returns the number
    /// of lines changed; the file is not rewritten when that is zero.
    pub fn update(&self, old: &str, new: &str) -> Result<usize> {
        let _guard = self.write_lock()?;
        let mut lines = read_lines("update", &self.path)?;

        let mut changed = 0;
        for line in lines.iter_mut().filter(|l| l.contains(old)) {
            *line = line.replace(old, new);
            changed += 1;
        }

        if changed > 0 {
            self.rewrite("update", &lines)?;
        }
        log::debug!("Updated {} lines in {}", changed, self.path.display());
        Ok(changed)
    }

    /// Remove every line containing `value` as a substring.
    ///
    /// Survivors keep their relative order. Returns the number of lines
    /// removed; the file is not rewritten when that is zero.
    pub fn delete(&self, value: &str) -> Result<usize> {
        let _guard = self.write_lock()?;
        let lines = read_lines("delete", &self.path)?;
        let before = lines.len();

        let survivors: Vec<String> = lines.into_iter().filter(|l| !l.contains(value)).collect();
        let removed = before - survivors.len();

        if removed > 0 {
            self.rewrite("delete", &survivors)?;
        }
        log::debug!("Deleted {} lines from {}", removed, self.path.display());
        Ok(removed)
    }

    /// Number of lines in the file.
    pub fn count_elements(&self) -> Result<usize> {
        let _guard = self.read_lock()?;
        let mut count = 0;
        for line in LineReader::open("count_elements", &self.path)? {
            line?;
            count += 1;
        }
        Ok(count)
    }

    /// Truncate the file to zero length, creating it if absent.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock()?;
        let none: [&str; 0] = [];
        self.rewrite("clear", &none)?;
        log::debug!("Cleared {}", self.path.display());
        Ok(())
    }

    fn rewrite<S: AsRef<str>>(&self, op: &'static str, lines: &[S]) -> Result<()> {
        rewrite::write_lines(
            op,
            &self.path,
            lines,
            self.options.line_ending,
            self.options.atomic_rewrite,
        )
    }

    fn write_lock(&self) -> Result<Option<lock::LockGuard>> {
        if !self.options.lock {
            return Ok(None);
        }
        lock::exclusive(&self.path).map(Some)
    }

    fn read_lock(&self) -> Result<Option<lock::LockGuard>> {
        if !self.options.lock {
            return Ok(None);
        }
        lock::shared(&self.path)
    }
}
