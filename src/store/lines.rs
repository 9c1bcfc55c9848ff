//! Sequential line reading over a store file.

use crate::error::{Result, StoreError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Iterator over the lines of a store file, tagging failures with the
/// operation name and 1-indexed line number.
///
/// Both `\n` and `\r\n` terminators are stripped.
pub struct LineReader {
    op: &'static str,
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl LineReader {
    pub fn open(op: &'static str, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| StoreError::io(op, path, e))?;
        Ok(Self {
            op,
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for LineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.lines.next()?;
        self.line_no += 1;
        Some(next.map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                StoreError::NotUtf8 {
                    path: self.path.clone(),
                    line: self.line_no,
                }
            } else {
                StoreError::io(self.op, &self.path, e)
            }
        }))
    }
}

/// Read every line of the file into memory.
pub fn read_lines(op: &'static str, path: &Path) -> Result<Vec<String>> {
    LineReader::open(op, path)?.collect()
}
