//! Record type for pipe-delimited store lines.
//!
//! A record is one line of the store file split on the literal `|`. There is
//! no escaping: a field that contains `|` becomes two fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field delimiter within a line.
pub const DELIMITER: char = '|';

/// One line of the store, as an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Split a line into fields, keeping empty and trailing empty fields.
    ///
    /// `"a|b|"` gives `["a", "b", ""]` rather than dropping the trailing empty
    /// field, so field positions stay stable and `""` is a findable value.
    pub fn parse(line: &str) -> Self {
        Self {
            fields: split_fields(line).map(str::to_string).collect(),
        }
    }

    /// Build a record from already separated fields.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Join the fields back into a store line.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DELIMITER)?;
            }
            f.write_str(field)?;
        }
        Ok(())
    }
}

impl From<&str> for Record {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

impl From<Record> for Vec<String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Iterate over the fields of a raw line without allocating.
pub fn split_fields(line: &str) -> std::str::Split<'_, char> {
    line.split(DELIMITER)
}

/// True when some field of `line` equals `target` exactly.
pub fn has_field(line: &str, target: &str) -> bool {
    split_fields(line).any(|field| field == target)
}
