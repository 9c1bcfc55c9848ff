//! pipestore - a flat-file record store
//!
//! Records are lines of a text file, fields separated by `|`. The store
//! appends, reads, searches, rewrites and counts lines with a full scan per
//! call and keeps no state besides the file path.

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::{LineEnding, StoreOptions};
pub use error::{Result, StoreError};
pub use record::Record;
pub use store::{LenientStore, RecordStore};
