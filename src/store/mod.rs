//! Storage layer for pipestore.
//!
//! A store is one pipe-delimited text file. Two front ends share it:
//! - **RecordStore**: every operation returns `Result<T, StoreError>`
//! - **LenientStore**: logs failures and returns empty/absent defaults
//!
//! # Example
//!
//! ```no_run
//! use pipestore::store::RecordStore;
//!
//! let store = RecordStore::new("people.txt");
//! store.append("1|Ana|ana@example.com")?;
//! store.append("2|Luis|luis@example.com")?;
//!
//! assert_eq!(store.find_by_value("Luis")?, Some("2|Luis|luis@example.com".to_string()));
//! store.update("example.com", "example.org")?;
//! store.delete("Ana")?;
//! assert_eq!(store.count_elements()?, 1);
//! # Ok::<(), pipestore::StoreError>(())
//! ```

mod lenient;
mod lines;
mod lock;
mod record_store;
mod rewrite;

pub use lenient::LenientStore;
pub use lines::LineReader;
pub use lock::lock_path;
pub use record_store::RecordStore;
pub use rewrite::temp_path;
