//! Namespaced cache storages for Glossa
//!
//! A [`Cache`] handle stores serializable values in a [`Storage`] backend and
//! ties every value to the files it was derived from. Once one of those
//! files changes, the value is treated as a miss and evicted.
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - process-local map
//! - [`FileStorage`] - one JSON file per entry, survives restarts
//! - [`DevNullStorage`] - stores nothing, disables caching
//!
//! ## Example
//!
//! ```
//! use glossa_cache::{Cache, Dependencies, FileStorage};
//! use std::sync::Arc;
//!
//! # fn main() -> glossa_cache::CacheResult<()> {
//! let dir = tempfile::tempdir()?;
//! let source = dir.path().join("en.yaml");
//! std::fs::write(&source, "name: English\n")?;
//!
//! let storage = Arc::new(FileStorage::new(dir.path().join("cache"))?);
//! let cache = Cache::new(storage, "docs");
//! cache.save("parsed", &vec!["en"], &Dependencies::new().with_file(&source))?;
//! assert_eq!(cache.load::<Vec<String>>("parsed")?, Some(vec!["en".to_string()]));
//!
//! std::fs::write(&source, "name: Anglais\n")?;
//! assert_eq!(cache.load::<Vec<String>>("parsed")?, None);
//! # Ok(())
//! # }
//! ```

mod cache;
mod dependencies;
mod entry;
mod error;
mod file;
mod memory;
mod storage;

pub use cache::Cache;
pub use dependencies::{Dependencies, FileStamp};
pub use entry::CacheEntry;
pub use error::{CacheError, CacheResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use storage::{DevNullStorage, Storage};
