//! In-memory storage implementation

use crate::entry::CacheEntry;
use crate::error::CacheResult;
use crate::storage::Storage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory storage backend
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	store: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryStorage {
	/// Create an empty in-memory storage
	///
	/// # Examples
	///
	/// ```
	/// use glossa_cache::{MemoryStorage, Storage};
	///
	/// let storage = MemoryStorage::new();
	/// assert!(storage.is_empty());
	/// assert_eq!(storage.read("missing").unwrap(), None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored entries, stale ones included
	pub fn len(&self) -> usize {
		self.store.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.read().is_empty()
	}

	/// List all keys currently stored
	pub fn keys(&self) -> Vec<String> {
		self.store.read().keys().cloned().collect()
	}
}

impl Storage for MemoryStorage {
	fn read(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
		Ok(self.store.read().get(key).cloned())
	}

	fn write(&self, key: &str, entry: CacheEntry) -> CacheResult<()> {
		self.store.write().insert(key.to_string(), entry);
		Ok(())
	}

	fn remove(&self, key: &str) -> CacheResult<()> {
		self.store.write().remove(key);
		Ok(())
	}

	fn clear(&self) -> CacheResult<()> {
		self.store.write().clear();
		Ok(())
	}
}
