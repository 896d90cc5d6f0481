//! Storage backend trait

use crate::entry::CacheEntry;
use crate::error::CacheResult;

/// Raw key/value backend behind a [`Cache`](crate::Cache)
///
/// Storages know nothing about namespaces or staleness; the cache handle
/// builds the full key and decides whether an entry may be served.
pub trait Storage: Send + Sync {
	/// Read an entry, `None` if the key is unknown
	fn read(&self, key: &str) -> CacheResult<Option<CacheEntry>>;

	/// Store an entry, replacing any previous one
	fn write(&self, key: &str, entry: CacheEntry) -> CacheResult<()>;

	/// Delete an entry; deleting an unknown key is not an error
	fn remove(&self, key: &str) -> CacheResult<()>;

	/// Delete every entry
	fn clear(&self) -> CacheResult<()>;
}

/// Storage that never keeps anything
///
/// Useful to disable caching without changing the consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevNullStorage;

impl DevNullStorage {
	pub fn new() -> Self {
		Self
	}
}

impl Storage for DevNullStorage {
	fn read(&self, _key: &str) -> CacheResult<Option<CacheEntry>> {
		Ok(None)
	}

	fn write(&self, _key: &str, _entry: CacheEntry) -> CacheResult<()> {
		Ok(())
	}

	fn remove(&self, _key: &str) -> CacheResult<()> {
		Ok(())
	}

	fn clear(&self) -> CacheResult<()> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Dependencies;
	use rstest::rstest;

	#[rstest]
	fn test_dev_null_always_misses() {
		let storage = DevNullStorage::new();
		let entry = CacheEntry::new(serde_json::json!("value"), &Dependencies::new());

		storage.write("key", entry).unwrap();

		assert_eq!(storage.read("key").unwrap(), None);
	}
}
