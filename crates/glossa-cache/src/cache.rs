//! Namespaced cache handle

use crate::dependencies::Dependencies;
use crate::entry::CacheEntry;
use crate::error::CacheResult;
use crate::storage::Storage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const NAMESPACE_SEPARATOR: &str = "::";

/// Cache bound to one namespace of a shared [`Storage`]
///
/// # Examples
///
/// ```
/// use glossa_cache::{Cache, Dependencies, MemoryStorage};
/// use std::sync::Arc;
///
/// let cache = Cache::new(Arc::new(MemoryStorage::new()), "app.settings");
///
/// cache.save("answer", &42u32, &Dependencies::new()).unwrap();
/// assert_eq!(cache.load::<u32>("answer").unwrap(), Some(42));
/// assert_eq!(cache.load::<u32>("question").unwrap(), None);
/// ```
#[derive(Clone)]
pub struct Cache {
	storage: Arc<dyn Storage>,
	namespace: String,
}

impl Cache {
	/// Create a cache handle for `namespace`
	pub fn new(storage: Arc<dyn Storage>, namespace: impl Into<String>) -> Self {
		Self {
			storage,
			namespace: namespace.into(),
		}
	}

	/// Namespace of this handle
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	fn full_key(&self, key: &str) -> String {
		format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, key)
	}

	/// Load a value
	///
	/// Returns `None` on a miss, when a dependency file changed since the
	/// value was saved, or when the stored value no longer decodes as `T`.
	/// The latter two also drop the entry from the storage.
	pub fn load<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
		let full_key = self.full_key(key);
		let Some(entry) = self.storage.read(&full_key)? else {
			tracing::debug!("Cache miss for {}", full_key);
			return Ok(None);
		};

		if entry.is_stale() {
			tracing::debug!("Cache entry {} is stale, dropping it", full_key);
			self.storage.remove(&full_key)?;
			return Ok(None);
		}

		match serde_json::from_value(entry.value) {
			Ok(value) => {
				tracing::debug!("Cache hit for {}", full_key);
				Ok(Some(value))
			}
			Err(e) => {
				tracing::warn!("Cache entry {} no longer decodes: {}", full_key, e);
				self.storage.remove(&full_key)?;
				Ok(None)
			}
		}
	}

	/// Save a value, invalidated whenever one of `dependencies` changes
	pub fn save<T: Serialize>(
		&self,
		key: &str,
		value: &T,
		dependencies: &Dependencies,
	) -> CacheResult<()> {
		let entry = CacheEntry::new(serde_json::to_value(value)?, dependencies);
		self.storage.write(&self.full_key(key), entry)
	}

	/// Remove a value
	pub fn remove(&self, key: &str) -> CacheResult<()> {
		self.storage.remove(&self.full_key(key))
	}
}

impl std::fmt::Debug for Cache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Cache")
			.field("namespace", &self.namespace)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemoryStorage;
	use rstest::{fixture, rstest};
	use std::collections::BTreeMap;

	#[fixture]
	fn storage() -> Arc<MemoryStorage> {
		Arc::new(MemoryStorage::new())
	}

	#[rstest]
	fn test_namespaces_do_not_collide(storage: Arc<MemoryStorage>) {
		// Arrange
		let first = Cache::new(storage.clone(), "first");
		let second = Cache::new(storage.clone(), "second");

		// Act
		first.save("key", &"one", &Dependencies::new()).unwrap();
		second.save("key", &"two", &Dependencies::new()).unwrap();

		// Assert
		assert_eq!(first.load::<String>("key").unwrap(), Some("one".to_string()));
		assert_eq!(second.load::<String>("key").unwrap(), Some("two".to_string()));
		assert_eq!(storage.len(), 2);
	}

	#[rstest]
	fn test_stale_entry_dropped(storage: Arc<MemoryStorage>) {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("en.yaml");
		std::fs::write(&source, "name: English\n").unwrap();
		let cache = Cache::new(storage.clone(), "ns");
		let mut value = BTreeMap::new();
		value.insert("en".to_string(), "English".to_string());
		cache
			.save("dictionary", &value, &Dependencies::new().with_file(&source))
			.unwrap();
		assert_eq!(
			cache.load::<BTreeMap<String, String>>("dictionary").unwrap(),
			Some(value)
		);

		// Act
		std::fs::write(&source, "name: Anglais\n").unwrap();
		let after_change: Option<BTreeMap<String, String>> = cache.load("dictionary").unwrap();

		// Assert
		assert_eq!(after_change, None);
		assert!(storage.is_empty());
	}

	#[rstest]
	fn test_undecodable_entry_dropped(storage: Arc<MemoryStorage>) {
		let cache = Cache::new(storage.clone(), "ns");
		cache.save("key", &"text", &Dependencies::new()).unwrap();

		let loaded: Option<u64> = cache.load("key").unwrap();

		assert_eq!(loaded, None);
		assert!(storage.is_empty());
	}

	#[rstest]
	fn test_remove(storage: Arc<MemoryStorage>) {
		let cache = Cache::new(storage, "ns");
		cache.save("key", &1u8, &Dependencies::new()).unwrap();

		cache.remove("key").unwrap();

		assert_eq!(cache.load::<u8>("key").unwrap(), None);
	}
}
