//! Cache entry structure

use crate::dependencies::{Dependencies, FileStamp};
use serde::{Deserialize, Serialize};

/// Cache entry with file-based invalidation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
	pub value: serde_json::Value,
	#[serde(default)]
	pub files: Vec<FileStamp>,
}

impl CacheEntry {
	/// Wrap a value, fingerprinting every dependency file now
	pub fn new(value: serde_json::Value, dependencies: &Dependencies) -> Self {
		Self {
			value,
			files: dependencies.stamp(),
		}
	}

	/// Whether any dependency file changed since the entry was created
	pub fn is_stale(&self) -> bool {
		self.files.iter().any(FileStamp::has_changed)
	}
}
