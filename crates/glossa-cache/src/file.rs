//! File system storage implementation

use crate::entry::CacheEntry;
use crate::error::CacheResult;
use crate::storage::Storage;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const ENTRY_EXTENSION: &str = "cache";

/// Storage keeping one JSON file per entry inside a directory
///
/// File names are derived from a SHA-256 of the key, so arbitrary keys
/// never escape the directory. Entries survive process restarts.
#[derive(Debug, Clone)]
pub struct FileStorage {
	directory: PathBuf,
}

impl FileStorage {
	/// Open (and create if needed) a storage rooted at `directory`
	pub fn new(directory: impl Into<PathBuf>) -> CacheResult<Self> {
		let directory = directory.into();
		fs::create_dir_all(&directory)?;
		Ok(Self { directory })
	}

	/// Root directory of this storage
	pub fn directory(&self) -> &Path {
		&self.directory
	}

	fn entry_path(&self, key: &str) -> PathBuf {
		let digest = hex::encode(Sha256::digest(key.as_bytes()));
		self.directory
			.join(format!("_{}.{}", digest, ENTRY_EXTENSION))
	}
}

impl Storage for FileStorage {
	fn read(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
		let path = self.entry_path(key);
		let content = match fs::read(&path) {
			Ok(content) => content,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};

		match serde_json::from_slice(&content) {
			Ok(entry) => Ok(Some(entry)),
			Err(e) => {
				tracing::warn!(
					"Discarding corrupt cache file {}: {}",
					path.display(),
					e
				);
				self.remove(key)?;
				Ok(None)
			}
		}
	}

	fn write(&self, key: &str, entry: CacheEntry) -> CacheResult<()> {
		let content = serde_json::to_vec(&entry)?;
		let mut file = tempfile::NamedTempFile::new_in(&self.directory)?;
		file.write_all(&content)?;
		file.persist(self.entry_path(key))?;
		Ok(())
	}

	fn remove(&self, key: &str) -> CacheResult<()> {
		match fs::remove_file(self.entry_path(key)) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}

	fn clear(&self) -> CacheResult<()> {
		for dir_entry in fs::read_dir(&self.directory)? {
			let path = dir_entry?.path();
			if path.extension().and_then(|ext| ext.to_str()) == Some(ENTRY_EXTENSION) {
				fs::remove_file(&path)?;
			}
		}
		Ok(())
	}
}
