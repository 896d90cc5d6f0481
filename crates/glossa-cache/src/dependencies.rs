//! File dependencies attached to cache entries

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Files a cache entry was derived from
///
/// When any of these files changes after the entry was saved, the entry
/// is considered stale and is never served again.
///
/// # Examples
///
/// ```
/// use glossa_cache::Dependencies;
///
/// let deps = Dependencies::new().with_files(["locale/en.yaml", "locale/cs.yaml"]);
/// assert_eq!(deps.files().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
	files: Vec<PathBuf>,
}

impl Dependencies {
	/// Create an empty dependency set
	pub fn new() -> Self {
		Self::default()
	}

	/// Add files the entry depends on
	pub fn with_files<I, P>(mut self, files: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.files.extend(files.into_iter().map(Into::into));
		self
	}

	/// Add a single file the entry depends on
	pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
		self.files.push(file.into());
		self
	}

	/// Get the tracked files
	pub fn files(&self) -> &[PathBuf] {
		&self.files
	}

	/// Snapshot the current state of every tracked file
	pub(crate) fn stamp(&self) -> Vec<FileStamp> {
		self.files.iter().map(|path| FileStamp::capture(path)).collect()
	}
}

/// Content fingerprint of one dependency file at save time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStamp {
	pub path: PathBuf,
	/// Hex SHA-256 of the file content, `None` if the file could not be read
	pub checksum: Option<String>,
}

impl FileStamp {
	/// Fingerprint `path` as it is right now
	pub fn capture(path: &Path) -> Self {
		Self {
			path: path.to_path_buf(),
			checksum: file_checksum(path),
		}
	}

	/// Whether the file no longer matches the recorded fingerprint
	pub fn has_changed(&self) -> bool {
		file_checksum(&self.path) != self.checksum
	}
}

fn file_checksum(path: &Path) -> Option<String> {
	let content = std::fs::read(path).ok()?;
	Some(hex::encode(Sha256::digest(&content)))
}
