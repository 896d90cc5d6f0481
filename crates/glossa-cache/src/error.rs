//! Error types for cache storages

use thiserror::Error;

/// Errors that can occur while reading or writing cache entries
#[derive(Debug, Error)]
pub enum CacheError {
	/// I/O operation on the storage failed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The cached value could not be encoded or decoded
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Atomically moving a freshly written entry into place failed
	#[error("Failed to persist cache entry: {0}")]
	Persist(#[from] tempfile::PersistError),
}

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
