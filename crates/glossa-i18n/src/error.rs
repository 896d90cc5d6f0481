//! Error types for the i18n crate

use glossa_cache::CacheError;
use std::path::PathBuf;
use thiserror::Error;

/// Underlying decoder error of a language file
pub type DecodeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or accepting a dictionary
///
/// Translating never fails; every variant here is raised while a
/// translator is being constructed.
#[derive(Debug, Error)]
pub enum I18nError {
	/// A language file is not in the expected format
	#[error(
		"Translation file '{}' for language '{language}' is not in correct format{}: {source}",
		.path.display(),
		.line.map(|l| format!(" (line {l})")).unwrap_or_default()
	)]
	DictionaryParse {
		/// Language code derived from the file name
		language: String,
		/// Absolute path of the offending file
		path: PathBuf,
		/// 1-based line of the first structural error, when known
		line: Option<usize>,
		/// Decoder error
		#[source]
		source: DecodeError,
	},

	/// A plural translation has fewer variants than its language's rule can select
	#[error(
		"Plural translation '{key}' in language '{language}' has {found} variant(s), expected at least {expected}"
	)]
	MalformedPluralData {
		language: String,
		key: String,
		expected: usize,
		found: usize,
	},

	/// Two files map to the same language code
	#[error(
		"Language '{language}' is defined by both '{}' and '{}'",
		.first.display(),
		.second.display()
	)]
	DuplicateLanguage {
		language: String,
		first: PathBuf,
		second: PathBuf,
	},

	/// I/O operation failed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Settings could not be decoded or are inconsistent
	#[error("Settings error: {0}")]
	Settings(String),

	/// Cache storage could not be opened
	#[error("Cache error: {0}")]
	Cache(#[from] CacheError),
}

/// Result type alias for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<toml::de::Error> for I18nError {
	fn from(error: toml::de::Error) -> Self {
		I18nError::Settings(error.to_string())
	}
}
