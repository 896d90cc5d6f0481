//! Language file loader
//!
//! Builds a [`Dictionary`] from a directory holding one file per language,
//! named `<code>.<ext>`:
//!
//! ```yaml
//! name: Čeština
//! plural:
//!   form: 2|5
//! translations:
//!   Hello: Ahoj
//!   "%s file": ["%s soubor", "%s soubory", "%s souborů"]
//! ```

use crate::dictionary::{Dictionary, LanguageEntry};
use crate::error::{I18nError, I18nResult};
use glossa_cache::{Cache, CacheResult, Dependencies};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cache namespace holding the parsed dictionary
pub const CACHE_NAMESPACE: &str = "glossa.translator";

/// Cache key of the parsed dictionary inside [`CACHE_NAMESPACE`]
pub const DICTIONARY_CACHE_KEY: &str = "dictionary";

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)").expect("valid number pattern"));

/// Supported language file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
	/// YAML (default), `.yaml` or `.yml`
	#[default]
	Yaml,
	/// JSON, `.json`
	Json,
}

impl DictionaryFormat {
	/// File extensions recognized for this format
	pub fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Yaml => &["yaml", "yml"],
			Self::Json => &["json"],
		}
	}

	/// Determines the format from a file extension
	///
	/// ```
	/// # use glossa_i18n::DictionaryFormat;
	/// assert_eq!(DictionaryFormat::from_extension("yml"), Some(DictionaryFormat::Yaml));
	/// assert_eq!(DictionaryFormat::from_extension("JSON"), Some(DictionaryFormat::Json));
	/// assert_eq!(DictionaryFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"yaml" | "yml" => Some(Self::Yaml),
			"json" => Some(Self::Json),
			_ => None,
		}
	}

	fn decode(&self, content: &str) -> Result<LanguageEntry, DecodeFailure> {
		match self {
			Self::Yaml => serde_yaml::from_str(content).map_err(|e| DecodeFailure {
				line: e.location().map(|location| location.line()),
				source: Box::new(e),
			}),
			Self::Json => serde_json::from_str(content).map_err(|e| DecodeFailure {
				line: Some(e.line()).filter(|line| *line > 0),
				source: Box::new(e),
			}),
		}
	}
}

impl std::fmt::Display for DictionaryFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Yaml => write!(f, "YAML"),
			Self::Json => write!(f, "JSON"),
		}
	}
}

struct DecodeFailure {
	line: Option<usize>,
	source: crate::error::DecodeError,
}

/// Loads every language file found directly under a root directory
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
	root: PathBuf,
	format: DictionaryFormat,
}

impl DictionaryLoader {
	/// Loader for YAML files under `root`
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			format: DictionaryFormat::default(),
		}
	}

	/// Use another file format
	pub fn with_format(mut self, format: DictionaryFormat) -> Self {
		self.format = format;
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn format(&self) -> DictionaryFormat {
		self.format
	}

	/// Language files directly under the root, sorted by path
	///
	/// # Errors
	///
	/// Returns [`I18nError::Io`] if the root is not a readable directory.
	pub fn language_files(&self) -> I18nResult<Vec<PathBuf>> {
		std::fs::read_dir(&self.root)?;

		let escaped_root = glob::Pattern::escape(&self.root.to_string_lossy());
		let mut files = Vec::new();
		for ext in self.format.extensions() {
			let pattern = format!("{}/*.{}", escaped_root, ext);
			let paths = glob::glob(&pattern)
				.map_err(|e| I18nError::Settings(format!("invalid locale directory: {}", e)))?;
			for path in paths {
				let path = path.map_err(std::io::Error::from)?;
				if path.is_file() {
					files.push(path);
				}
			}
		}
		files.sort();
		Ok(files)
	}

	/// Parse one language file
	///
	/// # Errors
	///
	/// Returns [`I18nError::DictionaryParse`] with the language code, the
	/// absolute file path and, when known, the line of the first error.
	pub fn parse_file(&self, path: &Path) -> I18nResult<(String, LanguageEntry)> {
		let language = language_code(path).unwrap_or_default();
		let content = std::fs::read_to_string(path)?;

		match self.format.decode(&content) {
			Ok(entry) => Ok((language, entry)),
			Err(failure) => {
				let line = failure
					.line
					.or_else(|| first_number(&failure.source.to_string()));
				Err(I18nError::DictionaryParse {
					language,
					path: absolute_path(path),
					line,
					source: failure.source,
				})
			}
		}
	}

	/// Build the dictionary from every language file
	///
	/// # Errors
	///
	/// Fails on the first file that does not parse, or when two files
	/// resolve to the same language code (`en.yaml` and `en.yml`).
	pub fn build(&self) -> I18nResult<Dictionary> {
		let mut dictionary = Dictionary::new();
		let mut sources: HashMap<String, PathBuf> = HashMap::new();

		for path in self.language_files()? {
			let (language, entry) = self.parse_file(&path)?;
			if let Some(first) = sources.get(&language) {
				return Err(I18nError::DuplicateLanguage {
					language,
					first: first.clone(),
					second: path,
				});
			}
			sources.insert(language.clone(), path);
			dictionary.insert(language, entry);
		}

		tracing::debug!(
			"Built dictionary with {} language(s) from {}",
			dictionary.len(),
			self.root.display()
		);
		Ok(dictionary)
	}
}

/// Language code of a language file: its name without directory and extension
///
/// ```
/// # use glossa_i18n::loader::language_code;
/// # use std::path::Path;
/// assert_eq!(language_code(Path::new("/srv/locale/pt_BR.yaml")).as_deref(), Some("pt_BR"));
/// ```
pub fn language_code(path: &Path) -> Option<String> {
	path.file_stem()
		.and_then(|stem| stem.to_str())
		.map(str::to_string)
}

fn absolute_path(path: &Path) -> PathBuf {
	path.canonicalize()
		.or_else(|_| std::path::absolute(path))
		.unwrap_or_else(|_| path.to_path_buf())
}

fn first_number(message: &str) -> Option<usize> {
	FIRST_NUMBER
		.captures(message)
		.and_then(|caps| caps.get(1))
		.and_then(|m| m.as_str().parse().ok())
}

/// Load the cached dictionary, if a fresh one is stored
pub fn load_cached_dictionary(cache: &Cache) -> CacheResult<Option<Dictionary>> {
	cache.load(DICTIONARY_CACHE_KEY)
}

/// Store a dictionary, invalidated when any of `sources` changes
pub fn store_cached_dictionary(
	cache: &Cache,
	dictionary: &Dictionary,
	sources: &[PathBuf],
) -> CacheResult<()> {
	cache.save(
		DICTIONARY_CACHE_KEY,
		dictionary,
		&Dependencies::new().with_files(sources.iter().cloned()),
	)
}
