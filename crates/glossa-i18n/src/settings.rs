//! Translator settings
//!
//! Settings are read from TOML:
//!
//! ```toml
//! locale_dir = "locale"
//! default_language = "en"
//! format = "yaml"
//!
//! [cache]
//! backend = "file"
//! directory = "var/cache"
//! ```
//!
//! `GLOSSA_LOCALE_DIR` and `GLOSSA_LANGUAGE` override the locale directory
//! and the default language when [`TranslatorSettings::apply_env_overrides`]
//! is called.

use crate::error::{I18nError, I18nResult};
use crate::loader::{DictionaryFormat, DictionaryLoader};
use glossa_cache::{DevNullStorage, FileStorage, MemoryStorage, Storage};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding [`TranslatorSettings::locale_dir`]
pub const LOCALE_DIR_ENV: &str = "GLOSSA_LOCALE_DIR";
/// Environment variable overriding [`TranslatorSettings::default_language`]
pub const LANGUAGE_ENV: &str = "GLOSSA_LANGUAGE";

/// Where the parsed dictionary is cached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
	/// Process-local memory
	#[default]
	Memory,
	/// One file per entry in a directory
	File,
	/// No caching
	None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
	#[serde(default)]
	pub backend: CacheBackend,
	/// Required for [`CacheBackend::File`]
	#[serde(default)]
	pub directory: Option<PathBuf>,
}

impl CacheSettings {
	/// Open the configured storage
	///
	/// # Errors
	///
	/// Returns [`I18nError::Settings`] for a file backend without a
	/// directory and [`I18nError::Cache`] if the directory cannot be created.
	pub fn build_storage(&self) -> I18nResult<Arc<dyn Storage>> {
		match self.backend {
			CacheBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
			CacheBackend::None => Ok(Arc::new(DevNullStorage::new())),
			CacheBackend::File => {
				let directory = self.directory.as_ref().ok_or_else(|| {
					I18nError::Settings(
						"cache backend 'file' requires a cache directory".to_string(),
					)
				})?;
				Ok(Arc::new(FileStorage::new(directory)?))
			}
		}
	}
}

/// Settings for [`Translator::from_settings`](crate::Translator::from_settings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorSettings {
	/// Directory holding one file per language
	pub locale_dir: PathBuf,
	pub default_language: String,
	#[serde(default)]
	pub format: DictionaryFormat,
	#[serde(default)]
	pub cache: CacheSettings,
}

impl TranslatorSettings {
	/// Settings with YAML files and an in-memory cache
	pub fn new(locale_dir: impl Into<PathBuf>, default_language: impl Into<String>) -> Self {
		Self {
			locale_dir: locale_dir.into(),
			default_language: default_language.into(),
			format: DictionaryFormat::default(),
			cache: CacheSettings::default(),
		}
	}

	/// Parse settings from TOML text
	pub fn from_toml_str(content: &str) -> I18nResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> I18nResult<Self> {
		let content = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Apply `GLOSSA_LOCALE_DIR` and `GLOSSA_LANGUAGE`, ignoring unset or empty values
	pub fn apply_env_overrides(mut self) -> Self {
		if let Some(dir) = non_empty_var(LOCALE_DIR_ENV) {
			self.locale_dir = PathBuf::from(dir);
		}
		if let Some(lang) = non_empty_var(LANGUAGE_ENV) {
			self.default_language = lang;
		}
		self
	}

	/// Loader for the configured directory and format
	pub fn loader(&self) -> DictionaryLoader {
		DictionaryLoader::new(&self.locale_dir).with_format(self.format)
	}
}

fn non_empty_var(name: &str) -> Option<String> {
	env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;
	use tempfile::TempDir;

	#[rstest]
	fn test_from_toml_str_full() {
		// Arrange
		let content = r#"
locale_dir = "app/locale"
default_language = "cs"
format = "json"

[cache]
backend = "file"
directory = "var/cache"
"#;

		// Act
		let settings = TranslatorSettings::from_toml_str(content).unwrap();

		// Assert
		assert_eq!(settings.locale_dir, PathBuf::from("app/locale"));
		assert_eq!(settings.default_language, "cs");
		assert_eq!(settings.format, DictionaryFormat::Json);
		assert_eq!(settings.cache.backend, CacheBackend::File);
		assert_eq!(settings.cache.directory, Some(PathBuf::from("var/cache")));
	}

	#[rstest]
	fn test_from_toml_str_defaults() {
		let settings =
			TranslatorSettings::from_toml_str("locale_dir = \"locale\"\ndefault_language = \"en\"\n")
				.unwrap();

		assert_eq!(settings, TranslatorSettings::new("locale", "en"));
		assert_eq!(settings.format, DictionaryFormat::Yaml);
		assert_eq!(settings.cache.backend, CacheBackend::Memory);
	}

	#[rstest]
	#[case("default_language = \"en\"\n")]
	#[case("locale_dir = \"locale\"\ndefault_language = \"en\"\nformat = \"xml\"\n")]
	#[case("locale_dir = \"locale\"\ndefault_language = \"en\"\n[cache]\nbackend = \"redis\"\n")]
	fn test_from_toml_str_rejects_invalid(#[case] content: &str) {
		assert!(matches!(
			TranslatorSettings::from_toml_str(content),
			Err(I18nError::Settings(_))
		));
	}

	#[rstest]
	fn test_from_file() {
		// Arrange
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("glossa.toml");
		let mut file = std::fs::File::create(&path).unwrap();
		writeln!(file, "locale_dir = \"locale\"\ndefault_language = \"de\"").unwrap();

		// Act
		let settings = TranslatorSettings::from_file(&path).unwrap();

		// Assert
		assert_eq!(settings.default_language, "de");
	}

	#[rstest]
	fn test_from_missing_file() {
		let temp_dir = TempDir::new().unwrap();

		let result = TranslatorSettings::from_file(temp_dir.path().join("missing.toml"));

		assert!(matches!(result, Err(I18nError::Io(_))));
	}

	#[rstest]
	#[serial]
	fn test_env_overrides() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var(LOCALE_DIR_ENV, "/srv/locale");
			env::set_var(LANGUAGE_ENV, "fr");
		}

		let settings = TranslatorSettings::new("locale", "en").apply_env_overrides();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::remove_var(LOCALE_DIR_ENV);
			env::remove_var(LANGUAGE_ENV);
		}

		assert_eq!(settings.locale_dir, PathBuf::from("/srv/locale"));
		assert_eq!(settings.default_language, "fr");
	}

	#[rstest]
	#[serial]
	fn test_empty_env_values_ignored() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var(LOCALE_DIR_ENV, "");
			env::remove_var(LANGUAGE_ENV);
		}

		let settings = TranslatorSettings::new("locale", "en").apply_env_overrides();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::remove_var(LOCALE_DIR_ENV);
		}

		assert_eq!(settings, TranslatorSettings::new("locale", "en"));
	}

	#[rstest]
	fn test_build_file_storage_requires_directory() {
		let settings = CacheSettings {
			backend: CacheBackend::File,
			directory: None,
		};

		assert!(matches!(
			settings.build_storage(),
			Err(I18nError::Settings(_))
		));
	}

	#[rstest]
	fn test_build_file_storage_creates_directory() {
		// Arrange
		let temp_dir = TempDir::new().unwrap();
		let directory = temp_dir.path().join("cache");
		let settings = CacheSettings {
			backend: CacheBackend::File,
			directory: Some(directory.clone()),
		};

		// Act
		let storage = settings.build_storage();

		// Assert
		assert!(storage.is_ok());
		assert!(directory.is_dir());
	}

	#[rstest]
	#[case(CacheBackend::Memory)]
	#[case(CacheBackend::None)]
	fn test_build_storage_without_directory(#[case] backend: CacheBackend) {
		let settings = CacheSettings {
			backend,
			directory: None,
		};

		assert!(settings.build_storage().is_ok());
	}

	#[rstest]
	fn test_loader_uses_settings() {
		let mut settings = TranslatorSettings::new("locale", "en");
		settings.format = DictionaryFormat::Json;

		let loader = settings.loader();

		assert_eq!(loader.root(), Path::new("locale"));
		assert_eq!(loader.format(), DictionaryFormat::Json);
	}
}
