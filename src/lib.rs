//! # Glossa
//!
//! Dictionary-backed message translation.
//!
//! Glossa loads one language file per language from a locale directory,
//! caches the parsed dictionary until one of the files changes, and
//! translates messages with plural forms, printf-style parameters and a
//! trailing-punctuation fallback.
//!
//! ## Crates
//!
//! - [`glossa_i18n`] - dictionary, loader, plural rules and the [`Translator`]
//! - `glossa_cache` - cache handle and storage backends (`cache` feature)
//!
//! ## Quick Example
//!
//! ```
//! use glossa::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locale = tempfile::tempdir()?;
//! std::fs::write(
//! 	locale.path().join("de.yaml"),
//! 	"name: Deutsch\ntranslations:\n  Welcome: Willkommen\n  \"Hi %s\": Hallo %s\n",
//! )?;
//!
//! let mut translator = Translator::new(locale.path(), "de", Arc::new(MemoryStorage::new()))?;
//! assert_eq!(translator.translate("Welcome!"), "Willkommen!");
//! assert_eq!(translator.translate(Message::with_params("Hi %s", ["Ada"])), "Hallo Ada");
//!
//! translator.set_lang("fr");
//! assert_eq!(translator.translate("Welcome!"), "Welcome!");
//! # Ok(())
//! # }
//! ```

pub use glossa_i18n::{
	CacheBackend, CacheSettings, Dictionary, DictionaryFormat, DictionaryLoader, I18nError,
	I18nResult, LanguageEntry, Message, Param, PluralRule, Translation, Translator,
	TranslatorSettings,
};
pub use glossa_i18n::format::vsprintf;

// Re-export cache (cache feature)
#[cfg(feature = "cache")]
pub use glossa_cache::{
	Cache, CacheError, CacheResult, Dependencies, DevNullStorage, FileStorage, MemoryStorage,
	Storage,
};

#[cfg(feature = "cache")]
pub use glossa_cache;
pub use glossa_i18n;

pub mod prelude {
	pub use crate::{
		I18nError, I18nResult, Message, Param, Translator, TranslatorSettings,
	};

	#[cfg(feature = "cache")]
	pub use crate::{DevNullStorage, FileStorage, MemoryStorage, Storage};
}
