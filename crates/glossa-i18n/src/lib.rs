//! Message translation for Glossa
//!
//! A [`Translator`] looks messages up in a [`Dictionary`] built from one
//! language file per language (`locale/en.yaml`, `locale/cs.yaml`, ...).
//! The parsed dictionary is cached through [`glossa_cache`] and rebuilt
//! whenever one of the language files changes.
//!
//! ## Features
//!
//! - **Trailing punctuation**: `"Hello!"` is translated through `"Hello"`
//!   when only the latter has a translation
//! - **Plural forms**: per-language threshold rules such as `2|5`
//! - **Parameters**: printf-style substitution, including `%1$s` positions
//!
//! Translating never fails. Unknown languages and keys fall back to the
//! message itself.
//!
//! ## Example
//!
//! ```
//! use glossa_i18n::{Message, Translator};
//! use glossa_cache::MemoryStorage;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locale = tempfile::tempdir()?;
//! std::fs::write(
//! 	locale.path().join("cs.yaml"),
//! 	"name: Čeština\n\
//! 	 plural:\n  form: 2|5\n\
//! 	 translations:\n  Hello: Ahoj\n  \"%s file\": [\"%s soubor\", \"%s soubory\", \"%s souborů\"]\n",
//! )?;
//!
//! let translator = Translator::new(locale.path(), "cs", Arc::new(MemoryStorage::new()))?;
//!
//! assert_eq!(translator.translate("Hello!"), "Ahoj!");
//! assert_eq!(translator.translate_plural("%s file", 5), "5 souborů");
//! assert_eq!(translator.translate(Message::with_params("%s file", [2])), "2 soubory");
//! # Ok(())
//! # }
//! ```

pub mod dictionary;
pub mod error;
pub mod format;
pub mod loader;
pub mod message;
pub mod param;
pub mod plural;
pub mod settings;
pub mod translator;

pub use dictionary::{Dictionary, LanguageEntry, Translation};
pub use error::{I18nError, I18nResult};
pub use loader::{DictionaryFormat, DictionaryLoader};
pub use message::Message;
pub use param::Param;
pub use plural::PluralRule;
pub use settings::{CacheBackend, CacheSettings, TranslatorSettings};
pub use translator::Translator;
