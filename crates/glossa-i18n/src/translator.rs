//! The translator
//!
//! Resolves a message key against the active language:
//!
//! 1. exact lookup of the key;
//! 2. otherwise, if the key ends with one of `. , : ! ? …` and the key
//!    without it is translated, that translation plus the character;
//! 3. plural variants are narrowed to one with the count;
//! 4. message parameters are substituted (`%s`, `%1$s`, ...);
//! 5. when an explicit count is given, the count and any extra arguments are
//!    substituted again on top of the result;
//! 6. leftover `%s` placeholders are removed.
//!
//! Nothing on this path fails: unknown languages or keys fall back to the
//! key itself.

use crate::dictionary::{Dictionary, LanguageEntry, Translation};
use crate::error::I18nResult;
use crate::format::vsprintf;
use crate::loader::{
	CACHE_NAMESPACE, DictionaryLoader, load_cached_dictionary, store_cached_dictionary,
};
use crate::message::Message;
use crate::param::Param;
use crate::settings::TranslatorSettings;
use glossa_cache::{Cache, Storage};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Trailing characters a key may carry on top of a translated key, in scan order
pub const TRAILING_CHARS: [char; 6] = ['.', ',', ':', '!', '?', '…'];

const PLACEHOLDER: &str = "%s";

/// Dictionary-backed translator with an active language
///
/// # Example
/// ```
/// use glossa_i18n::{Dictionary, LanguageEntry, Message, Translator};
///
/// let dictionary = Dictionary::new().with_language(
/// 	"cs",
/// 	LanguageEntry::new("Čeština")
/// 		.with_translation("Hello", "Ahoj")
/// 		.with_translation("Hi %s", "Ahoj %s")
/// 		.with_plural_forms("%s file", ["%s soubor", "%s soubory", "%s souborů"])
/// 		.with_plural_rule("2|5".parse().unwrap()),
/// );
/// let translator = Translator::from_dictionary(dictionary, "cs").unwrap();
///
/// assert_eq!(translator.translate("Hello!"), "Ahoj!");
/// assert_eq!(translator.translate(Message::with_params("Hi %s", ["Bob"])), "Ahoj Bob");
/// assert_eq!(translator.translate_plural("%s file", 3), "3 soubory");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
	lang: String,
	dictionary: Arc<Dictionary>,
}

impl Translator {
	/// Create a translator for YAML language files under `root`
	///
	/// The parsed dictionary is taken from `storage` when a fresh copy is
	/// cached there; otherwise it is built from the files and cached,
	/// tied to those files so that editing any of them rebuilds it.
	///
	/// # Errors
	///
	/// Fails when a language file does not parse or holds malformed plural
	/// data. Cache failures are logged and otherwise ignored.
	pub fn new(
		root: impl AsRef<Path>,
		lang: impl Into<String>,
		storage: Arc<dyn Storage>,
	) -> I18nResult<Self> {
		Self::with_loader(&DictionaryLoader::new(root.as_ref()), lang, storage)
	}

	/// Create a translator using a configured loader
	pub fn with_loader(
		loader: &DictionaryLoader,
		lang: impl Into<String>,
		storage: Arc<dyn Storage>,
	) -> I18nResult<Self> {
		let cache = Cache::new(storage, CACHE_NAMESPACE);

		let cached = load_cached_dictionary(&cache).unwrap_or_else(|e| {
			tracing::warn!("Failed to read cached dictionary: {}", e);
			None
		});

		let dictionary = match cached {
			Some(dictionary) => dictionary,
			None => {
				let dictionary = loader.build()?;
				dictionary.validate()?;
				let sources = loader.language_files()?;
				if let Err(e) = store_cached_dictionary(&cache, &dictionary, &sources) {
					tracing::warn!("Failed to cache dictionary: {}", e);
				}
				dictionary
			}
		};

		Self::from_dictionary(dictionary, lang)
	}

	/// Create a translator over an already built dictionary
	///
	/// # Errors
	///
	/// Returns [`I18nError::MalformedPluralData`](crate::I18nError::MalformedPluralData)
	/// if a plural translation cannot cover every form of its language.
	pub fn from_dictionary(dictionary: Dictionary, lang: impl Into<String>) -> I18nResult<Self> {
		dictionary.validate()?;
		Ok(Self {
			lang: lang.into(),
			dictionary: Arc::new(dictionary),
		})
	}

	/// Create a translator from settings
	pub fn from_settings(settings: &TranslatorSettings) -> I18nResult<Self> {
		let storage = settings.cache.build_storage()?;
		Self::with_loader(
			&settings.loader(),
			settings.default_language.clone(),
			storage,
		)
	}

	/// Supported languages as `code => display name`
	pub fn supported_languages(&self) -> BTreeMap<String, String> {
		self.dictionary
			.languages()
			.map(|(code, entry)| (code.to_string(), entry.name.clone()))
			.collect()
	}

	/// The loaded dictionary
	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	/// Switch the active language; empty codes are ignored
	///
	/// The code is not checked against the dictionary: switching to an
	/// unknown language makes every message fall back to its key.
	pub fn set_lang(&mut self, lang: &str) {
		if !lang.is_empty() {
			self.lang = lang.to_string();
		}
	}

	/// The active language
	pub fn lang(&self) -> &str {
		&self.lang
	}

	/// Plural form index for `count` in the active language
	pub fn resolve_plural_form(&self, count: &Param) -> usize {
		self.entry().map_or(0, |entry| entry.plural.resolve(count))
	}

	/// Translate a message without count
	pub fn translate(&self, message: impl Into<Message>) -> String {
		self.translate_with(message, None, &[])
	}

	/// Translate a message with a count
	pub fn translate_plural(&self, message: impl Into<Message>, count: impl Into<Param>) -> String {
		self.translate_with(message, Some(count.into()), &[])
	}

	/// Translate a message with an optional explicit count and extra arguments
	///
	/// If the count is absent and the message's first parameter is numeric,
	/// that parameter (truncated to an integer) is used as the count; it is
	/// still substituted as a parameter as well.
	///
	/// After the message parameters are substituted, a second substitution
	/// pass runs with the explicit count followed by `args`, provided the
	/// effective count is truthy and anything besides the message was
	/// passed. Both passes apply to the same string, so a placeholder left
	/// over by the first pass is filled by the second:
	///
	/// ```
	/// use glossa_i18n::{Dictionary, Message, Param, Translator};
	///
	/// let translator = Translator::from_dictionary(Dictionary::new(), "en").unwrap();
	/// let result = translator.translate_with(
	/// 	Message::with_params("%s of %s items by %s", ["Alice"]),
	/// 	Some(Param::from(5)),
	/// 	&[Param::from("Bob")],
	/// );
	/// assert_eq!(result, "Alice of 5 items by Bob");
	/// ```
	pub fn translate_with(
		&self,
		message: impl Into<Message>,
		count: Option<Param>,
		args: &[Param],
	) -> String {
		let (key, params) = message.into().into_parts();
		let extra_supplied = count.is_some() || !args.is_empty();
		let second_pass_args: Vec<Param> = if extra_supplied {
			std::iter::once(count.clone().unwrap_or_else(|| Param::Str(String::new())))
				.chain(args.iter().cloned())
				.collect()
		} else {
			Vec::new()
		};

		let count = count.or_else(|| {
			params
				.first()
				.filter(|param| param.is_numeric())
				.map(|param| Param::Int(param.to_int()))
		});

		let mut text = self.resolve(&key, count.as_ref());

		if !params.is_empty() {
			text = vsprintf(&text, &params);
		}

		// Intentional second pass over the already substituted text
		if extra_supplied && count.as_ref().is_some_and(Param::is_truthy) {
			text = vsprintf(&text, &second_pass_args);
		}

		text.replace(PLACEHOLDER, "")
	}

	fn entry(&self) -> Option<&LanguageEntry> {
		self.dictionary.get(&self.lang)
	}

	/// Look the key up, with trailing-character fallback and plural selection
	fn resolve(&self, key: &str, count: Option<&Param>) -> String {
		let Some(entry) = self.entry() else {
			tracing::trace!("No dictionary for language '{}'", self.lang);
			return key.to_string();
		};

		if let Some(translation) = entry.get(key) {
			return self.select(translation, count);
		}

		// Every character is checked against the text as rewritten so far;
		// a later match replaces an earlier one.
		let mut text = key.to_string();
		for trailing in TRAILING_CHARS {
			let Some(stripped) = text.strip_suffix(trailing) else {
				continue;
			};
			if let Some(translation) = entry.get(stripped) {
				text = self.select(translation, count);
				text.push(trailing);
			}
		}

		if text == key {
			tracing::trace!("Missing translation for '{}' in '{}'", key, self.lang);
		}
		text
	}

	fn select(&self, translation: &Translation, count: Option<&Param>) -> String {
		match translation {
			Translation::Single(text) => text.clone(),
			Translation::Plural(forms) => {
				let form = count.map_or(0, |count| self.resolve_plural_form(count));
				forms
					.get(form)
					.or_else(|| forms.last())
					.cloned()
					.unwrap_or_default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn translator() -> Translator {
		let dictionary = Dictionary::new()
			.with_language(
				"cs",
				LanguageEntry::new("Čeština")
					.with_plural_rule("2|5".parse().unwrap())
					.with_translation("Hello", "Ahoj")
					.with_translation("Hi %s", "Ahoj %s")
					.with_translation("Welcome", "Vítejte")
					.with_translation("Welcome,", "Vítejte (čárka)")
					.with_translation("Value: %s", "Hodnota: %s")
					.with_translation("%s of %s", "%s z %s")
					.with_plural_forms("%s file", ["%s soubor", "%s soubory", "%s souborů"])
					.with_plural_forms("Item", ["Položka", "Položky", "Položek"]),
			)
			.with_language(
				"en",
				LanguageEntry::new("English")
					.with_plural_rule("2".parse().unwrap())
					.with_plural_forms("%s file", ["%s file", "%s files"]),
			);
		Translator::from_dictionary(dictionary, "cs").unwrap()
	}

	#[rstest]
	fn test_exact_lookup(translator: Translator) {
		assert_eq!(translator.translate("Hello"), "Ahoj");
	}

	#[rstest]
	fn test_missing_key_returns_key(translator: Translator) {
		assert_eq!(translator.translate("Unknown message"), "Unknown message");
	}

	#[rstest]
	#[case("Hello!", "Ahoj!")]
	#[case("Hello.", "Ahoj.")]
	#[case("Hello,", "Ahoj,")]
	#[case("Hello:", "Ahoj:")]
	#[case("Hello?", "Ahoj?")]
	#[case("Hello…", "Ahoj…")]
	#[case("Hello;", "Hello;")]
	#[case("Hello!!", "Hello!!")]
	fn test_trailing_character_fallback(
		translator: Translator,
		#[case] message: &str,
		#[case] expected: &str,
	) {
		assert_eq!(translator.translate(message), expected);
	}

	#[rstest]
	fn test_exact_match_beats_trailing_fallback(translator: Translator) {
		// "Welcome," is translated on its own, so no fallback to "Welcome"
		assert_eq!(translator.translate("Welcome,"), "Vítejte (čárka)");
		assert_eq!(translator.translate("Welcome."), "Vítejte.");
	}

	#[rstest]
	fn test_trailing_fallback_keeps_scanning() {
		// Only '!' is a trailing match; what remains is the "Hi." key
		let dictionary = Dictionary::new().with_language(
			"en",
			LanguageEntry::new("English")
				.with_translation("Hi.", "Hey.")
				.with_translation("Hi", "Yo"),
		);
		let translator = Translator::from_dictionary(dictionary, "en").unwrap();

		assert_eq!(translator.translate("Hi.!"), "Hey.!");
	}

	#[rstest]
	fn test_params_interpolated(translator: Translator) {
		assert_eq!(
			translator.translate(Message::with_params("Hi %s", ["Bob"])),
			"Ahoj Bob"
		);
	}

	#[rstest]
	fn test_oversized_width_in_untranslated_key_is_kept(translator: Translator) {
		assert_eq!(
			translator.translate(Message::with_params("%9223372036854775808s", ["x"])),
			"%9223372036854775808s"
		);
	}

	#[rstest]
	fn test_oversized_width_from_param_survives_second_pass(translator: Translator) {
		// The parameter text becomes part of the template of the second pass
		let result = translator.translate_with(
			Message::with_params("Hi %s, %s", ["%9223372036854775808s"]),
			Some(Param::Int(2)),
			&[],
		);

		assert_eq!(result, "Hi %9223372036854775808s, 2");
	}

	#[rstest]
	fn test_float_param_uses_fourteen_significant_digits(translator: Translator) {
		assert_eq!(
			translator.translate(Message::with_params("v=%s", [0.1 + 0.2])),
			"v=0.3"
		);
	}

	#[rstest]
	fn test_unconsumed_placeholders_stripped(translator: Translator) {
		assert_eq!(translator.translate("Value: %s"), "Hodnota: ");
		assert_eq!(translator.translate("Untranslated %s here"), "Untranslated  here");
	}

	#[rstest]
	#[case(1, "1 soubor")]
	#[case(2, "2 soubory")]
	#[case(4, "4 soubory")]
	#[case(5, "5 souborů")]
	// A zero count skips substitution, so the placeholder is dropped
	#[case(0, " soubor")]
	fn test_plural_with_explicit_count(
		translator: Translator,
		#[case] count: i64,
		#[case] expected: &str,
	) {
		assert_eq!(translator.translate_plural("%s file", count), expected);
	}

	#[rstest]
	fn test_plural_count_taken_from_first_param(translator: Translator) {
		assert_eq!(
			translator.translate(Message::with_params("%s file", [7])),
			"7 souborů"
		);
		assert_eq!(
			translator.translate(Message::with_params("%s file", ["3"])),
			"3 soubory"
		);
	}

	#[rstest]
	fn test_decimal_string_param_counts_and_interpolates(translator: Translator) {
		// "2.5" is numeric: it selects the form via its integer part and is
		// still substituted verbatim
		assert_eq!(
			translator.translate(Message::with_params("%s file", ["2.5"])),
			"2.5 soubory"
		);
	}

	#[rstest]
	fn test_plural_without_count_uses_first_form(translator: Translator) {
		assert_eq!(translator.translate("Item"), "Položka");
	}

	#[rstest]
	fn test_plural_via_trailing_fallback(translator: Translator) {
		assert_eq!(translator.translate_plural("Item:", 10), "Položek:");
	}

	#[rstest]
	fn test_explicit_count_wins_over_param(translator: Translator) {
		// The count selects the form; the params fill the placeholders
		assert_eq!(
			translator.translate_with(Message::with_params("%s file", [1]), Some(Param::Int(5)), &[]),
			"1 souborů"
		);
	}

	#[rstest]
	fn test_second_pass_substitutes_count_and_args(translator: Translator) {
		assert_eq!(
			translator.translate_with("%s of %s", Some(Param::Int(3)), &[Param::Int(10)]),
			"3 z 10"
		);
	}

	#[rstest]
	fn test_second_pass_layers_over_first(translator: Translator) {
		// First pass: params fill the first placeholder. Second pass: count
		// and args fill what is left.
		assert_eq!(
			translator.translate_with(
				Message::with_params("%s of %s", ["A"]),
				Some(Param::Int(2)),
				&[]
			),
			"A z 2"
		);
	}

	#[rstest]
	fn test_second_pass_skipped_for_falsy_count(translator: Translator) {
		assert_eq!(
			translator.translate_with("%s of %s", Some(Param::Int(0)), &[Param::Int(10)]),
			" z "
		);
	}

	#[rstest]
	fn test_second_pass_needs_explicit_arguments(translator: Translator) {
		// Count derived from params alone does not trigger the second pass
		assert_eq!(
			translator.translate(Message::with_params("%s of %s", [4])),
			"4 z "
		);
	}

	#[rstest]
	fn test_derived_count_with_extra_args_fills_with_empty_count(translator: Translator) {
		// The absent count takes the first slot of the second pass as empty text
		assert_eq!(
			translator.translate_with(Message::with_params("%s of %s", [4]), None, &[Param::from("x")]),
			"4 z "
		);
	}

	#[rstest]
	fn test_set_lang(mut translator: Translator) {
		// Arrange
		assert_eq!(translator.lang(), "cs");

		// Act
		translator.set_lang("");
		let after_empty = translator.lang().to_string();
		translator.set_lang("de");

		// Assert
		assert_eq!(after_empty, "cs");
		assert_eq!(translator.lang(), "de");
		assert_eq!(translator.translate("Hello!"), "Hello!");
		assert_eq!(translator.translate_plural("%s file", 3), "3 file");
	}

	#[rstest]
	fn test_switching_language_changes_plural_rule(mut translator: Translator) {
		translator.set_lang("en");

		assert_eq!(translator.translate_plural("%s file", 1), "1 file");
		assert_eq!(translator.translate_plural("%s file", 5), "5 files");
		assert_eq!(translator.resolve_plural_form(&Param::Int(5)), 1);
	}

	#[rstest]
	fn test_resolve_plural_form(translator: Translator) {
		assert_eq!(translator.resolve_plural_form(&Param::Int(1)), 0);
		assert_eq!(translator.resolve_plural_form(&Param::Int(3)), 1);
		assert_eq!(translator.resolve_plural_form(&Param::Int(10)), 2);
	}

	#[rstest]
	fn test_supported_languages(translator: Translator) {
		let languages = translator.supported_languages();

		assert_eq!(
			languages.into_iter().collect::<Vec<_>>(),
			vec![
				("cs".to_string(), "Čeština".to_string()),
				("en".to_string(), "English".to_string()),
			]
		);
	}

	#[rstest]
	fn test_from_dictionary_rejects_malformed_plurals() {
		let dictionary = Dictionary::new().with_language(
			"cs",
			LanguageEntry::new("Čeština")
				.with_plural_rule("2|5".parse().unwrap())
				.with_plural_forms("%s file", ["%s soubor"]),
		);

		assert!(Translator::from_dictionary(dictionary, "cs").is_err());
	}
}
