//! Dictionary of all loaded languages

use crate::error::{I18nError, I18nResult};
use crate::param::Param;
use crate::plural::PluralRule;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A translation of one message key
///
/// Numbers and booleans in a language file are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Translation {
	/// Single localized string
	Single(String),
	/// Plural variants, indexed by plural form
	Plural(Vec<String>),
}

impl<'de> Deserialize<'de> for Translation {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawTranslation {
			Single(Scalar),
			Plural(Vec<Scalar>),
		}

		Ok(match RawTranslation::deserialize(deserializer)? {
			RawTranslation::Single(text) => Translation::Single(text.into()),
			RawTranslation::Plural(forms) => {
				Translation::Plural(forms.into_iter().map(Into::into).collect())
			}
		})
	}
}

/// Scalar translation value as written in a language file
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl From<Scalar> for String {
	fn from(scalar: Scalar) -> Self {
		match scalar {
			Scalar::Text(text) => text,
			Scalar::Int(value) => Param::Int(value).to_string(),
			Scalar::Float(value) => Param::Float(value).to_string(),
			Scalar::Bool(true) => "1".to_string(),
			Scalar::Bool(false) => String::new(),
		}
	}
}

impl From<&str> for Translation {
	fn from(text: &str) -> Self {
		Translation::Single(text.to_string())
	}
}

impl From<String> for Translation {
	fn from(text: String) -> Self {
		Translation::Single(text)
	}
}

/// One language: display name, translations and plural rule
///
/// # Example
/// ```
/// use glossa_i18n::{LanguageEntry, Translation};
///
/// let entry = LanguageEntry::new("Čeština")
/// 	.with_translation("Hello", "Ahoj")
/// 	.with_plural_forms("%s file", ["%s soubor", "%s soubory", "%s souborů"])
/// 	.with_plural_rule("2|5".parse().unwrap());
///
/// assert_eq!(entry.get("Hello"), Some(&Translation::from("Ahoj")));
/// assert_eq!(entry.plural.form_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
	pub name: String,
	#[serde(default)]
	pub translations: HashMap<String, Translation>,
	#[serde(default)]
	pub plural: PluralRule,
}

impl LanguageEntry {
	/// Create an entry without translations
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			translations: HashMap::new(),
			plural: PluralRule::default(),
		}
	}

	/// Add a simple translation
	pub fn with_translation(
		mut self,
		message: impl Into<String>,
		translation: impl Into<String>,
	) -> Self {
		self.translations
			.insert(message.into(), Translation::Single(translation.into()));
		self
	}

	/// Add a plural translation
	pub fn with_plural_forms<I, S>(mut self, message: impl Into<String>, forms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.translations.insert(
			message.into(),
			Translation::Plural(forms.into_iter().map(Into::into).collect()),
		);
		self
	}

	/// Set the plural rule
	pub fn with_plural_rule(mut self, rule: PluralRule) -> Self {
		self.plural = rule;
		self
	}

	/// Get a translation
	pub fn get(&self, message: &str) -> Option<&Translation> {
		self.translations.get(message)
	}

	/// Check that every plural translation covers all forms of the rule
	pub fn validate(&self, code: &str) -> I18nResult<()> {
		let expected = self.plural.form_count();
		for (key, translation) in &self.translations {
			if let Translation::Plural(forms) = translation
				&& forms.len() < expected
			{
				return Err(I18nError::MalformedPluralData {
					language: code.to_string(),
					key: key.clone(),
					expected,
					found: forms.len(),
				});
			}
		}
		Ok(())
	}
}

/// All languages, keyed by language code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
	languages: BTreeMap<String, LanguageEntry>,
}

impl Dictionary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace a language
	pub fn insert(&mut self, code: impl Into<String>, entry: LanguageEntry) -> Option<LanguageEntry> {
		self.languages.insert(code.into(), entry)
	}

	/// Builder form of [`insert`](Self::insert)
	pub fn with_language(mut self, code: impl Into<String>, entry: LanguageEntry) -> Self {
		self.insert(code, entry);
		self
	}

	/// Get a language
	pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
		self.languages.get(code)
	}

	pub fn contains(&self, code: &str) -> bool {
		self.languages.contains_key(code)
	}

	/// Iterate languages in code order
	pub fn languages(&self) -> impl Iterator<Item = (&str, &LanguageEntry)> {
		self.languages
			.iter()
			.map(|(code, entry)| (code.as_str(), entry))
	}

	pub fn len(&self) -> usize {
		self.languages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.languages.is_empty()
	}

	/// Validate every language, failing on the first malformed plural translation
	pub fn validate(&self) -> I18nResult<()> {
		self.languages
			.iter()
			.try_for_each(|(code, entry)| entry.validate(code))
	}
}
