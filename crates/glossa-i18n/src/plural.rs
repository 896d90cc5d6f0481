//! Threshold-based plural rules
//!
//! A language declares its plural forms as an ascending, `|`-separated list
//! of thresholds, e.g. `"2|5"` for Czech (`1 soubor`, `2 soubory`,
//! `5 souborů`). A count selects the form one past the last threshold it
//! reaches; counts up to 1 always select the singular form.

use crate::param::Param;
use serde::{Deserialize, Serialize};
use std::fmt;

const FORM_SEPARATOR: char = '|';

/// Plural rule of one language
///
/// # Example
/// ```
/// use glossa_i18n::{Param, PluralRule};
///
/// let rule: PluralRule = "1|4".parse().unwrap();
/// assert_eq!(rule.resolve(&Param::from(1)), 0);
/// assert_eq!(rule.resolve(&Param::from(3)), 1);
/// assert_eq!(rule.resolve(&Param::from(10)), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PluralSection", into = "PluralSection")]
pub struct PluralRule {
	thresholds: Vec<f64>,
}

impl PluralRule {
	/// Rule from already parsed thresholds
	pub fn new(thresholds: Vec<f64>) -> Self {
		Self { thresholds }
	}

	pub fn thresholds(&self) -> &[f64] {
		&self.thresholds
	}

	/// Number of plural variants a translation needs so that every index
	/// [`resolve`](Self::resolve) may return is valid
	pub fn form_count(&self) -> usize {
		self.thresholds.len() + 1
	}

	/// Select the plural form index for `count`
	///
	/// The count is taken as an absolute value; counts up to 1 are singular.
	/// Every threshold the count reaches moves the result to the form after
	/// it, so later thresholds override earlier ones.
	pub fn resolve(&self, count: &Param) -> usize {
		let count = count.magnitude();
		if count <= 1.0 {
			return 0;
		}

		let mut form = 0;
		for (i, threshold) in self.thresholds.iter().enumerate() {
			if count >= *threshold {
				form = i + 1;
			}
		}
		form
	}
}

impl std::str::FromStr for PluralRule {
	type Err = String;

	fn from_str(form: &str) -> Result<Self, Self::Err> {
		if form.trim().is_empty() {
			return Ok(Self::default());
		}

		form.split(FORM_SEPARATOR)
			.map(|part| {
				part.trim()
					.parse::<f64>()
					.ok()
					.filter(|t| t.is_finite())
					.ok_or_else(|| format!("invalid plural threshold '{}' in '{}'", part, form))
			})
			.collect::<Result<Vec<_>, _>>()
			.map(Self::new)
	}
}

impl fmt::Display for PluralRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for threshold in &self.thresholds {
			if !first {
				write!(f, "{}", FORM_SEPARATOR)?;
			}
			write!(f, "{}", threshold)?;
			first = false;
		}
		Ok(())
	}
}

/// On-disk shape: `plural: { form: "1|4" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PluralSection {
	#[serde(default)]
	form: FormValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FormValue {
	Number(f64),
	Text(String),
}

impl Default for FormValue {
	fn default() -> Self {
		FormValue::Text(String::new())
	}
}

impl TryFrom<PluralSection> for PluralRule {
	type Error = String;

	fn try_from(section: PluralSection) -> Result<Self, Self::Error> {
		match section.form {
			FormValue::Number(threshold) => Ok(PluralRule::new(vec![threshold])),
			FormValue::Text(form) => form.parse(),
		}
	}
}

impl From<PluralRule> for PluralSection {
	fn from(rule: PluralRule) -> Self {
		PluralSection {
			form: FormValue::Text(rule.to_string()),
		}
	}
}
