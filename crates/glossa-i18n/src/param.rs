//! Interpolation parameters

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NUMERIC: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").expect("valid numeric pattern")
});

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
});

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup pattern"));

/// A positional value substituted into a translation, or used as a count
///
/// # Example
/// ```
/// use glossa_i18n::Param;
///
/// assert!(Param::from("12").is_numeric());
/// assert!(Param::from("1.5").is_numeric());
/// assert!(!Param::from("Bob").is_numeric());
/// assert_eq!(Param::from(2.0).to_string(), "2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
	Int(i64),
	Float(f64),
	Str(String),
}

impl Param {
	/// Whether the value is a number or a numeric string
	///
	/// Accepts integer and decimal strings, optionally signed, with an
	/// exponent, surrounded by whitespace.
	pub fn is_numeric(&self) -> bool {
		match self {
			Param::Int(_) => true,
			Param::Float(f) => f.is_finite(),
			Param::Str(s) => NUMERIC.is_match(s),
		}
	}

	/// Truncating integer coercion; non-numeric strings become 0
	pub fn to_int(&self) -> i64 {
		match self {
			Param::Int(i) => *i,
			Param::Float(f) => float_to_int(*f),
			Param::Str(s) => leading_number(s).map(float_to_int).unwrap_or(0),
		}
	}

	/// Numeric value used by numeric conversions, 0 for non-numeric strings
	pub fn to_float(&self) -> f64 {
		match self {
			Param::Int(i) => *i as f64,
			Param::Float(f) => *f,
			Param::Str(s) => leading_number(s).unwrap_or(0.0),
		}
	}

	/// Absolute numeric magnitude used to pick a plural form
	///
	/// Markup around the number is ignored, as is anything trailing it.
	pub fn magnitude(&self) -> f64 {
		let value = match self {
			Param::Str(s) => leading_number(&MARKUP.replace_all(s, "")).unwrap_or(0.0),
			other => other.to_float(),
		};
		value.abs()
	}

	/// Non-zero numbers and strings other than `""` and `"0"`
	pub fn is_truthy(&self) -> bool {
		match self {
			Param::Int(i) => *i != 0,
			Param::Float(f) => *f != 0.0,
			Param::Str(s) => !s.is_empty() && s != "0",
		}
	}
}

fn leading_number(s: &str) -> Option<f64> {
	LEADING_NUMBER
		.find(s)
		.and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

fn float_to_int(f: f64) -> i64 {
	if f.is_finite() { f.trunc() as i64 } else { 0 }
}

/// Significant digits kept when a float is rendered as text
const FLOAT_DIGITS: i32 = 14;

/// `%G`-like rendering with [`FLOAT_DIGITS`] significant digits
///
/// Fixed notation while the decimal exponent is within `-4..14`,
/// otherwise `1.5E+20` style.
fn format_float(value: f64) -> String {
	if value.is_nan() {
		return "NAN".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 { "INF" } else { "-INF" }.to_string();
	}
	if value == 0.0 {
		return "0".to_string();
	}

	let scientific = format!("{:.*e}", (FLOAT_DIGITS - 1) as usize, value);
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return scientific;
	};
	let exponent: i32 = exponent.parse().unwrap_or(0);

	if exponent < -4 || exponent >= FLOAT_DIGITS {
		let mantissa = trim_fraction(mantissa);
		let mantissa = if mantissa.contains('.') {
			mantissa.to_string()
		} else {
			format!("{}.0", mantissa)
		};
		let sign = if exponent < 0 { '-' } else { '+' };
		return format!("{}E{}{}", mantissa, sign, exponent.abs());
	}

	let decimals = (FLOAT_DIGITS - 1 - exponent).max(0) as usize;
	trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(number: &str) -> &str {
	if number.contains('.') {
		number.trim_end_matches('0').trim_end_matches('.')
	} else {
		number
	}
}

impl fmt::Display for Param {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Param::Int(i) => write!(f, "{}", i),
			Param::Float(v) => f.write_str(&format_float(*v)),
			Param::Str(s) => f.write_str(s),
		}
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Param {
				fn from(value: $ty) -> Self {
					Param::Int(value as i64)
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f32> for Param {
	fn from(value: f32) -> Self {
		Param::Float(value as f64)
	}
}

impl From<f64> for Param {
	fn from(value: f64) -> Self {
		Param::Float(value)
	}
}

impl From<&str> for Param {
	fn from(value: &str) -> Self {
		Param::Str(value.to_string())
	}
}

impl From<String> for Param {
	fn from(value: String) -> Self {
		Param::Str(value)
	}
}

impl From<&String> for Param {
	fn from(value: &String) -> Self {
		Param::Str(value.clone())
	}
}
