//! Positional printf-style substitution
//!
//! Supports conversions of the form
//! `%[argnum$][flags][width][.precision]specifier`:
//!
//! - flags: `-` (left-justify), `+` (always print sign), `0` or space
//!   (padding character), `'c` (pad with `c`)
//! - specifiers: `s d u f F e E x X o b c`, plus `%%` for a literal `%`
//!
//! Sequential conversions consume arguments left to right; `%2$s` addresses
//! the second argument directly. A conversion without a matching argument,
//! or with an unknown specifier, is copied to the output untouched. So is a
//! conversion whose width or precision exceeds [`MAX_PADDING`].

use crate::param::Param;

const SPECIFIERS: &str = "sduFfeExXobc";

/// Largest width or precision honored in a conversion
pub const MAX_PADDING: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
struct Conversion {
	argnum: Option<usize>,
	left_align: bool,
	plus: bool,
	pad: char,
	width: usize,
	precision: Option<usize>,
	specifier: char,
}

#[derive(Debug, Clone, PartialEq)]
enum Directive {
	Percent,
	Convert(Conversion),
}

/// Substitute `args` into `template`
///
/// # Example
/// ```
/// use glossa_i18n::format::vsprintf;
/// use glossa_i18n::Param;
///
/// assert_eq!(vsprintf("Hi %s", &[Param::from("Bob")]), "Hi Bob");
/// let words = [Param::from("world"), Param::from("hello")];
/// assert_eq!(vsprintf("%2$s %1$s", &words), "hello world");
/// assert_eq!(vsprintf("%s and %s", &words[..1]), "world and %s");
/// assert_eq!(vsprintf("%05.1f%%", &[Param::Float(9.87)]), "009.9%");
/// ```
pub fn vsprintf(template: &str, args: &[Param]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut next_arg = 0;
	let mut rest = template;

	while let Some(pos) = rest.find('%') {
		out.push_str(&rest[..pos]);
		let tail = &rest[pos..];

		match parse_directive(tail) {
			Some((Directive::Percent, len)) => {
				out.push('%');
				rest = &tail[len..];
			}
			Some((Directive::Convert(conversion), len)) => {
				let index = match conversion.argnum {
					Some(n) => n - 1,
					None => {
						next_arg += 1;
						next_arg - 1
					}
				};
				match args.get(index) {
					Some(arg) => out.push_str(&render(&conversion, arg)),
					None => out.push_str(&tail[..len]),
				}
				rest = &tail[len..];
			}
			None => {
				out.push('%');
				rest = &tail[1..];
			}
		}
	}

	out.push_str(rest);
	out
}

/// Parse the directive at the start of `s` (which begins with `%`),
/// returning it with its length in bytes
fn parse_directive(s: &str) -> Option<(Directive, usize)> {
	if s[1..].starts_with('%') {
		return Some((Directive::Percent, 2));
	}

	let mut pos = 1;
	let mut conversion = Conversion {
		argnum: None,
		left_align: false,
		plus: false,
		pad: ' ',
		width: 0,
		precision: None,
		specifier: 's',
	};

	let digits = leading_digits(&s[pos..]);
	if digits > 0 && s[pos + digits..].starts_with('$') {
		let argnum: usize = s[pos..pos + digits].parse().ok()?;
		if argnum == 0 {
			return None;
		}
		conversion.argnum = Some(argnum);
		pos += digits + 1;
	}

	loop {
		match s[pos..].chars().next()? {
			'-' => conversion.left_align = true,
			'+' => conversion.plus = true,
			'0' => conversion.pad = '0',
			' ' => conversion.pad = ' ',
			'\'' => {
				let pad = s[pos + 1..].chars().next()?;
				conversion.pad = pad;
				pos += pad.len_utf8();
			}
			_ => break,
		}
		pos += 1;
	}

	let digits = leading_digits(&s[pos..]);
	if digits > 0 {
		conversion.width = bounded(&s[pos..pos + digits])?;
		pos += digits;
	}

	if s[pos..].starts_with('.') {
		pos += 1;
		let digits = leading_digits(&s[pos..]);
		conversion.precision = Some(if digits > 0 {
			bounded(&s[pos..pos + digits])?
		} else {
			0
		});
		pos += digits;
	}

	let specifier = s[pos..].chars().next()?;
	if !SPECIFIERS.contains(specifier) {
		return None;
	}
	conversion.specifier = specifier;
	pos += specifier.len_utf8();

	Some((Directive::Convert(conversion), pos))
}

/// Width or precision, `None` when it overflows or exceeds [`MAX_PADDING`]
fn bounded(digits: &str) -> Option<usize> {
	digits
		.parse::<usize>()
		.ok()
		.filter(|value| *value <= MAX_PADDING)
}

fn leading_digits(s: &str) -> usize {
	s.bytes().take_while(u8::is_ascii_digit).count()
}

fn render(conversion: &Conversion, arg: &Param) -> String {
	let (sign, body) = match conversion.specifier {
		's' => {
			let text = arg.to_string();
			let text = match conversion.precision {
				Some(limit) => text.chars().take(limit).collect(),
				None => text,
			};
			return pad(conversion, "", text);
		}
		'c' => {
			return u32::try_from(arg.to_int())
				.ok()
				.and_then(char::from_u32)
				.map(String::from)
				.unwrap_or_default();
		}
		'd' => {
			let value = arg.to_int();
			(sign_of(value < 0, conversion.plus), value.unsigned_abs().to_string())
		}
		'u' => ("", (arg.to_int() as u64).to_string()),
		'f' | 'F' => {
			let value = arg.to_float();
			let precision = conversion.precision.unwrap_or(6);
			(
				sign_of(value < 0.0, conversion.plus),
				format!("{:.*}", precision, value.abs()),
			)
		}
		'e' | 'E' => {
			let value = arg.to_float();
			let precision = conversion.precision.unwrap_or(6);
			let body = exponent_notation(value.abs(), precision);
			let body = if conversion.specifier == 'E' {
				body.to_uppercase()
			} else {
				body
			};
			(sign_of(value < 0.0, conversion.plus), body)
		}
		'x' => ("", format!("{:x}", arg.to_int() as u64)),
		'X' => ("", format!("{:X}", arg.to_int() as u64)),
		'o' => ("", format!("{:o}", arg.to_int() as u64)),
		'b' => ("", format!("{:b}", arg.to_int() as u64)),
		_ => return arg.to_string(),
	};

	pad(conversion, sign, body)
}

fn sign_of(negative: bool, plus: bool) -> &'static str {
	if negative {
		"-"
	} else if plus {
		"+"
	} else {
		""
	}
}

/// `1.5e+3` style: explicit exponent sign, no exponent zero-padding
fn exponent_notation(value: f64, precision: usize) -> String {
	let formatted = format!("{:.*e}", precision, value);
	match formatted.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => {
			format!("{}e+{}", mantissa, exponent)
		}
		_ => formatted,
	}
}

fn pad(conversion: &Conversion, sign: &str, body: String) -> String {
	let len = sign.chars().count() + body.chars().count();
	if len >= conversion.width {
		return format!("{}{}", sign, body);
	}

	let filler: String = std::iter::repeat_n(conversion.pad, conversion.width - len).collect();
	if conversion.left_align {
		format!("{}{}{}", sign, body, filler)
	} else if conversion.pad == '0' {
		format!("{}{}{}", sign, filler, body)
	} else {
		format!("{}{}{}", filler, sign, body)
	}
}
