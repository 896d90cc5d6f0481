//! Messages passed to the translator

use crate::param::Param;

/// A message key, optionally carrying positional parameters
///
/// # Example
/// ```
/// use glossa_i18n::{Message, Param};
///
/// let plain: Message = "Hello".into();
/// assert_eq!(plain.key(), "Hello");
/// assert!(plain.params().is_empty());
///
/// let with_params = Message::with_params("Hi %s", ["Bob"]);
/// assert_eq!(with_params.params(), &[Param::from("Bob")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
	Plain(String),
	WithParams(String, Vec<Param>),
}

impl Message {
	/// Build a message with positional parameters
	pub fn with_params<I, P>(key: impl Into<String>, params: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<Param>,
	{
		Message::WithParams(key.into(), params.into_iter().map(Into::into).collect())
	}

	/// The untranslated key
	pub fn key(&self) -> &str {
		match self {
			Message::Plain(key) | Message::WithParams(key, _) => key,
		}
	}

	/// Positional parameters, empty for plain messages
	pub fn params(&self) -> &[Param] {
		match self {
			Message::Plain(_) => &[],
			Message::WithParams(_, params) => params,
		}
	}

	pub(crate) fn into_parts(self) -> (String, Vec<Param>) {
		match self {
			Message::Plain(key) => (key, Vec::new()),
			Message::WithParams(key, params) => (key, params),
		}
	}
}

impl From<&str> for Message {
	fn from(key: &str) -> Self {
		Message::Plain(key.to_string())
	}
}

impl From<String> for Message {
	fn from(key: String) -> Self {
		Message::Plain(key)
	}
}

impl From<&String> for Message {
	fn from(key: &String) -> Self {
		Message::Plain(key.clone())
	}
}

impl<S, P> From<(S, Vec<P>)> for Message
where
	S: Into<String>,
	P: Into<Param>,
{
	fn from((key, params): (S, Vec<P>)) -> Self {
		Message::with_params(key, params)
	}
}
