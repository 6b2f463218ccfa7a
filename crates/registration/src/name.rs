//! Two-part `namespace::name` identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between namespace and name.
pub const SEPARATOR: &str = "::";

/// Splits `name` into `(namespace, short_name)`.
///
/// The input must contain the separator exactly once. Either side may be
/// empty; nothing is trimmed or normalized.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] for zero or several separators.
pub fn parse_namespace(name: &str) -> Result<(&str, &str)> {
	let mut parts = name.split(SEPARATOR);
	match (parts.next(), parts.next(), parts.next()) {
		(Some(namespace), Some(short_name), None) => Ok((namespace, short_name)),
		_ => Err(Error::InvalidFormat { name: name.to_owned() }),
	}
}

/// Owned, validated `namespace::name` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(try_from = "String", into = "String")
)]
pub struct QualifiedName {
	namespace: String,
	name: String,
}

impl QualifiedName {
	/// Validates and splits `qualified` with [`parse_namespace`].
	pub fn parse(qualified: &str) -> Result<Self> {
		let (namespace, name) = parse_namespace(qualified)?;
		Ok(Self {
			namespace: namespace.to_owned(),
			name: name.to_owned(),
		})
	}

	/// Namespace part, before the separator.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Short name without the namespace.
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Display for QualifiedName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{SEPARATOR}{}", self.namespace, self.name)
	}
}

impl FromStr for QualifiedName {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl TryFrom<&str> for QualifiedName {
	type Error = Error;

	fn try_from(value: &str) -> Result<Self> {
		Self::parse(value)
	}
}

impl TryFrom<String> for QualifiedName {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		Self::parse(&value)
	}
}

impl From<QualifiedName> for String {
	fn from(name: QualifiedName) -> Self {
		name.to_string()
	}
}
