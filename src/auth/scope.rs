//! Ordered scope lists preserved exactly as declared.

// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Ordered list of OAuth scopes.
///
/// Order and duplicates are preserved exactly as declared: the `scope` request parameter
/// is rendered by concatenating descriptor defaults with registration extensions, and the
/// wire value must reproduce that sequence verbatim.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ScopeList(Arc<[String]>);
impl ScopeList {
	/// Creates a validated scope list from any iterator, preserving order and duplicates.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Ok(Self(validate(scopes)?))
	}

	/// Number of declared scopes, duplicates included.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are declared.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over scopes in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|s| s.as_str())
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	/// Returns a new list with `other`'s entries appended after this list's.
	pub fn concat(&self, other: &Self) -> Self {
		Self(self.0.iter().chain(other.0.iter()).cloned().collect())
	}

	/// Renders the wire value by joining entries with the separator.
	pub fn join(&self, separator: char) -> String {
		let mut buf = String::new();

		for (idx, value) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push(separator);
			}

			buf.push_str(value);
		}

		buf
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(' '))
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeList::new(values).map_err(DeError::custom)
	}
}

fn validate<I, S>(scopes: I) -> Result<Arc<[String]>, ScopeValidationError>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut list = Vec::new();

	for scope in scopes {
		let owned: String = scope.into();

		if owned.is_empty() {
			return Err(ScopeValidationError::Empty);
		}
		if owned.chars().any(char::is_whitespace) {
			return Err(ScopeValidationError::ContainsWhitespace { scope: owned });
		}

		list.push(owned);
	}

	Ok(list.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn order_and_duplicates_survive() {
		let scopes = ScopeList::new(["profile", "email", "profile"])
			.expect("Scope fixture should be valid.");

		assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["profile", "email", "profile"]);
		assert_eq!(scopes.len(), 3);
	}

	#[test]
	fn concat_appends_without_dedup() {
		let defaults = ScopeList::new(["a", "b"]).expect("Default scopes should be valid.");
		let extension = ScopeList::new(["c", "a"]).expect("Extension scopes should be valid.");
		let merged = defaults.concat(&extension);

		assert_eq!(merged.join(' '), "a b c a");
		assert_eq!(merged.join(','), "a,b,c,a");
	}

	#[test]
	fn invalid_entries_error() {
		assert!(ScopeList::new([""]).is_err());
		assert!(ScopeList::new(["contains space"]).is_err());
		assert!(ScopeList::new([" padded "]).is_err());
	}

	#[test]
	fn from_str_splits_on_whitespace() {
		let scopes =
			ScopeList::from_str("email profile").expect("Scope string should parse successfully.");

		assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["email", "profile"]);
		assert!(ScopeList::from_str("").is_ok(), "Empty string represents an empty list.");
		assert!(ScopeList::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
	}
}
