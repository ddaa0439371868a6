//! Attribute values.
//!
//! Render functions produce loosely typed attribute values. They are resolved
//! once into [`AttrValue`] so the attribute module never has to re-inspect
//! their shape.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
	/// No value (`null`/`undefined` in template expressions).
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string.
	Text(Arc<str>),
}

impl AttrValue {
	/// Returns true for values that remove an attribute: `Null` and `false`.
	pub fn is_falsy(&self) -> bool {
		matches!(self, AttrValue::Null | AttrValue::Bool(false))
	}

	/// Returns true for `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, AttrValue::Null)
	}

	/// Returns the textual form written to the host.
	pub fn to_attr_string(&self) -> Cow<'_, str> {
		match self {
			AttrValue::Null => Cow::Borrowed("null"),
			AttrValue::Bool(true) => Cow::Borrowed("true"),
			AttrValue::Bool(false) => Cow::Borrowed("false"),
			AttrValue::Number(n) if *n == 0.0 => Cow::Borrowed("0"),
			AttrValue::Number(n) => Cow::Owned(n.to_string()),
			AttrValue::Text(s) => Cow::Borrowed(s),
		}
	}

	/// Converts a JSON value, stringifying arrays and objects.
	pub fn from_json(value: &Value) -> Self {
		match value {
			Value::Null => AttrValue::Null,
			Value::Bool(b) => AttrValue::Bool(*b),
			Value::Number(n) => n
				.as_f64()
				.map(AttrValue::Number)
				.unwrap_or_else(|| AttrValue::Text(n.to_string().into())),
			Value::String(s) => AttrValue::Text(s.as_str().into()),
			other => AttrValue::Text(other.to_string().into()),
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::Text(value.into())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::Text(value.into())
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		AttrValue::Bool(value)
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		AttrValue::Number(value)
	}
}

impl From<i64> for AttrValue {
	fn from(value: i64) -> Self {
		AttrValue::Number(value as f64)
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(AttrValue::Null, Into::into)
	}
}

/// Insertion-ordered attribute map.
///
/// `observed` marks a map that is shared with reactive state; such a map has
/// to be detached before a descriptor may take ownership of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
	entries: IndexMap<String, AttrValue>,
	observed: bool,
}

impl AttrMap {
	/// Creates an empty, unobserved map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a map that is marked as shared with reactive state.
	pub fn observed(entries: IndexMap<String, AttrValue>) -> Self {
		Self {
			entries,
			observed: true,
		}
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Inserts or replaces an attribute. The last write for a name wins.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
		self.entries.insert(name.into(), value.into());
	}

	/// Returns the value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.entries.get(name)
	}

	/// Returns true when `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Returns true when `name` is bound to something other than `Null`.
	pub fn is_defined(&self, name: &str) -> bool {
		self.get(name).is_some_and(|v| !v.is_null())
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when the map holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns true when the map is shared with reactive state.
	pub fn is_observed(&self) -> bool {
		self.observed
	}

	/// Returns an unobserved copy of this map.
	pub fn detached(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			observed: false,
		}
	}
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttrMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = AttrMap::new();
		for (k, v) in iter {
			map.insert(k, v);
		}
		map
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(AttrValue::Null, true)]
	#[case(AttrValue::Bool(false), true)]
	#[case(AttrValue::Bool(true), false)]
	#[case(AttrValue::Number(0.0), false)]
	#[case(AttrValue::from(""), false)]
	fn test_is_falsy(#[case] value: AttrValue, #[case] expected: bool) {
		assert_eq!(value.is_falsy(), expected);
	}

	#[rstest]
	#[case(AttrValue::Number(3.0), "3")]
	#[case(AttrValue::Number(1.5), "1.5")]
	#[case(AttrValue::Number(1e20), "100000000000000000000")]
	#[case(AttrValue::Number(-0.0), "0")]
	#[case(AttrValue::Number(-42.0), "-42")]
	#[case(AttrValue::Bool(true), "true")]
	#[case(AttrValue::from("x"), "x")]
	fn test_to_attr_string(#[case] value: AttrValue, #[case] expected: &str) {
		assert_eq!(value.to_attr_string(), expected);
	}

	#[rstest]
	fn test_from_json() {
		assert_eq!(AttrValue::from_json(&serde_json::json!(null)), AttrValue::Null);
		assert_eq!(AttrValue::from_json(&serde_json::json!(2)), AttrValue::Number(2.0));
		assert_eq!(
			AttrValue::from_json(&serde_json::json!([1, 2])),
			AttrValue::from("[1,2]")
		);
	}

	#[rstest]
	fn test_last_write_wins() {
		let map = AttrMap::new().with("id", "a").with("id", "b");
		assert_eq!(map.len(), 1);
		assert_eq!(map.get("id"), Some(&AttrValue::from("b")));
	}

	#[rstest]
	fn test_detached_clears_marker() {
		let map = AttrMap::observed(IndexMap::from([("id".to_string(), AttrValue::from("a"))]));
		assert!(map.is_observed());
		let copy = map.detached();
		assert!(!copy.is_observed());
		assert_eq!(copy.get("id"), map.get("id"));
	}

	#[rstest]
	fn test_untagged_deserialize() {
		let value: AttrValue = serde_json::from_str("true").unwrap();
		assert_eq!(value, AttrValue::Bool(true));
		let value: AttrValue = serde_json::from_str("\"on\"").unwrap();
		assert_eq!(value, AttrValue::from("on"));
	}
}
