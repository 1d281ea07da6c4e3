use crate::FieldValue;
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Attribute values of one feature, keyed by field name.
///
/// Keeps insertion order; inserting an existing name replaces its value in place.
#[derive(Clone, Default, PartialEq)]
pub struct Attributes {
	entries: Vec<(String, FieldValue)>,
}

impl Attributes {
	pub fn new() -> Attributes {
		Attributes { entries: Vec::new() }
	}

	/// Builds attributes from two parallel lists of names and values.
	///
	/// Both lists must have the same length and no name may appear twice.
	pub fn from_parallel<S, V>(names: &[S], values: &[V]) -> Result<Attributes>
	where
		S: AsRef<str>,
		V: Clone,
		FieldValue: From<V>,
	{
		ensure!(
			names.len() == values.len(),
			"got {} attribute names but {} attribute values",
			names.len(),
			values.len()
		);
		let mut attributes = Attributes::new();
		for (name, value) in names.iter().zip(values) {
			let name = name.as_ref();
			ensure!(attributes.get(name).is_none(), "duplicate attribute name {name:?}");
			attributes.entries.push((name.to_string(), FieldValue::from(value.clone())));
		}
		Ok(attributes)
	}

	pub fn insert<V>(&mut self, name: &str, value: V)
	where
		FieldValue: From<V>,
	{
		let value = FieldValue::from(value);
		match self.entries.iter_mut().find(|(n, _)| n == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name.to_string(), value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
		let index = self.entries.iter().position(|(n, _)| n == name)?;
		Some(self.entries.remove(index).1)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v))
	}

	pub fn names(&self) -> Vec<&str> {
		self.entries.iter().map(|(n, _)| n.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl IntoIterator for Attributes {
	type Item = (String, FieldValue);
	type IntoIter = std::vec::IntoIter<(String, FieldValue)>;
	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl FromIterator<(String, FieldValue)> for Attributes {
	fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
		let mut attributes = Attributes::new();
		for (name, value) in iter {
			attributes.insert(&name, value);
		}
		attributes
	}
}

impl From<Vec<(&str, FieldValue)>> for Attributes {
	fn from(value: Vec<(&str, FieldValue)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl Debug for Attributes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn from_parallel() -> Result<()> {
		let attributes = Attributes::from_parallel(&["name", "country"], &["Oslo", "NO"])?;
		assert_eq!(attributes.names(), vec!["name", "country"]);
		assert_eq!(attributes.get("country"), Some(&FieldValue::from("NO")));

		let attributes = Attributes::from_parallel(&["id"], &[FieldValue::from(1)])?;
		assert_eq!(attributes, Attributes::from(vec![("id", FieldValue::Integer(1))]));
		Ok(())
	}

	#[test]
	fn from_parallel_length_mismatch() {
		let err = Attributes::from_parallel(&["name", "pop"], &["Oslo"]).unwrap_err();
		assert_eq!(err.to_string(), "got 2 attribute names but 1 attribute values");
	}

	#[test]
	fn from_parallel_duplicate_name() {
		let err = Attributes::from_parallel(&["id", "id"], &[1, 2]).unwrap_err();
		assert_eq!(err.to_string(), "duplicate attribute name \"id\"");

		let attributes = Attributes::from_parallel(&["id", "ID"], &[1, 2]).unwrap();
		assert_eq!(attributes.len(), 2);
	}

	#[test]
	fn empty_lists_are_fine() -> Result<()> {
		let attributes = Attributes::from_parallel::<&str, i64>(&[], &[])?;
		assert!(attributes.is_empty());
		Ok(())
	}

	#[test]
	fn insert_replaces_in_place() {
		let mut attributes = Attributes::new();
		attributes.insert("name", "Oslo");
		attributes.insert("pop", 700_000);
		attributes.insert("name", "Bergen");
		assert_eq!(attributes.len(), 2);
		assert_eq!(format!("{attributes:?}"), "{\"name\": Text(\"Bergen\"), \"pop\": Integer(700000)}");

		assert_eq!(attributes.remove("name"), Some(FieldValue::from("Bergen")));
		assert_eq!(attributes.remove("name"), None);
		assert_eq!(attributes.names(), vec!["pop"]);
	}
}
