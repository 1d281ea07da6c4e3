use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use std::{
	fmt::{Debug, Display},
	str::FromStr,
};

/// Semantic type of an attribute field.
///
/// Maps one-to-one onto an OGR field type when the layer is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	#[serde(alias = "string", alias = "str")]
	Text,
	#[serde(alias = "int", alias = "int32")]
	Integer,
	#[serde(alias = "int64", alias = "long")]
	Integer64,
	#[serde(alias = "double", alias = "float")]
	Real,
	Date,
	DateTime,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Integer => "integer",
			FieldType::Integer64 => "integer64",
			FieldType::Real => "real",
			FieldType::Date => "date",
			FieldType::DateTime => "datetime",
		}
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldType {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"text" | "string" | "str" => FieldType::Text,
			"integer" | "int" | "int32" => FieldType::Integer,
			"integer64" | "int64" | "long" => FieldType::Integer64,
			"real" | "double" | "float" => FieldType::Real,
			"date" => FieldType::Date,
			"datetime" => FieldType::DateTime,
			_ => bail!(
				"unknown field type {s:?}, expected one of: text, integer, integer64, real, date, datetime"
			),
		})
	}
}

/// One declared attribute field of a layer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
	pub name: String,
	#[serde(rename = "type")]
	pub field_type: FieldType,
	/// Maximum width, only honoured by drivers with fixed-width fields (e.g. shapefiles).
	#[serde(default)]
	pub width: Option<i32>,
}

impl FieldDef {
	pub fn new(name: &str, field_type: FieldType) -> FieldDef {
		FieldDef {
			name: name.to_string(),
			field_type,
			width: None,
		}
	}

	pub fn with_width(mut self, width: i32) -> FieldDef {
		self.width = Some(width);
		self
	}
}

/// Parses `name:type` or `name:type:width`, the form used on the command line.
impl FromStr for FieldDef {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		let parts: Vec<&str> = s.split(':').collect();
		ensure!(
			parts.len() == 2 || parts.len() == 3,
			"field definition {s:?} must look like name:type or name:type:width"
		);
		let mut field = FieldDef::new(parts[0].trim(), parts[1].parse()?);
		if let Some(width) = parts.get(2) {
			let width: i32 = width
				.trim()
				.parse()
				.with_context(|| format!("invalid width in field definition {s:?}"))?;
			ensure!(width > 0, "width in field definition {s:?} must be positive");
			field.width = Some(width);
		}
		Ok(field)
	}
}

/// Ordered list of attribute fields.
///
/// Field names are unique, compared ASCII case-insensitively like OGR does.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Schema {
	fields: Vec<FieldDef>,
}

impl Schema {
	pub fn new(fields: Vec<FieldDef>) -> Result<Schema> {
		let schema = Schema { fields };
		schema.validate()?;
		Ok(schema)
	}

	/// Builds a schema from two parallel lists, as callers coming from
	/// column-oriented sources often hold them.
	pub fn from_parallel<S: AsRef<str>>(names: &[S], types: &[FieldType]) -> Result<Schema> {
		ensure!(
			names.len() == types.len(),
			"schema has {} field names but {} field types",
			names.len(),
			types.len()
		);
		Schema::new(
			names
				.iter()
				.zip(types)
				.map(|(name, field_type)| FieldDef::new(name.as_ref(), *field_type))
				.collect(),
		)
	}

	pub fn push(&mut self, field: FieldDef) -> Result<()> {
		ensure!(!field.name.trim().is_empty(), "field name must not be empty");
		ensure!(
			self.get(&field.name).is_none(),
			"duplicate field name {:?}",
			field.name
		);
		self.fields.push(field);
		Ok(())
	}

	/// Checks the invariants that deserialization cannot enforce.
	pub fn validate(&self) -> Result<()> {
		for (index, field) in self.fields.iter().enumerate() {
			ensure!(!field.name.trim().is_empty(), "field #{index} has an empty name");
			if let Some(width) = field.width {
				ensure!(width > 0, "field {:?} has a non-positive width {width}", field.name);
			}
			let duplicate = self.fields[..index]
				.iter()
				.any(|f| f.name.eq_ignore_ascii_case(&field.name));
			ensure!(!duplicate, "duplicate field name {:?}", field.name);
		}
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|f| f.name.eq_ignore_ascii_case(name))
	}

	pub fn fields(&self) -> &[FieldDef] {
		&self.fields
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
		self.fields.iter()
	}

	pub fn names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl<'a> IntoIterator for &'a Schema {
	type Item = &'a FieldDef;
	type IntoIter = std::slice::Iter<'a, FieldDef>;
	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}

impl Debug for Schema {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.fields.iter().map(|field| (&field.name, field.field_type)))
			.finish()
	}
}
