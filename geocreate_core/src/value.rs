use crate::FieldType;
use anyhow::{Result, bail, ensure};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

/// An attribute value as supplied by the caller, before it is matched
/// against the declared type of its field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
	Null,
	Bool(bool),
	Integer(i64),
	Real(f64),
	Text(String),
}

impl Display for FieldValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldValue::Null => f.write_str("null"),
			FieldValue::Bool(v) => write!(f, "{v}"),
			FieldValue::Integer(v) => write!(f, "{v}"),
			FieldValue::Real(v) => write!(f, "{v}"),
			FieldValue::Text(v) => f.write_str(v),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<&String> for FieldValue {
	fn from(value: &String) -> Self {
		FieldValue::Text(value.clone())
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

impl From<i32> for FieldValue {
	fn from(value: i32) -> Self {
		FieldValue::Integer(i64::from(value))
	}
}

impl From<u32> for FieldValue {
	fn from(value: u32) -> Self {
		FieldValue::Integer(i64::from(value))
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		FieldValue::Integer(value)
	}
}

impl From<f32> for FieldValue {
	fn from(value: f32) -> Self {
		FieldValue::Real(f64::from(value))
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Real(value)
	}
}

impl<T> From<Option<T>> for FieldValue
where
	FieldValue: From<T>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(FieldValue::Null, FieldValue::from)
	}
}

impl FieldValue {
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// Converts the value into the representation stored for a field of
	/// `field_type`.
	///
	/// Integer fields get `Integer`, real fields get `Real`, every other type
	/// gets `Text`. `Null` stays `Null` for every type. Dates must be written
	/// the way OGR parses them, e.g. `2024-05-17` or `2024-05-17 08:30:00`.
	pub fn coerce(&self, field_type: FieldType) -> Result<FieldValue> {
		use FieldValue::*;

		lazy_static! {
			static ref REG_DATE: Regex = Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").unwrap();
			static ref REG_DATETIME: Regex =
				Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}[ T]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}(:?\d{2})?)?$").unwrap();
		}

		let coerced = match (field_type, self) {
			(_, Null) => Null,
			(FieldType::Text, v) => Text(v.to_string()),

			(FieldType::Integer | FieldType::Integer64, Integer(v)) => Integer(*v),
			(FieldType::Integer | FieldType::Integer64, Bool(v)) => Integer(i64::from(*v)),
			(FieldType::Integer | FieldType::Integer64, Real(v)) => {
				if v.fract() != 0.0 || !v.is_finite() || v.abs() >= 9.223_372_036_854_776e18 {
					bail!("{v} is not an integer");
				}
				Integer(*v as i64)
			}
			(FieldType::Integer | FieldType::Integer64, Text(v)) => match v.trim() {
				"true" => Integer(1),
				"false" => Integer(0),
				t => match t.parse::<i64>() {
					Ok(v) => Integer(v),
					Err(_) => bail!("{v:?} is not an integer"),
				},
			},

			(FieldType::Real, Integer(v)) => Real(*v as f64),
			(FieldType::Real, Real(v)) => Real(*v),
			(FieldType::Real, Text(v)) => match v.trim().parse::<f64>() {
				Ok(v) => Real(v),
				Err(_) => bail!("{v:?} is not a number"),
			},
			(FieldType::Real, Bool(_)) => bail!("a boolean can not be stored as a real number"),

			(FieldType::Date, Text(v)) => {
				ensure!(REG_DATE.is_match(v.trim()), "{v:?} is not a date, expected YYYY-MM-DD");
				Text(v.trim().to_string())
			}
			(FieldType::DateTime, Text(v)) => {
				ensure!(
					REG_DATE.is_match(v.trim()) || REG_DATETIME.is_match(v.trim()),
					"{v:?} is not a date and time, expected YYYY-MM-DD HH:MM:SS"
				);
				Text(v.trim().to_string())
			}
			(FieldType::Date | FieldType::DateTime, v) => {
				bail!("{field_type} values must be given as text, got {v:?}")
			}
		};

		if field_type == FieldType::Integer
			&& let Integer(v) = coerced
			&& i32::try_from(v).is_err()
		{
			bail!("{v} does not fit into a 32-bit integer field");
		}

		Ok(coerced)
	}
}
