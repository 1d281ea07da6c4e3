use anyhow::Result;
use gdal::vector::{Feature, OGRFieldType};
use geocreate_core::{FieldType, FieldValue};

pub fn ogr_field_type(field_type: FieldType) -> OGRFieldType::Type {
	match field_type {
		FieldType::Text => OGRFieldType::OFTString,
		FieldType::Integer => OGRFieldType::OFTInteger,
		FieldType::Integer64 => OGRFieldType::OFTInteger64,
		FieldType::Real => OGRFieldType::OFTReal,
		FieldType::Date => OGRFieldType::OFTDate,
		FieldType::DateTime => OGRFieldType::OFTDateTime,
	}
}

/// Maps an OGR field type back. List, binary and time fields have no
/// counterpart and yield `None`.
pub fn field_type_from_ogr(field_type: OGRFieldType::Type) -> Option<FieldType> {
	Some(match field_type {
		OGRFieldType::OFTString | OGRFieldType::OFTWideString => FieldType::Text,
		OGRFieldType::OFTInteger => FieldType::Integer,
		OGRFieldType::OFTInteger64 => FieldType::Integer64,
		OGRFieldType::OFTReal => FieldType::Real,
		OGRFieldType::OFTDate => FieldType::Date,
		OGRFieldType::OFTDateTime => FieldType::DateTime,
		_ => return None,
	})
}

/// Writes an already coerced value into field `index` of `feature`.
pub fn set_field(feature: &mut Feature<'_>, index: usize, field_type: FieldType, value: &FieldValue) -> Result<()> {
	match value {
		FieldValue::Null => feature.set_field_null(index)?,
		FieldValue::Bool(v) => feature.set_field_integer(index, i32::from(*v))?,
		FieldValue::Integer(v) if field_type == FieldType::Integer => feature.set_field_integer(index, *v as i32)?,
		FieldValue::Integer(v) => feature.set_field_integer64(index, *v)?,
		FieldValue::Real(v) => feature.set_field_double(index, *v)?,
		FieldValue::Text(v) => feature.set_field_string(index, v)?,
	}
	Ok(())
}

/// Reads field `index` of `feature`. Unset and null fields yield `Null`.
pub fn read_field(feature: &Feature<'_>, index: usize, field_type: FieldType) -> Result<FieldValue> {
	Ok(match field_type {
		FieldType::Integer => FieldValue::from(feature.field_as_integer(index)?),
		FieldType::Integer64 => FieldValue::from(feature.field_as_integer64(index)?),
		FieldType::Real => FieldValue::from(feature.field_as_double(index)?),
		FieldType::Text | FieldType::Date | FieldType::DateTime => FieldValue::from(feature.field_as_string(index)?),
	})
}
