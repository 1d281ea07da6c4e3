use crate::field::{field_type_from_ogr, read_field, set_field};
use anyhow::{Context, Result, bail, ensure};
use gdal::vector::{Feature, Geometry, Layer, LayerAccess, OGRwkbGeometryType};
use geocreate_core::{Attributes, FieldDef, FieldType, FieldValue, PointFeature, Schema};
use geocreate_derive::context;
use std::fmt::Debug;

/// The point layer of a [`PointDataset`](crate::PointDataset).
///
/// Borrows its dataset, so it can not be used after the dataset was closed.
pub struct PointLayer<'a> {
	layer: Layer<'a>,
	name: String,
	schema: Schema,
}

impl<'a> PointLayer<'a> {
	/// Wraps an OGR layer, reading its field definitions.
	///
	/// Fields without a matching [`FieldType`] are treated as text.
	pub(crate) fn new(layer: Layer<'a>) -> Result<PointLayer<'a>> {
		let name = layer.name();
		let mut fields = Vec::new();
		for field in layer.defn().fields() {
			let field_name = field.name();
			let field_type = field_type_from_ogr(field.field_type()).unwrap_or_else(|| {
				log::warn!("field {field_name:?} of layer {name:?} has an unsupported type, treating it as text");
				FieldType::Text
			});
			let mut def = FieldDef::new(&field_name, field_type);
			if field_type == FieldType::Text && field.width() > 0 {
				def.width = Some(field.width());
			}
			fields.push(def);
		}
		let schema = Schema::new(fields)?;
		log::trace!("layer {name:?} has fields {schema:?}");

		Ok(PointLayer { layer, name, schema })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The declared fields, in layer order.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn feature_count(&self) -> u64 {
		self.layer.feature_count()
	}

	/// EPSG code of the layer's coordinate reference system, if it has one
	/// GDAL can identify.
	pub fn epsg(&self) -> Option<u32> {
		let mut srs = self.layer.spatial_ref()?;
		if srs.auth_code().is_err() {
			srs.auto_identify_epsg().ok()?;
		}
		u32::try_from(srs.auth_code().ok()?).ok()
	}

	/// Appends one point feature.
	///
	/// Every attribute name must match a declared field (case-insensitively),
	/// no two names may match the same field, and every value must be
	/// convertible to the type of its field. All of this is checked before
	/// anything is written, so a failing call adds nothing.
	#[context("Failed to add point ({x}, {y}) to layer {:?}", self.name)]
	pub fn add_point(&mut self, x: f64, y: f64, attributes: &Attributes) -> Result<()> {
		ensure!(x.is_finite() && y.is_finite(), "coordinates must be finite numbers");

		let mut values: Vec<(usize, FieldType, FieldValue)> = Vec::with_capacity(attributes.len());
		let mut used: Vec<Option<&str>> = vec![None; self.schema.len()];
		for (name, value) in attributes.iter() {
			let Some(index) = self.schema.position(name) else {
				bail!(
					"unknown field {name:?}, declared fields are: [{}]",
					self.schema.names().join(", ")
				);
			};
			let field = &self.schema.fields()[index];
			if let Some(other) = used[index] {
				bail!("attributes {other:?} and {name:?} both refer to field {:?}", field.name);
			}
			used[index] = Some(name);
			let value = value
				.coerce(field.field_type)
				.with_context(|| format!("invalid value for field {:?}", field.name))?;
			values.push((index, field.field_type, value));
		}

		let mut geometry = Geometry::empty(OGRwkbGeometryType::wkbPoint)?;
		geometry.add_point_2d((x, y));

		let mut feature = Feature::new(self.layer.defn())?;
		feature.set_geometry(geometry)?;
		for (index, field_type, value) in &values {
			set_field(&mut feature, *index, *field_type, value)?;
		}
		feature.create(&self.layer)?;
		log::trace!("added point ({x}, {y}) with {} attributes to {:?}", values.len(), self.name);

		Ok(())
	}

	pub fn add_feature(&mut self, feature: &PointFeature) -> Result<()> {
		self.add_point(feature.point.x, feature.point.y, &feature.attributes)
	}

	/// Reads all features back, in storage order.
	///
	/// Null fields are left out of the attributes.
	#[context("Failed to read points of layer {:?}", self.name)]
	pub fn points(&mut self) -> Result<Vec<PointFeature>> {
		self.layer.reset_feature_reading();

		let mut points = Vec::new();
		for feature in self.layer.features() {
			let number = points.len() + 1;
			let geometry = feature
				.geometry()
				.with_context(|| format!("feature #{number} has no geometry"))?;
			ensure!(
				is_point(geometry.geometry_type()),
				"feature #{number} is not a point"
			);
			ensure!(geometry.point_count() > 0, "feature #{number} has an empty point");
			let (x, y, _) = geometry.get_point(0);

			let mut attributes = Attributes::new();
			for (index, field) in self.schema.iter().enumerate() {
				let value = read_field(&feature, index, field.field_type)?;
				if !value.is_null() {
					attributes.insert(&field.name, value);
				}
			}
			points.push(PointFeature::new(x, y, attributes));
		}
		self.layer.reset_feature_reading();

		Ok(points)
	}
}

fn is_point(geometry_type: OGRwkbGeometryType::Type) -> bool {
	matches!(
		geometry_type,
		OGRwkbGeometryType::wkbPoint
			| OGRwkbGeometryType::wkbPoint25D
			| OGRwkbGeometryType::wkbPointM
			| OGRwkbGeometryType::wkbPointZM
	)
}

impl Debug for PointLayer<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PointLayer")
			.field("name", &self.name)
			.field("schema", &self.schema)
			.finish_non_exhaustive()
	}
}
