use crate::{Attributes, FieldValue};
use std::fmt::Debug;

/// A position in the coordinate reference system of its layer.
///
/// `x` is the easting or longitude, `y` the northing or latitude.
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Point {
		Point { x, y }
	}
}

impl From<(f64, f64)> for Point {
	fn from((x, y): (f64, f64)) -> Self {
		Point { x, y }
	}
}

impl Debug for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {}]", self.x, self.y)
	}
}

/// One point geometry plus its attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFeature {
	pub point: Point,
	pub attributes: Attributes,
}

impl PointFeature {
	pub fn new(x: f64, y: f64, attributes: Attributes) -> PointFeature {
		PointFeature {
			point: Point::new(x, y),
			attributes,
		}
	}

	pub fn set_attribute<V>(&mut self, name: &str, value: V)
	where
		FieldValue: From<V>,
	{
		self.attributes.insert(name, value);
	}

	pub fn attribute(&self, name: &str) -> Option<&FieldValue> {
		self.attributes.get(name)
	}
}
