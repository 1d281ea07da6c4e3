//! Creating, filling and reading point datasets through GDAL/OGR.
//!
//! The life cycle is always the same:
//!
//! ```no_run
//! use geocreate_gdal::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = Schema::from_parallel(&["name", "pop"], &[FieldType::Text, FieldType::Integer])?;
//! let dataset = create_dataset(&DatasetConfig::new("cities.gpkg", "GPKG", 4326, schema))?;
//! {
//! 	let mut layer = dataset.layer()?;
//! 	let attributes = Attributes::from_parallel(&["name", "pop"], &[FieldValue::from("Oslo"), FieldValue::from(700_000)])?;
//! 	add_point(&mut layer, 10.75, 59.91, &attributes)?;
//! }
//! close_dataset(dataset)?;
//! # Ok(())
//! # }
//! ```

mod dataset;
mod driver;
mod field;
mod layer;
mod spatial_ref;

pub use dataset::PointDataset;
pub use driver::{DriverInfo, get_driver, vector_drivers};
pub use layer::PointLayer;
pub use spatial_ref::get_spatial_ref;

pub use geocreate_core::{
	Attributes, DatasetConfig, FieldDef, FieldType, FieldValue, Point, PointFeature, Schema, driver_for_extension,
};

use anyhow::Result;

/// Creates the dataset described by `config` with one empty point layer.
///
/// Fetch the layer with [`PointDataset::layer`].
pub fn create_dataset(config: &DatasetConfig) -> Result<PointDataset> {
	PointDataset::create(config)
}

/// Appends one point with the given attribute values to `layer`.
pub fn add_point(layer: &mut PointLayer<'_>, x: f64, y: f64, attributes: &Attributes) -> Result<()> {
	layer.add_point(x, y, attributes)
}

/// Flushes and releases the dataset.
pub fn close_dataset(dataset: PointDataset) -> Result<()> {
	dataset.close()
}
