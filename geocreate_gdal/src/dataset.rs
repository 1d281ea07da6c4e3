use crate::{PointLayer, field::ogr_field_type, get_driver, get_spatial_ref};
use anyhow::{Context, Result};
use gdal::{
	Dataset, DatasetOptions, GdalOpenFlags,
	vector::{FieldDefn, LayerAccess, LayerOptions, OGRwkbGeometryType},
};
use geocreate_core::DatasetConfig;
use geocreate_derive::context;
use std::{
	fmt::Debug,
	path::{Path, PathBuf},
};

/// A GDAL vector dataset holding one point layer.
///
/// Dropping it releases the dataset as well; [`PointDataset::close`] does the
/// same but reports the errors of flushing and releasing.
pub struct PointDataset {
	dataset: Dataset,
	path: PathBuf,
	layer_name: String,
}

impl PointDataset {
	/// Creates the dataset and its point layer with one field per schema entry.
	///
	/// Driver, CRS and schema are checked before anything is written to disk.
	/// A field that GDAL refuses leaves the created dataset behind.
	#[context("Failed to create point dataset {:?}", config.path)]
	pub fn create(config: &DatasetConfig) -> Result<PointDataset> {
		config.validate()?;
		let driver_name = config.driver_name()?;
		let driver = get_driver(&driver_name)?;
		let srs = get_spatial_ref(config.crs)?;

		if config.overwrite && config.path.exists() {
			log::debug!("deleting existing dataset {:?}", config.path);
			driver.delete(&config.path)?;
		}

		let mut dataset = driver.create_vector_only(&config.path)?;
		log::debug!("created {driver_name} dataset {:?}", config.path);

		let name = config.layer_name();
		let options: Vec<&str> = config.layer_options.iter().map(String::as_str).collect();
		let layer = dataset.create_layer(LayerOptions {
			name: &name,
			srs: Some(&srs),
			ty: OGRwkbGeometryType::wkbPoint,
			options: if options.is_empty() { None } else { Some(options.as_slice()) },
		})?;

		for field in &config.schema {
			let defn = FieldDefn::new(&field.name, ogr_field_type(field.field_type))?;
			if let Some(width) = field.width {
				defn.set_width(width);
			}
			defn
				.add_to_layer(&layer)
				.with_context(|| format!("Failed to add field {:?} of type {}", field.name, field.field_type))?;
			log::trace!("added field {:?} ({})", field.name, field.field_type);
		}

		// drivers may adjust the requested name
		let layer_name = layer.name();
		drop(layer);
		log::debug!(
			"created point layer {layer_name:?} (EPSG:{}) with {} fields",
			config.crs,
			config.schema.len()
		);

		Ok(PointDataset {
			dataset,
			path: config.path.clone(),
			layer_name,
		})
	}

	/// Opens an existing dataset and uses its first layer.
	///
	/// With `update` set, points can be appended to that layer.
	#[context("Failed to open point dataset {:?}", path)]
	pub fn open(path: &Path, update: bool) -> Result<PointDataset> {
		let mut open_flags = GdalOpenFlags::GDAL_OF_VECTOR;
		if update {
			open_flags |= GdalOpenFlags::GDAL_OF_UPDATE;
		}
		let dataset = Dataset::open_ex(
			path,
			DatasetOptions {
				open_flags,
				..Default::default()
			},
		)?;
		let layer_name = dataset
			.layers()
			.next()
			.map(|layer| layer.name())
			.context("dataset contains no layer")?;
		log::debug!("opened dataset {path:?} with layer {layer_name:?} (update: {update})");

		Ok(PointDataset {
			dataset,
			path: path.to_path_buf(),
			layer_name,
		})
	}

	pub fn layer(&self) -> Result<PointLayer<'_>> {
		let layer = self
			.dataset
			.layer_by_name(&self.layer_name)
			.with_context(|| format!("dataset {:?} has no layer {:?}", self.path, self.layer_name))?;
		PointLayer::new(layer)
	}

	pub fn layer_name(&self) -> &str {
		&self.layer_name
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn driver_name(&self) -> String {
		self.dataset.driver().short_name()
	}

	/// Flushes pending writes and releases the dataset.
	///
	/// Some drivers only finish the file here, e.g. GPKG updates its
	/// metadata tables and GeoJSON writes the closing brackets.
	pub fn close(self) -> Result<()> {
		let PointDataset { dataset, path, .. } = self;
		dataset
			.close()
			.with_context(|| format!("Failed to close dataset {path:?}"))?;
		log::debug!("closed dataset {path:?}");
		Ok(())
	}
}

impl Debug for PointDataset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PointDataset")
			.field("path", &self.path)
			.field("layer_name", &self.layer_name)
			.finish_non_exhaustive()
	}
}
