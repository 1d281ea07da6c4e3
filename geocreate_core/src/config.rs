use crate::{Schema, driver_for_extension};
use anyhow::{Result, bail, ensure};
use geocreate_derive::context;
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};

/// Everything needed to create a point dataset.
///
/// Can be built in code or loaded from YAML:
///
/// ```yaml
/// path: points.gpkg
/// driver: GPKG
/// crs: 4326
/// schema:
///   - { name: name, type: text }
///   - { name: pop, type: integer }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
	/// Where the dataset is created.
	#[serde(default)]
	pub path: PathBuf,

	/// Short name of the GDAL driver, e.g. "GPKG" or "ESRI Shapefile".
	/// If empty, it is guessed from the extension of `path`.
	#[serde(default)]
	pub driver: String,

	/// EPSG code of the coordinate reference system.
	pub crs: u32,

	/// Attribute fields of the point layer, in order.
	#[serde(default)]
	pub schema: Schema,

	/// Name of the point layer. Defaults to the file stem of `path`.
	#[serde(default)]
	pub layer_name: Option<String>,

	/// Delete an existing dataset at `path` before creating the new one.
	#[serde(default)]
	pub overwrite: bool,

	/// Driver specific layer creation options like "FID=fid".
	#[serde(default)]
	pub layer_options: Vec<String>,
}

impl DatasetConfig {
	pub fn new(path: impl Into<PathBuf>, driver: &str, crs: u32, schema: Schema) -> DatasetConfig {
		DatasetConfig {
			path: path.into(),
			driver: driver.to_string(),
			crs,
			schema,
			..Default::default()
		}
	}

	pub fn with_layer_name(mut self, name: &str) -> DatasetConfig {
		self.layer_name = Some(name.to_string());
		self
	}

	pub fn with_overwrite(mut self, overwrite: bool) -> DatasetConfig {
		self.overwrite = overwrite;
		self
	}

	pub fn with_layer_option(mut self, option: &str) -> DatasetConfig {
		self.layer_options.push(option.to_string());
		self
	}

	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Loads a config file. A relative `path` inside it is taken relative to
	/// the directory of the config file.
	#[context("Failed to read dataset config {:?}", path)]
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path)?;
		let mut config = DatasetConfig::from_reader(BufReader::new(file))?;
		if config.path.is_relative()
			&& !config.path.as_os_str().is_empty()
			&& let Some(base) = path.parent()
		{
			config.path = base.join(&config.path);
		}
		Ok(config)
	}

	/// The driver to use: the configured one, or a guess from the file extension.
	pub fn driver_name(&self) -> Result<String> {
		if !self.driver.trim().is_empty() {
			return Ok(self.driver.trim().to_string());
		}
		match driver_for_extension(&self.path) {
			Some(name) => Ok(name.to_string()),
			None => bail!("no driver given and none is known for the extension of {:?}", self.path),
		}
	}

	pub fn layer_name(&self) -> String {
		if let Some(name) = &self.layer_name {
			return name.clone();
		}
		self
			.path
			.file_stem()
			.and_then(|stem| stem.to_str())
			.filter(|stem| !stem.is_empty())
			.unwrap_or("points")
			.to_string()
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(!self.path.as_os_str().is_empty(), "no dataset path given");
		ensure!(self.crs > 0, "invalid EPSG code {}", self.crs);
		if let Some(name) = &self.layer_name {
			ensure!(!name.trim().is_empty(), "layer name must not be empty");
		}
		for option in &self.layer_options {
			ensure!(
				option.contains('='),
				"layer option {option:?} must look like KEY=VALUE"
			);
		}
		self.schema.validate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{FieldDef, FieldType};
	use assert_fs::{TempDir, prelude::*};
	use pretty_assertions::assert_eq;

	const YAML: &str = "
path: cities.gpkg
driver: GPKG
crs: 4326
layer_name: cities
overwrite: true
layer_options: [\"FID=fid\"]
schema:
  - { name: name, type: text, width: 80 }
  - { name: pop, type: integer }
  - { name: area, type: double }
";

	#[test]
	fn parse_full_config() -> Result<()> {
		let config = DatasetConfig::from_string(YAML)?;
		assert_eq!(
			config,
			DatasetConfig::new(
				"cities.gpkg",
				"GPKG",
				4326,
				Schema::new(vec![
					FieldDef::new("name", FieldType::Text).with_width(80),
					FieldDef::new("pop", FieldType::Integer),
					FieldDef::new("area", FieldType::Real),
				])?
			)
			.with_layer_name("cities")
			.with_overwrite(true)
			.with_layer_option("FID=fid")
		);
		config.validate()
	}

	#[test]
	fn parse_minimal_config() -> Result<()> {
		let config = DatasetConfig::from_string("crs: 3857")?;
		assert_eq!(config.crs, 3857);
		assert!(config.schema.is_empty());
		assert!(!config.overwrite);
		assert_eq!(config.validate().unwrap_err().to_string(), "no dataset path given");
		Ok(())
	}

	#[test]
	fn reject_unknown_keys() {
		assert!(DatasetConfig::from_string("crs: 4326\nepsg: 4326").is_err());
		assert!(DatasetConfig::from_string("crs: 4326\nschema: [{ name: a, type: blob }]").is_err());
	}

	#[test]
	fn duplicate_fields_fail_validation() -> Result<()> {
		let config = DatasetConfig::from_string(
			"path: a.gpkg\ncrs: 4326\nschema: [{ name: a, type: text }, { name: A, type: int }]",
		)?;
		assert_eq!(config.validate().unwrap_err().to_string(), "duplicate field name \"A\"");
		Ok(())
	}

	#[test]
	fn driver_and_layer_defaults() -> Result<()> {
		let config = DatasetConfig::new("out/points.shp", "", 4326, Schema::default());
		assert_eq!(config.driver_name()?, "ESRI Shapefile");
		assert_eq!(config.layer_name(), "points");

		let config = DatasetConfig::new("out/points.test", " GPKG ", 4326, Schema::default()).with_layer_name("p");
		assert_eq!(config.driver_name()?, "GPKG");
		assert_eq!(config.layer_name(), "p");

		let config = DatasetConfig::new("out/points.test", "", 4326, Schema::default());
		assert!(config.driver_name().is_err());
		Ok(())
	}

	#[test]
	fn invalid_layer_option() {
		let config = DatasetConfig::new("a.gpkg", "GPKG", 4326, Schema::default()).with_layer_option("FID");
		assert_eq!(
			config.validate().unwrap_err().to_string(),
			"layer option \"FID\" must look like KEY=VALUE"
		);
	}

	#[test]
	fn from_path_resolves_relative_dataset_path() -> Result<()> {
		let dir = TempDir::new()?;
		let file = dir.child("config.yml");
		file.write_str(YAML)?;

		let config = DatasetConfig::from_path(file.path())?;
		assert_eq!(config.path, dir.path().join("cities.gpkg"));

		let err = DatasetConfig::from_path(&dir.path().join("missing.yml")).unwrap_err();
		assert!(err.to_string().starts_with("Failed to read dataset config"));
		Ok(())
	}
}
