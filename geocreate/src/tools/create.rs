use anyhow::{Context, Result};
use clap::Args;
use geocreate_core::{DatasetConfig, FieldDef, PointFeature, csv::read_points_csv};
use geocreate_gdal::{close_dataset, create_dataset};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// dataset to create, e.g. "points.gpkg" or "points.shp"
	#[arg(required = true, verbatim_doc_comment)]
	output: PathBuf,

	/// YAML file with driver, CRS, schema and layer options.
	/// The other arguments override its values.
	#[arg(long, short, value_name = "FILE")]
	config: Option<PathBuf>,

	/// short name of the GDAL driver, e.g. "GPKG".
	/// Guessed from the extension of OUTPUT if missing.
	#[arg(long, short)]
	driver: Option<String>,

	/// EPSG code of the coordinate reference system [default: 4326]
	#[arg(long)]
	crs: Option<u32>,

	/// attribute field as NAME:TYPE or NAME:TYPE:WIDTH, can be repeated.
	/// Types: text, integer, integer64, real, date, datetime
	#[arg(long = "field", short, value_name = "NAME:TYPE")]
	fields: Vec<FieldDef>,

	/// name of the point layer [default: file stem of OUTPUT]
	#[arg(long)]
	layer: Option<String>,

	/// replace OUTPUT if it exists
	#[arg(long)]
	overwrite: bool,

	/// driver specific layer creation option, can be repeated
	#[arg(long = "layer-option", value_name = "KEY=VALUE")]
	layer_options: Vec<String>,

	/// CSV file with one point per row
	#[arg(long, short, value_name = "FILE")]
	input: Option<PathBuf>,

	/// CSV column holding the x coordinate
	#[arg(long, default_value = "x", requires = "input")]
	x_column: String,

	/// CSV column holding the y coordinate
	#[arg(long, default_value = "y", requires = "input")]
	y_column: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = build_config(arguments)?;

	let points: Vec<PointFeature> = match &arguments.input {
		Some(input) => read_points_csv(input, &arguments.x_column, &arguments.y_column)?,
		None => Vec::new(),
	};

	log::info!("creating {:?}", config.path);
	let dataset = create_dataset(&config)?;
	{
		let mut layer = dataset.layer()?;
		for (index, point) in points.iter().enumerate() {
			layer
				.add_feature(point)
				.with_context(|| format!("Failed to write CSV row {}", index + 1))?;
		}
	}
	close_dataset(dataset)?;

	eprintln!("created {:?} with {} points", config.path, points.len());

	Ok(())
}

fn build_config(arguments: &Subcommand) -> Result<DatasetConfig> {
	let mut config = match &arguments.config {
		Some(path) => DatasetConfig::from_path(path)?,
		None => DatasetConfig {
			crs: 4326,
			..Default::default()
		},
	};

	config.path.clone_from(&arguments.output);
	if let Some(driver) = &arguments.driver {
		config.driver.clone_from(driver);
	}
	if let Some(crs) = arguments.crs {
		config.crs = crs;
	}
	for field in &arguments.fields {
		config.schema.push(field.clone())?;
	}
	if let Some(layer) = &arguments.layer {
		config.layer_name = Some(layer.clone());
	}
	if arguments.overwrite {
		config.overwrite = true;
	}
	config.layer_options.extend(arguments.layer_options.iter().cloned());

	log::debug!("dataset config: {config:?}");
	Ok(config)
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use anyhow::Result;
	use assert_fs::TempDir;
	use geocreate_gdal::{FieldValue, PointDataset};
	use pretty_assertions::assert_eq;
	use std::fs;

	#[test]
	fn create_from_csv() -> Result<()> {
		let dir = TempDir::new()?;
		let csv = dir.path().join("cities.csv");
		fs::write(&csv, "lon,lat,name,pop\n10.75,59.91,Oslo,700000\n5.32,60.39,Bergen,\n")?;
		let output = dir.path().join("cities.gpkg");

		run_command(vec![
			"geocreate",
			"create",
			output.to_str().unwrap(),
			"--field",
			"name:text:40",
			"--field",
			"pop:integer",
			"--input",
			csv.to_str().unwrap(),
			"--x-column",
			"lon",
			"--y-column",
			"lat",
		])?;

		let dataset = PointDataset::open(&output, false)?;
		assert_eq!(dataset.layer_name(), "cities");
		let mut layer = dataset.layer()?;
		assert_eq!(layer.epsg(), Some(4326));
		let points = layer.points()?;
		assert_eq!(points.len(), 2);
		assert_eq!(points[0].attribute("name"), Some(&FieldValue::from("Oslo")));
		assert_eq!(points[0].attribute("pop"), Some(&FieldValue::Integer(700_000)));
		assert_eq!(points[1].attribute("pop"), None);
		Ok(())
	}

	#[test]
	fn create_empty_with_config_file() -> Result<()> {
		let dir = TempDir::new()?;
		let config = dir.path().join("dataset.yml");
		fs::write(
			&config,
			"driver: GPKG\ncrs: 3857\nlayer_name: stations\nschema:\n  - { name: id, type: integer64 }\n",
		)?;
		let output = dir.path().join("out.gpkg");

		run_command(vec![
			"geocreate",
			"create",
			output.to_str().unwrap(),
			"--config",
			config.to_str().unwrap(),
			"--field",
			"label:text",
		])?;

		let dataset = PointDataset::open(&output, false)?;
		let layer = dataset.layer()?;
		assert_eq!(layer.name(), "stations");
		assert_eq!(layer.epsg(), Some(3857));
		assert_eq!(layer.schema().names(), vec!["id", "label"]);
		assert_eq!(layer.feature_count(), 0);
		Ok(())
	}

	#[test]
	fn undeclared_csv_column_fails() -> Result<()> {
		let dir = TempDir::new()?;
		let csv = dir.path().join("points.csv");
		fs::write(&csv, "x,y,height\n1,2,100\n")?;
		let output = dir.path().join("points.gpkg");

		let err = run_command(vec![
			"geocreate",
			"create",
			output.to_str().unwrap(),
			"--input",
			csv.to_str().unwrap(),
		])
		.unwrap_err();
		assert_eq!(err.to_string(), "Failed to write CSV row 1");
		assert!(format!("{err:#}").contains("unknown field \"height\""));
		Ok(())
	}

	#[test]
	fn invalid_field_argument() {
		let err = run_command(vec!["geocreate", "create", "out.gpkg", "--field", "name:blob"]).unwrap_err();
		assert!(err.to_string().contains("unknown field type \"blob\""));
	}

	#[test]
	fn coordinate_columns_need_input() {
		let err = run_command(vec!["geocreate", "create", "out.gpkg", "--x-column", "lon"]).unwrap_err();
		assert!(err.to_string().contains("--input <FILE>"));
	}
}
