use anyhow::Result;
use clap::Args;
use geocreate_gdal::{PointDataset, PointLayer};
use std::{fmt::Write, path::PathBuf};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// dataset to inspect
	#[arg(required = true)]
	filename: PathBuf,

	/// also list every point with its attributes
	#[arg(long, short)]
	points: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let dataset = PointDataset::open(&arguments.filename, false)?;
	let mut layer = dataset.layer()?;
	print!("{}", describe(&dataset, &mut layer, arguments.points)?);
	Ok(())
}

fn describe(dataset: &PointDataset, layer: &mut PointLayer<'_>, with_points: bool) -> Result<String> {
	let mut text = String::new();
	writeln!(text, "dataset: {:?}", dataset.path())?;
	writeln!(text, "driver: {}", dataset.driver_name())?;
	writeln!(text, "layer: {}", layer.name())?;
	match layer.epsg() {
		Some(epsg) => writeln!(text, "crs: EPSG:{epsg}")?,
		None => writeln!(text, "crs: unknown")?,
	}
	writeln!(text, "points: {}", layer.feature_count())?;

	if layer.schema().is_empty() {
		writeln!(text, "fields: none")?;
	} else {
		writeln!(text, "fields:")?;
		for field in layer.schema() {
			match field.width {
				Some(width) => writeln!(text, "  {}: {}({width})", field.name, field.field_type)?,
				None => writeln!(text, "  {}: {}", field.name, field.field_type)?,
			}
		}
	}

	if with_points {
		for point in layer.points()? {
			let attributes: Vec<String> = point
				.attributes
				.iter()
				.map(|(name, value)| format!("{name}={value}"))
				.collect();
			writeln!(text, "{:?} {}", point.point, attributes.join(" "))?;
		}
	}

	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use assert_fs::TempDir;
	use geocreate_gdal::{Attributes, DatasetConfig, FieldType, FieldValue, Schema, close_dataset, create_dataset};
	use pretty_assertions::assert_eq;

	#[test]
	fn describe_dataset() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("towns.gpkg");
		let schema = Schema::from_parallel(&["name", "pop"], &[FieldType::Text, FieldType::Integer])?;
		let dataset = create_dataset(&DatasetConfig::new(&path, "GPKG", 4326, schema))?;
		{
			let mut layer = dataset.layer()?;
			layer.add_point(
				10.5,
				59.5,
				&Attributes::from(vec![("name", FieldValue::from("Oslo")), ("pop", FieldValue::from(7))]),
			)?;
			layer.add_point(5.25, 60.5, &Attributes::from(vec![("name", FieldValue::from("Bergen"))]))?;
		}
		close_dataset(dataset)?;

		let dataset = PointDataset::open(&path, false)?;
		let mut layer = dataset.layer()?;
		let text = describe(&dataset, &mut layer, true)?;
		let lines: Vec<&str> = text.lines().skip(1).collect();
		assert_eq!(
			lines,
			vec![
				"driver: GPKG",
				"layer: towns",
				"crs: EPSG:4326",
				"points: 2",
				"fields:",
				"  name: text",
				"  pop: integer",
				"[10.5, 59.5] name=Oslo pop=7",
				"[5.25, 60.5] name=Bergen",
			]
		);
		Ok(())
	}

	#[test]
	fn missing_file() {
		let err = run_command(vec!["geocreate", "info", "../testdata/not-existing.gpkg"]).unwrap_err();
		assert!(err.to_string().starts_with("Failed to open point dataset"));
	}
}
