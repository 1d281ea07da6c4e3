//! Reading point features from CSV files.

use crate::{Attributes, FieldValue, PointFeature};
use anyhow::{Context, Result};
use geocreate_derive::context;
use std::{fs::File, io::Read, path::Path};

/// Reads one point feature per CSV record.
///
/// The columns `x_column` and `y_column` hold the coordinates; every other
/// column becomes a text attribute, converted to the field type when the
/// point is added. Empty cells become `Null`.
#[context("Failed to read points from CSV file {:?}", path)]
pub fn read_points_csv(path: &Path, x_column: &str, y_column: &str) -> Result<Vec<PointFeature>> {
	let file = File::open(path)?;
	read_points(file, x_column, y_column)
}

pub fn read_points<R: Read>(reader: R, x_column: &str, y_column: &str) -> Result<Vec<PointFeature>> {
	let mut csv_reader = ::csv::Reader::from_reader(reader);
	let header: Vec<String> = csv_reader
		.headers()
		.context("Failed to read CSV headers")?
		.iter()
		.map(|s| s.trim().to_string())
		.collect();

	let find = |name: &str| {
		header
			.iter()
			.position(|h| h == name)
			.with_context(|| format!("CSV has no column {name:?}, found: {}", header.join(", ")))
	};
	let x_index = find(x_column)?;
	let y_index = find(y_column)?;

	let mut points = Vec::new();
	for (row, record) in csv_reader.records().enumerate() {
		let record = record.context("Failed to read CSV record")?;
		let coordinate = |index: usize| -> Result<f64> {
			let cell = record.get(index).unwrap_or_default().trim();
			cell
				.parse::<f64>()
				.with_context(|| format!("invalid coordinate {cell:?} in column {:?} of row {}", header[index], row + 1))
		};
		let x = coordinate(x_index)?;
		let y = coordinate(y_index)?;

		let mut attributes = Attributes::new();
		for (index, name) in header.iter().enumerate() {
			if index == x_index || index == y_index {
				continue;
			}
			let value = match record.get(index).unwrap_or_default() {
				"" => FieldValue::Null,
				cell => FieldValue::from(cell),
			};
			attributes.insert(name, value);
		}
		points.push(PointFeature::new(x, y, attributes));
	}
	log::debug!("read {} points from CSV", points.len());

	Ok(points)
}
