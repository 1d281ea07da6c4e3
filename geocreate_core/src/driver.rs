use std::path::Path;

/// Guesses the GDAL vector driver for a file from its extension.
pub fn driver_for_extension(path: &Path) -> Option<&'static str> {
	let extension = path.extension()?.to_str()?.to_ascii_lowercase();
	Some(match extension.as_str() {
		"gpkg" => "GPKG",
		"shp" => "ESRI Shapefile",
		"geojson" | "json" => "GeoJSON",
		"geojsonl" | "geojsons" => "GeoJSONSeq",
		"fgb" => "FlatGeobuf",
		"csv" => "CSV",
		"kml" => "KML",
		"gml" => "GML",
		"sqlite" => "SQLite",
		_ => return None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("points.gpkg", Some("GPKG"))]
	#[case("dir/points.SHP", Some("ESRI Shapefile"))]
	#[case("a.geojson", Some("GeoJSON"))]
	#[case("a.fgb", Some("FlatGeobuf"))]
	#[case("a.test", None)]
	#[case("noextension", None)]
	fn guess(#[case] path: &str, #[case] expected: Option<&str>) {
		assert_eq!(driver_for_extension(Path::new(path)), expected);
	}
}
