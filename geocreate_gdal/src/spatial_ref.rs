use anyhow::{Result, anyhow};
use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};

/// Resolves an EPSG code with x = longitude/easting, y = latitude/northing,
/// regardless of the axis order the authority defines.
pub fn get_spatial_ref(epsg: u32) -> Result<SpatialRef> {
	let mut srs = SpatialRef::from_epsg(epsg).map_err(|e| anyhow!("unknown EPSG code {epsg}: {e}"))?;
	srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
	Ok(srs)
}
