use anyhow::{Context, Result, ensure};
use gdal::{Driver, DriverManager, Metadata};

/// Name and description of a GDAL driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverInfo {
	pub short_name: String,
	pub long_name: String,
}

/// Looks up a driver by its short name and checks that it can create vector datasets.
pub fn get_driver(name: &str) -> Result<Driver> {
	let driver = DriverManager::get_driver_by_name(name).with_context(|| format!("unknown GDAL driver {name:?}"))?;
	ensure!(
		has_capability(&driver, "DCAP_VECTOR"),
		"GDAL driver {name:?} does not support vector data"
	);
	ensure!(
		has_capability(&driver, "DCAP_CREATE"),
		"GDAL driver {name:?} can not create datasets"
	);
	Ok(driver)
}

/// All registered drivers that can create vector datasets, sorted by short name.
pub fn vector_drivers() -> Vec<DriverInfo> {
	DriverManager::register_all();
	let mut drivers: Vec<DriverInfo> = (0..DriverManager::count())
		.filter_map(|index| DriverManager::get_driver(index).ok())
		.filter(|driver| has_capability(driver, "DCAP_VECTOR") && has_capability(driver, "DCAP_CREATE"))
		.map(|driver| DriverInfo {
			short_name: driver.short_name(),
			long_name: driver.long_name(),
		})
		.collect();
	drivers.sort_by(|a, b| a.short_name.cmp(&b.short_name));
	drivers
}

fn has_capability(driver: &Driver, capability: &str) -> bool {
	driver
		.metadata_item(capability, "")
		.is_some_and(|value| value.eq_ignore_ascii_case("YES"))
}
