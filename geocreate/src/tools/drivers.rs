use anyhow::Result;
use clap::Args;
use geocreate_gdal::vector_drivers;
use std::fmt::Write;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {}

pub fn run(_arguments: &Subcommand) -> Result<()> {
	print!("{}", listing()?);
	Ok(())
}

fn listing() -> Result<String> {
	let mut text = String::new();
	for driver in vector_drivers() {
		writeln!(text, "{:<20} {}", driver.short_name, driver.long_name)?;
	}
	Ok(text)
}
