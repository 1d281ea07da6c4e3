mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Create a point dataset, optionally filled from a CSV file
	Create(tools::create::Subcommand),

	/// Show layer, CRS, fields and points of a dataset
	Info(tools::info::Subcommand),

	/// List the GDAL drivers that can create vector datasets
	Drivers(tools::drivers::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Create(arguments) => tools::create::run(arguments),
		Commands::Info(arguments) => tools::info::run(arguments),
		Commands::Drivers(arguments) => tools::drivers::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["geocreate"]).unwrap_err().to_string();
		assert!(err.starts_with("Create point datasets with a coordinate reference system"));
		assert!(err.contains("\nUsage: geocreate [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["geocreate", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("geocreate "));
	}

	#[test]
	fn create_subcommand() {
		let output = run_command(vec!["geocreate", "create"]).unwrap_err().to_string();
		assert!(output.starts_with("Create a point dataset"));
	}

	#[test]
	fn info_subcommand() {
		let output = run_command(vec!["geocreate", "info"]).unwrap_err().to_string();
		assert!(output.starts_with("Show layer, CRS, fields and points of a dataset"));
	}
}
