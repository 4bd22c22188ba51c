use std::{
	path::{Path, PathBuf},
	process::ExitCode,
};

use clap::Parser;

use cmakegen::{schema::DESCRIPTOR_FILE, ResolveError};

/// Generates CMakeLists.txt from the cmake_data.json in a project root.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
	/// Project root directory containing cmake_data.json
	#[arg(default_value = ".")]
	root: PathBuf,

	/// Print the generated script instead of writing CMakeLists.txt
	#[arg(long)]
	stdout: bool,

	/// Print the resolved project as JSON and exit
	#[arg(long)]
	dump_model: bool,
}

fn report(root: &Path, e: &anyhow::Error) {
	match e.downcast_ref::<ResolveError>() {
		Some(ResolveError::NotFound { .. }) => println!(
			"ERROR: JSON file not found in directory {} ... make sure {} exists and is located in your project's root directory. Also make sure the directory argument given IS the root directory of your project",
			root.display(),
			DESCRIPTOR_FILE
		),
		Some(ResolveError::Parse { source, .. }) => println!("Problem with JSON: {}", source),
		Some(ResolveError::InvalidRoot { .. }) => println!("(TYPE) ERROR: {}", e),
		Some(err) if err.is_schema_error() => println!("ERROR: Problem with JSON file. See below:\n\n{}", err),
		_ => println!("ERROR: {:#}", e),
	}
}

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
	if cli.dump_model {
		let project = cmakegen::resolve(&cli.root)?;
		println!("{}", serde_json::to_string_pretty(&project)?);
	} else if cli.stdout {
		print!("{}", cmakegen::generate_string(&cli.root)?);
	} else {
		cmakegen::generate(&cli.root)?;
		println!("CMakeLists.txt file written successfully!");
	}
	Ok(())
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().filter_or("CMAKEGEN_LOG", "off"))
		.format_timestamp(None)
		.init();

	let cli = Cli::parse();
	log::debug!("project root: {}", cli.root.display());

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			report(&cli.root, &e);
			ExitCode::FAILURE
		}
	}
}
