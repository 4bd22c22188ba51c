pub mod build_target;
pub mod generator;
pub mod imported_library;
pub mod link_type;
pub mod misc;
pub mod output_unit;
pub mod project;
pub mod resolver;
pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::Context;

use generator::CMakeWriter;
pub use project::Project;
pub use resolver::{resolve, ResolveError};
use schema::CMAKELISTS_TXT;

/// Resolves the descriptor in `root` and writes `CMakeLists.txt` next to it. Returns the written path.
///
/// Nothing is written when resolution fails. The output file is truncated when it is opened, so a write error
/// afterwards can leave it incomplete.
pub fn generate(root: &Path) -> Result<PathBuf, anyhow::Error> {
	let project = resolve(root)?;

	let out_path = root.join(CMAKELISTS_TXT);
	let mut writer =
		CMakeWriter::create(&out_path).with_context(|| format!("Error creating {}", out_path.display()))?;
	generator::write_project(&project, &mut writer)
		.with_context(|| format!("Error writing to {}", out_path.display()))?;

	log::info!("wrote {}", out_path.display());
	Ok(out_path)
}

/// Resolves the descriptor in `root` and returns the build script without writing it.
pub fn generate_string(root: &Path) -> Result<String, anyhow::Error> {
	let project = resolve(root)?;
	let text = generator::render(&project).context("Error rendering build script")?;
	Ok(text)
}
