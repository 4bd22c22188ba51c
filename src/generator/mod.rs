mod cmake;

use std::io::{self, Write};

pub use cmake::CMakeWriter;

use crate::project::Project;

/// Writes every section of the build script in order: version and name, imported libraries, outputs,
/// links, language standards, build targets.
pub fn write_project<W: Write>(project: &Project, writer: &mut CMakeWriter<W>) -> io::Result<()> {
	writer.write_version(&project.info.min_cmake_version)?;
	writer.write_project_name(&project.info.name)?;

	for lib in &project.imported_libraries {
		log::debug!("   imported library: {}", lib.name);
		writer.write_imported_library(lib)?;
	}
	for output in &project.outputs {
		log::debug!("   output: {}", output.name);
		writer.write_output(output)?;
	}
	for edge in &project.link_edges {
		if !edge.targets.is_empty() {
			writer.write_link_libraries(edge)?;
		}
	}

	writer.write_cpp_standard(&project.cpp_standards, &project.outputs)?;
	writer.write_c_standard(&project.c_standards, &project.outputs)?;

	if let Some(initial) = project.initial_target() {
		writer.write_default_build_target(initial)?;
	}
	writer.write_build_target_list(&project.targets)?;
	for target in &project.targets {
		writer.write_build_target(target)?;
	}
	writer.flush()
}

/// Renders the whole build script into a string.
pub fn render(project: &Project) -> io::Result<String> {
	let mut writer = CMakeWriter::new(Vec::new());
	write_project(project, &mut writer)?;
	Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
