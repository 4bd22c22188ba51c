use std::path::PathBuf;

use serde::Serialize;

use crate::{
	build_target::BuildTarget, //
	imported_library::ImportedLibrary,
	link_type::LinkEdge,
	output_unit::OutputUnit,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
	pub name: String,
	pub min_cmake_version: String,
	pub path: PathBuf,
}

/// Allowed standards for one language plus the declared default, which may be empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LanguageStandards {
	pub default: String,
	pub allowed: Vec<String>,
}

impl LanguageStandards {
	/// The declared default when it is one of the allowed standards, the first allowed standard otherwise.
	pub fn active(&self) -> &str {
		if !self.default.is_empty() && self.allowed.contains(&self.default) {
			&self.default
		} else {
			self.allowed.first().map_or("", String::as_str)
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
	pub info: ProjectInfo,
	pub c_standards: LanguageStandards,
	pub cpp_standards: LanguageStandards,
	pub targets: Vec<BuildTarget>,
	pub default_target: Option<String>,
	pub outputs: Vec<OutputUnit>,
	pub imported_libraries: Vec<ImportedLibrary>,
	pub link_edges: Vec<LinkEdge>,
}

impl Project {
	/// Name of the configuration selected when `CMAKE_BUILD_TYPE` is empty.
	pub fn initial_target(&self) -> Option<&str> {
		match &self.default_target {
			Some(x) => Some(x.as_str()),
			None => self.targets.first().map(|x| x.name.as_str()),
		}
	}

	pub fn output(&self, name: &str) -> Option<&OutputUnit> {
		self.outputs.iter().find(|x| x.name == name)
	}

	pub fn imported_library(&self, name: &str) -> Option<&ImportedLibrary> {
		self.imported_libraries.iter().find(|x| x.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn standards(default: &str, allowed: &[&str]) -> LanguageStandards {
		LanguageStandards { default: default.to_owned(), allowed: allowed.iter().map(|x| x.to_string()).collect() }
	}

	#[test]
	fn test_active_standard() {
		assert_eq!(standards("17", &["11", "14", "17"]).active(), "17");
		assert_eq!(standards("", &["11", "14", "17"]).active(), "11");
		assert_eq!(standards("20", &["11", "14", "17"]).active(), "11");
		assert_eq!(standards("", &[]).active(), "");
	}
}
