use serde::Serialize;

use crate::{
	imported_library::ImportedLibrary, //
	misc::{imported_identifier, output_identifier, with_index},
	output_unit::OutputUnit,
};

/// A resolved `link_libs` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkRef {
	Output { name: String },
	Imported { name: String, file_count: usize },
}

impl LinkRef {
	pub fn from_output(output: &OutputUnit) -> Self {
		LinkRef::Output { name: output.name.clone() }
	}

	pub fn from_imported(lib: &ImportedLibrary) -> Self {
		LinkRef::Imported { name: lib.name.clone(), file_count: lib.lib_files.len() }
	}

	pub fn name(&self) -> &str {
		match self {
			LinkRef::Output { name } => name,
			LinkRef::Imported { name, .. } => name,
		}
	}

	/// Identifiers passed to `target_link_libraries`.
	pub fn link_names(&self) -> Vec<String> {
		match self {
			LinkRef::Output { name } => vec![output_identifier(name)],
			LinkRef::Imported { name, file_count } => {
				let base = imported_identifier(name);
				(0..*file_count).map(|i| with_index(&base, i)).collect()
			}
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkEdge {
	pub source: String,
	pub targets: Vec<LinkRef>,
}

#[test]
fn test_link_names() {
	let out = LinkRef::Output { name: "core".to_owned() };
	assert_eq!(out.link_names(), vec!["CORE_CMAKE_OUTPUT"]);
	let imported = LinkRef::Imported { name: "Boost".to_owned(), file_count: 3 };
	assert_eq!(imported.link_names(), vec!["boost_0", "boost_1", "boost_2"]);
	assert_eq!(imported.name(), "Boost");
}
