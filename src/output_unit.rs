use core::fmt;

use serde::Serialize;

use crate::{
	misc::{output_identifier, sources_var},
	schema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
	Static,
	Shared,
}

impl Linkage {
	pub fn cmake_keyword(&self) -> &'static str {
		match self {
			Linkage::Static => "STATIC",
			Linkage::Shared => "SHARED",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputKind {
	Executable {
		output_dir: String,
	},
	Library {
		linkage: Linkage,
		archive_dir: String,
		library_dir: String,
	},
}

impl fmt::Display for OutputKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			OutputKind::Executable { .. } => schema::EXECUTABLE,
			OutputKind::Library { linkage: Linkage::Static, .. } => schema::STATIC_LIB,
			OutputKind::Library { linkage: Linkage::Shared, .. } => schema::SHARED_LIB,
		};
		f.write_str(name)
	}
}

/// One artifact compiled from the project's own sources.
#[derive(Debug, Clone, Serialize)]
pub struct OutputUnit {
	pub name: String,
	pub kind: OutputKind,
	/// Project-relative source and header paths, or variable references added by link resolution.
	pub sources: Vec<String>,
	pub include_dirs: Vec<String>,
}

impl OutputUnit {
	pub fn identifier(&self) -> String {
		output_identifier(&self.name)
	}

	pub fn sources_var(&self) -> String {
		sources_var(&self.name)
	}

	pub fn is_executable(&self) -> bool {
		matches!(self.kind, OutputKind::Executable { .. })
	}
}
