use std::{
	fs::File,
	io::{self, BufWriter, Write},
	path::Path,
};

use crate::{
	build_target::BuildTarget,
	imported_library::{unix_file, windows_files, ImportedLibrary},
	link_type::LinkEdge,
	misc::{capitalize, include_dirs_var, is_absolute, is_var_ref, normalize_separators, output_identifier, var_ref},
	output_unit::{Linkage, OutputKind, OutputUnit},
	project::LanguageStandards,
	schema::{DESCRIPTOR_FILE, LINUX_OS, MAC_OS, UNIX_OS, WINDOWS_OS},
};

const PROJECT_SOURCE_DIR: &str = "${PROJECT_SOURCE_DIR}";
const BUILD_DIR_PREFIX: &str = "${CMAKE_BINARY_DIR}";
const BUILD_TYPE: &str = "CMAKE_BUILD_TYPE";

enum Language {
	C,
	Cpp,
}

impl Language {
	fn standard_var(&self) -> &'static str {
		match self {
			Language::C => "C_COMPILER_STANDARD",
			Language::Cpp => "CXX_COMPILER_STANDARD",
		}
	}
	fn target_property(&self) -> &'static str {
		match self {
			Language::C => "C_STANDARD",
			Language::Cpp => "CXX_STANDARD",
		}
	}
	fn description(&self) -> &'static str {
		match self {
			Language::C => "C compiler standard year",
			Language::Cpp => "C++ compiler standard year",
		}
	}
	fn std_flag_prefix(&self) -> &'static str {
		match self {
			Language::C => "-std=c",
			Language::Cpp => "-std=c++",
		}
	}
	fn display_name(&self) -> &'static str {
		match self {
			Language::C => "C",
			Language::Cpp => "CXX",
		}
	}
}

fn quote(s: &str) -> String {
	format!("\"{}\"", s.replace('\\', r"\\").replace('"', r#"\""#))
}

/// Entries are written relative to the project source directory unless they already expand to something else.
fn qualify(entry: &str) -> String {
	if is_var_ref(entry) || is_absolute(entry) {
		entry.to_owned()
	} else {
		format!("{}/{}", PROJECT_SOURCE_DIR, entry)
	}
}

fn build_dir(dir: &str) -> String {
	let dir = normalize_separators(dir);
	let dir = dir.trim_matches('/');
	if dir.is_empty() {
		format!("{}/{}", BUILD_DIR_PREFIX, var_ref(BUILD_TYPE))
	} else {
		format!("{}/{}/{}", BUILD_DIR_PREFIX, dir, var_ref(BUILD_TYPE))
	}
}

fn build_type_is(config: &str) -> String {
	format!("\"{}\" STREQUAL {}", var_ref(BUILD_TYPE), quote(config))
}

/// Writes CMake statements to a single destination. Each method writes one section; none of them validate.
pub struct CMakeWriter<W: Write> {
	out: W,
}

impl CMakeWriter<BufWriter<File>> {
	/// Creates (or truncates) the file at `path`.
	pub fn create(path: &Path) -> io::Result<Self> {
		let file = File::create(path)?;
		Ok(CMakeWriter::new(BufWriter::new(file)))
	}
}

impl<W: Write> CMakeWriter<W> {
	pub fn new(out: W) -> Self {
		CMakeWriter { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	pub fn flush(&mut self) -> io::Result<()> {
		self.out.flush()
	}

	pub fn write_version(&mut self, version: &str) -> io::Result<()> {
		writeln!(self.out, "# Generated from {}. Changes made here are overwritten.", DESCRIPTOR_FILE)?;
		writeln!(self.out, "cmake_minimum_required( VERSION {} )", version)
	}

	pub fn write_project_name(&mut self, name: &str) -> io::Result<()> {
		writeln!(self.out, "project( {} )", name)
	}

	pub fn write_imported_library(&mut self, lib: &ImportedLibrary) -> io::Result<()> {
		self.write_list(&lib.include_dirs_var(), &lib.include_dirs)?;
		self.write_list(&lib.header_files_var(), &lib.header_files)?;

		for (identifier, lib_file) in lib.identifiers().iter().zip(&lib.lib_files) {
			writeln!(self.out)?;
			writeln!(self.out, "add_library( {} {} IMPORTED )", identifier, lib.linkage.cmake_keyword())?;
			let (windows_lib, windows_dll) = windows_files(lib_file);
			match lib.linkage {
				Linkage::Static => {
					self.write_if(WINDOWS_OS)?;
					self.write_imported_location(identifier, &[("IMPORTED_LOCATION", windows_lib.as_str())])?;
					self.write_elseif(UNIX_OS)?;
					self.write_imported_location(identifier, &[("IMPORTED_LOCATION", unix_file(lib_file, "a").as_str())])?;
				}
				Linkage::Shared => {
					self.write_if(WINDOWS_OS)?;
					self.write_imported_location(
						identifier,
						&[("IMPORTED_LOCATION", windows_dll.as_str()), ("IMPORTED_IMPLIB", windows_lib.as_str())],
					)?;
					self.write_elseif(MAC_OS)?;
					self.write_imported_location(
						identifier,
						&[("IMPORTED_LOCATION", unix_file(lib_file, "dylib").as_str())],
					)?;
					self.write_elseif(LINUX_OS)?;
					self.write_imported_location(identifier, &[("IMPORTED_LOCATION", unix_file(lib_file, "so").as_str())])?;
				}
			}
			self.write_endif()?;
		}
		Ok(())
	}

	fn write_imported_location(&mut self, identifier: &str, properties: &[(&str, &str)]) -> io::Result<()> {
		writeln!(self.out, "\tset_target_properties( {} PROPERTIES", identifier)?;
		for (property, path) in properties {
			writeln!(self.out, "\t\t{} {}", property, qualify(path))?;
		}
		writeln!(self.out, "\t)")
	}

	pub fn write_output(&mut self, unit: &OutputUnit) -> io::Result<()> {
		let identifier = unit.identifier();
		let sources_var = unit.sources_var();

		self.write_list(&sources_var, &unit.sources)?;

		writeln!(self.out)?;
		match &unit.kind {
			OutputKind::Executable { .. } => {
				writeln!(self.out, "add_executable( {} {} )", identifier, var_ref(&sources_var))?;
			}
			OutputKind::Library { linkage, .. } => {
				writeln!(
					self.out,
					"add_library( {} {} {} )",
					identifier,
					linkage.cmake_keyword(),
					var_ref(&sources_var)
				)?;
			}
		}

		if !unit.is_executable() || !unit.include_dirs.is_empty() {
			let include_var = include_dirs_var(&unit.name);
			self.write_list(&include_var, &unit.include_dirs)?;
			writeln!(self.out)?;
			writeln!(self.out, "target_include_directories( {} PRIVATE {} )", identifier, var_ref(&include_var))?;
		}

		writeln!(self.out)?;
		writeln!(self.out, "set_target_properties( {}", identifier)?;
		writeln!(self.out, "\tPROPERTIES")?;
		writeln!(self.out, "\tOUTPUT_NAME {}", unit.name)?;
		match &unit.kind {
			OutputKind::Executable { output_dir } => {
				writeln!(self.out, "\tRUNTIME_OUTPUT_DIRECTORY {}", build_dir(output_dir))?;
			}
			OutputKind::Library { linkage, archive_dir, library_dir } => {
				writeln!(self.out, "\tARCHIVE_OUTPUT_DIRECTORY {}", build_dir(archive_dir))?;
				writeln!(self.out, "\tLIBRARY_OUTPUT_DIRECTORY {}", build_dir(library_dir))?;
				if *linkage == Linkage::Shared {
					writeln!(self.out, "\tRUNTIME_OUTPUT_DIRECTORY {}", build_dir(library_dir))?;
				}
			}
		}
		writeln!(self.out, ")")
	}

	pub fn write_link_libraries(&mut self, edge: &LinkEdge) -> io::Result<()> {
		writeln!(self.out)?;
		writeln!(self.out, "target_link_libraries( {}", output_identifier(&edge.source))?;
		for target in &edge.targets {
			for name in target.link_names() {
				writeln!(self.out, "\t{}", name)?;
			}
		}
		writeln!(self.out, ")")
	}

	pub fn write_cpp_standard(&mut self, standards: &LanguageStandards, outputs: &[OutputUnit]) -> io::Result<()> {
		self.write_standard(Language::Cpp, standards, outputs)
	}

	pub fn write_c_standard(&mut self, standards: &LanguageStandards, outputs: &[OutputUnit]) -> io::Result<()> {
		self.write_standard(Language::C, standards, outputs)
	}

	/// Output targets already exist here. `CMAKE_<LANG>_STANDARD` only reaches targets created after it is set.
	fn write_standard(
		&mut self,
		language: Language,
		standards: &LanguageStandards,
		outputs: &[OutputUnit],
	) -> io::Result<()> {
		let var = language.standard_var();
		writeln!(self.out)?;
		writeln!(
			self.out,
			"set( {} {} CACHE STRING {} )",
			var,
			quote(standards.active()),
			quote(language.description())
		)?;
		let choices = standards.allowed.iter().map(|x| quote(x)).collect::<Vec<_>>();
		writeln!(self.out, "set_property( CACHE {} PROPERTY STRINGS {} )", var, choices.join(" "))?;
		for unit in outputs {
			writeln!(
				self.out,
				"set_target_properties( {} PROPERTIES {} {} )",
				unit.identifier(),
				language.target_property(),
				var_ref(var)
			)?;
		}
		self.write_message(
			&format!(
				"Using {} compiler standard {}{}",
				language.display_name(),
				language.std_flag_prefix(),
				var_ref(var)
			),
			"",
		)
	}

	/// Selects `name` when no configuration was given on the command line.
	pub fn write_default_build_target(&mut self, name: &str) -> io::Result<()> {
		writeln!(self.out)?;
		self.write_if(&build_type_is(""))?;
		writeln!(
			self.out,
			"\tset( {} {} CACHE STRING \"Build configuration\" FORCE )",
			BUILD_TYPE,
			quote(&capitalize(name))
		)?;
		self.write_endif()
	}

	pub fn write_build_target_list(&mut self, targets: &[BuildTarget]) -> io::Result<()> {
		let choices = targets.iter().map(|x| quote(&x.config_name())).collect::<Vec<_>>();
		writeln!(self.out)?;
		writeln!(self.out, "set_property( CACHE {} PROPERTY STRINGS {} )", BUILD_TYPE, choices.join(" "))
	}

	pub fn write_build_target(&mut self, target: &BuildTarget) -> io::Result<()> {
		writeln!(self.out)?;
		self.write_if(&build_type_is(&target.config_name()))?;
		writeln!(self.out, "\tset( CMAKE_C_FLAGS {} )", quote(&target.c_flags.join(" ")))?;
		writeln!(self.out, "\tset( CMAKE_CXX_FLAGS {} )", quote(&target.cpp_flags.join(" ")))?;
		self.write_message(&format!("Building project {} configuration", var_ref(BUILD_TYPE)), "\t")?;
		self.write_endif()
	}

	fn write_list(&mut self, name: &str, entries: &[String]) -> io::Result<()> {
		writeln!(self.out)?;
		writeln!(self.out, "set( {}", name)?;
		for entry in entries {
			writeln!(self.out, "\t{}", qualify(entry))?;
		}
		writeln!(self.out, ")")
	}

	fn write_message(&mut self, message: &str, indent: &str) -> io::Result<()> {
		writeln!(self.out, "{}message( {} )", indent, quote(message))
	}

	fn write_if(&mut self, condition: &str) -> io::Result<()> {
		writeln!(self.out, "if( {} )", condition)
	}

	fn write_elseif(&mut self, condition: &str) -> io::Result<()> {
		writeln!(self.out, "elseif( {} )", condition)
	}

	fn write_endif(&mut self) -> io::Result<()> {
		writeln!(self.out, "endif()")
	}
}
