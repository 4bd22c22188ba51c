//! Loads `cmake_data.json`, validates it and expands its recursive directory lists into a [`Project`].
//!
//! Resolution is a single top-to-bottom pass that stops at the first problem. It runs in two phases:
//! every entity is resolved on its own first, then `link_libs` is validated against the resolved outputs and
//! imported libraries and the linking outputs are augmented with the imported libraries' variables.

mod discover;
mod error;
mod fields;

use std::{
	collections::HashMap, //
	fs,
	io,
	path::{Path, PathBuf},
};

use serde_json::{Map, Value};

pub use error::ResolveError;
use fields::Fields;

use crate::{
	build_target::BuildTarget,
	imported_library::ImportedLibrary,
	link_type::{LinkEdge, LinkRef},
	misc::{extend_unique, normalize_separators, script_path, var_ref},
	output_unit::{Linkage, OutputKind, OutputUnit},
	project::{LanguageStandards, Project, ProjectInfo},
	schema::{self, header_types, source_types, DESCRIPTOR_FILE},
};

const TARGETS_WHY: &str =
	"Are you building a release binary? Or maybe a debug one? Add the 'targets' tag and add a build type to it.";
const CPP_FLAGS_WHY: &str = "C++ compiler flags must be defined (as an array). If you aren't using any compiler flags, still define this tag as an empty array.";
const C_FLAGS_WHY: &str = "C compiler flags must be defined (as an array). If you aren't using any compiler flags, still define this tag as an empty array.";
const OUTPUT_WHY: &str = "An item must be added to the output tag, otherwise nothing will be compiled and/or built.";
const TYPE_WHY: &str =
	"Without a type, we do not know what to compile your code into. Options: \"executable\", \"static_lib\", \"shared_lib\"";
const R_SOURCE_DIRS_WHY: &str = "These are the base directories to be recursively searched for source files. If you are only compiling the (optional) base file, still include this tag with an empty array.";
const R_HEADER_DIRS_WHY: &str = "These are the base directories to be recursively searched for header files. If your headers live next to your sources, still include this tag with an empty array.";
const R_INCLUDE_DIRS_WHY: &str = "Without passing the include directories of your header files to the compiler, there is a good chance they may not be included.";
const EXE_OUTPUT_DIR_WHY: &str = "Specifies the directory into which the executable will be built. (Don't use a beginning /)";
const ARCHIVE_OUTPUT_DIR_WHY: &str =
	"Specifies the directory into which the library 'archive' files will be built. (Don't use a beginning /)";
const LIB_OUTPUT_DIR_WHY: &str = "Specifies the directory into which the library files will be built. (Don't use a beginning /)";
const NO_SOURCES_WHY: &str = "No source files were found for this output. Add a base_file or a directory containing sources.";
const IMPORTED_TYPE_WHY: &str = "Imported libraries must be either \"static\" or \"shared\".";
const ROOT_DIR_WHY: &str = "The directory containing the library, relative to the project root.";
const LIB_FILES_WHY: &str =
	"The library files to link, relative to root_dir and without a platform prefix or extension (e.g. \"lib/z\").";
const IMPORTED_R_INCLUDE_DIRS_WHY: &str = "The directories, relative to root_dir, searched recursively for the library's headers. Use an empty array for a library without headers.";
const STANDARDS_WHY: &str = "At least one language standard must be allowed.";

/// Resolves the descriptor found in `root`.
pub fn resolve(root: &Path) -> Result<Project, ResolveError> {
	check_root(root)?;
	let descriptor = load_descriptor(root)?;
	resolve_descriptor(root, &descriptor)
}

fn check_root(root: &Path) -> Result<(), ResolveError> {
	if root.to_str().is_none() {
		return Err(ResolveError::InvalidRoot {
			path: root.to_owned(),
			reason: "path is not valid UTF-8".to_owned(),
		});
	}
	if !root.is_dir() {
		return Err(ResolveError::InvalidRoot { path: root.to_owned(), reason: "not a directory".to_owned() });
	}
	Ok(())
}

pub fn load_descriptor(root: &Path) -> Result<Value, ResolveError> {
	let path = root.join(DESCRIPTOR_FILE);
	let text = match fs::read_to_string(&path) {
		Ok(x) => x,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ResolveError::NotFound { path }),
		Err(e) => return Err(ResolveError::Io { path, source: e }),
	};
	match serde_json::from_str(&text) {
		Ok(x) => Ok(x),
		Err(e) => Err(ResolveError::Parse { path, source: e }),
	}
}

/// Resolves an already parsed descriptor. Relative directories are searched below `root`.
pub fn resolve_descriptor(root: &Path, descriptor: &Value) -> Result<Project, ResolveError> {
	let map = match descriptor.as_object() {
		Some(x) => x,
		None => {
			return Err(ResolveError::WrongType {
				field: DESCRIPTOR_FILE.to_owned(),
				parent: None,
				expected: "a JSON object at the top level",
			})
		}
	};
	let top = Fields::new(map, None);

	let info = ProjectInfo {
		min_cmake_version: top.require_str(schema::MIN_CMAKE_VERSION, None)?,
		name: top.require_str(schema::PROJECT_NAME, None)?,
		path: root.to_path_buf(),
	};
	log::debug!("resolving project \"{}\" in {}", info.name, root.display());

	let cpp_default = top.optional_scalar(schema::DEFAULT_CPP_STANDARD)?.unwrap_or_default();
	let c_default = top.optional_scalar(schema::DEFAULT_C_STANDARD)?.unwrap_or_default();
	let cpp_standards = read_standards(&top, schema::ALLOWED_CPP_STANDARDS, cpp_default)?;
	let c_standards = read_standards(&top, schema::ALLOWED_C_STANDARDS, c_default)?;

	let targets = read_targets(&top)?;
	let default_target = top.optional_str(schema::DEFAULT_TARGET)?.filter(|x| !x.is_empty());
	if let Some(default_target) = &default_target {
		if !targets.iter().any(|x| &x.name == default_target) {
			return Err(ResolveError::UnknownReference {
				name: default_target.clone(),
				field: schema::DEFAULT_TARGET,
				expected_in: "\"targets\"",
			});
		}
	}

	let mut outputs = read_outputs(root, &top)?;
	let imported_libraries = read_imported_libs(root, &top)?;
	check_name_clashes(&outputs, &imported_libraries)?;
	let link_edges = read_link_libs(&top, &outputs, &imported_libraries)?;
	augment_links(&mut outputs, &imported_libraries, &link_edges);

	log::info!(
		"resolved {} outputs, {} imported libraries, {} link entries, {} targets",
		outputs.len(),
		imported_libraries.len(),
		link_edges.len(),
		targets.len()
	);

	Ok(Project {
		info,
		c_standards,
		cpp_standards,
		targets,
		default_target,
		outputs,
		imported_libraries,
		link_edges,
	})
}

fn read_standards(top: &Fields, tag: &str, default: String) -> Result<LanguageStandards, ResolveError> {
	let allowed = top.require_scalar_list(tag, None)?;
	if allowed.is_empty() {
		return Err(top.empty(tag, STANDARDS_WHY));
	}
	let standards = LanguageStandards { default, allowed };
	if !standards.default.is_empty() && standards.active() != standards.default {
		log::warn!(
			"Default standard \"{}\" is not listed in \"{}\". Using \"{}\" instead.",
			standards.default,
			tag,
			standards.active()
		);
	}
	Ok(standards)
}

fn read_targets(top: &Fields) -> Result<Vec<BuildTarget>, ResolveError> {
	let targets_map = top.require_object(schema::TARGETS, Some(TARGETS_WHY))?;
	if targets_map.is_empty() {
		return Err(top.empty(schema::TARGETS, TARGETS_WHY));
	}
	let mut targets = Vec::new();
	for (name, value) in targets_map {
		let target = top.entry(schema::TARGETS, name, value)?;
		targets.push(BuildTarget {
			name: name.clone(),
			cpp_flags: target.require_str_list(schema::CPP_FLAGS, Some(CPP_FLAGS_WHY))?,
			c_flags: target.require_str_list(schema::C_FLAGS, Some(C_FLAGS_WHY))?,
		});
	}
	Ok(targets)
}

fn read_outputs(root: &Path, top: &Fields) -> Result<Vec<OutputUnit>, ResolveError> {
	let output_map = top.require_object(schema::OUTPUT, None)?;
	if output_map.is_empty() {
		return Err(top.empty(schema::OUTPUT, OUTPUT_WHY));
	}
	let mut outputs = Vec::new();
	for (name, value) in output_map {
		let unit = top.entry(schema::OUTPUT, name, value)?;
		outputs.push(read_output(root, name, &unit)?);
	}
	Ok(outputs)
}

/// Checks the output type before anything else is read. `None` stands for an executable.
fn read_output_type(unit: &Fields) -> Result<Option<Linkage>, ResolveError> {
	let type_str = unit.require_str(schema::TYPE, Some(TYPE_WHY))?;
	match type_str.to_lowercase().as_str() {
		schema::EXECUTABLE => Ok(None),
		schema::STATIC_LIB => Ok(Some(Linkage::Static)),
		schema::SHARED_LIB => Ok(Some(Linkage::Shared)),
		_ => Err(unit.invalid_enum(schema::TYPE, &type_str, schema::OUTPUT_TYPES)),
	}
}

fn read_output_kind(unit: &Fields, linkage: Option<Linkage>) -> Result<OutputKind, ResolveError> {
	let kind = match linkage {
		None => OutputKind::Executable {
			output_dir: unit.require_str(schema::EXE_OUTPUT_DIR, Some(EXE_OUTPUT_DIR_WHY))?,
		},
		Some(linkage) => OutputKind::Library {
			linkage,
			archive_dir: unit.require_str(schema::ARCHIVE_OUTPUT_DIR, Some(ARCHIVE_OUTPUT_DIR_WHY))?,
			library_dir: unit.require_str(schema::LIB_OUTPUT_DIR, Some(LIB_OUTPUT_DIR_WHY))?,
		},
	};
	Ok(kind)
}

fn read_output(root: &Path, name: &str, unit: &Fields) -> Result<OutputUnit, ResolveError> {
	let linkage = read_output_type(unit)?;

	let mut sources = Vec::new();
	if let Some(base_file) = unit.optional_str(schema::BASE_FILE)? {
		sources.push(script_path(&root.join(normalize_separators(&base_file)), root));
	}

	let source_dirs = unit.require_str_list(schema::R_SOURCE_DIRS, Some(R_SOURCE_DIRS_WHY))?;
	extend_unique(&mut sources, discover::files_recursive(root, root, &source_dirs, &source_types()));

	// Headers are listed with the sources so they show up in IDE projects
	let header_dirs = unit.require_str_list(schema::R_HEADER_DIRS, Some(R_HEADER_DIRS_WHY))?;
	extend_unique(&mut sources, discover::files_recursive(root, root, &header_dirs, &header_types()));

	if sources.is_empty() {
		return Err(unit.empty(schema::R_SOURCE_DIRS, NO_SOURCES_WHY));
	}

	let include_search_dirs = unit.require_str_list(schema::R_INCLUDE_DIRS, Some(R_INCLUDE_DIRS_WHY))?;
	let mut include_dirs = discover::dirs_recursive(root, root, &include_search_dirs);
	let literal_include_dirs = unit.optional_str_list(schema::INCLUDE_DIRS)?;
	extend_unique(&mut include_dirs, literal_include_dirs.iter().map(|x| normalize_separators(x)));

	let kind = read_output_kind(unit, linkage)?;

	log::debug!("output \"{}\" ({}): {} sources, {} include dirs", name, kind, sources.len(), include_dirs.len());
	Ok(OutputUnit { name: name.to_owned(), kind, sources, include_dirs })
}

/// Output and imported library names become CMake identifiers with their case folded, so they must stay
/// distinct after folding.
fn check_name_clashes(outputs: &[OutputUnit], imported_libs: &[ImportedLibrary]) -> Result<(), ResolveError> {
	let mut seen: HashMap<String, &str> = HashMap::new();
	let names = outputs
		.iter()
		.map(|x| (x.name.as_str(), schema::OUTPUT))
		.chain(imported_libs.iter().map(|x| (x.name.as_str(), schema::IMPORTED_LIBS)));
	for (name, field) in names {
		if let Some(previous) = seen.insert(name.to_lowercase(), name) {
			return Err(ResolveError::DuplicateName { name: name.to_owned(), previous: previous.to_owned(), field });
		}
	}
	Ok(())
}

fn read_imported_libs(root: &Path, top: &Fields) -> Result<Vec<ImportedLibrary>, ResolveError> {
	let libs_map = match top.optional_object(schema::IMPORTED_LIBS)? {
		Some(x) => x,
		None => return Ok(Vec::new()),
	};
	let mut libs = Vec::new();
	for (name, value) in libs_map {
		let lib = top.entry(schema::IMPORTED_LIBS, name, value)?;
		libs.push(read_imported_lib(root, name, &lib)?);
	}
	Ok(libs)
}

fn read_imported_lib(root: &Path, name: &str, lib: &Fields) -> Result<ImportedLibrary, ResolveError> {
	let type_str = lib.require_str(schema::TYPE, Some(IMPORTED_TYPE_WHY))?;
	let linkage = match type_str.to_lowercase().as_str() {
		schema::STATIC => Linkage::Static,
		schema::SHARED => Linkage::Shared,
		_ => return Err(lib.invalid_enum(schema::TYPE, &type_str, schema::LINKAGE_TYPES)),
	};

	let root_dir = lib.require_str(schema::ROOT_DIR, Some(ROOT_DIR_WHY))?;
	let lib_root: PathBuf = root.join(&root_dir);

	let lib_file_names = lib.require_str_list(schema::LIB_FILES, Some(LIB_FILES_WHY))?;
	if lib_file_names.is_empty() {
		return Err(lib.empty(schema::LIB_FILES, LIB_FILES_WHY));
	}
	let mut lib_files = Vec::new();
	extend_unique(&mut lib_files, lib_file_names.iter().map(|x| script_path(&lib_root.join(x), root)));

	let include_search_dirs = lib.require_str_list(schema::R_INCLUDE_DIRS, Some(IMPORTED_R_INCLUDE_DIRS_WHY))?;
	let mut include_dirs = discover::dirs_recursive(root, &lib_root, &include_search_dirs);
	let mut header_files = discover::files_recursive(root, &lib_root, &include_search_dirs, &header_types());
	let literal_include_dirs = lib.optional_str_list(schema::INCLUDE_DIRS)?;
	extend_unique(&mut include_dirs, literal_include_dirs.iter().map(|x| script_path(&lib_root.join(x), root)));
	let literal_headers = lib.optional_str_list(schema::HEADER_FILES)?;
	extend_unique(&mut header_files, literal_headers.iter().map(|x| script_path(&lib_root.join(x), root)));

	log::debug!(
		"imported library \"{}\": {} files, {} include dirs, {} headers",
		name,
		lib_files.len(),
		include_dirs.len(),
		header_files.len()
	);
	Ok(ImportedLibrary {
		name: name.to_owned(),
		linkage,
		root_dir: script_path(&lib_root, root),
		lib_files,
		include_dirs,
		header_files,
	})
}

fn read_link_libs(
	top: &Fields,
	outputs: &[OutputUnit],
	imported_libs: &[ImportedLibrary],
) -> Result<Vec<LinkEdge>, ResolveError> {
	let links_map: &Map<String, Value> = match top.optional_object(schema::LINK_LIBS)? {
		Some(x) => x,
		None => return Ok(Vec::new()),
	};
	let mut edges = Vec::new();
	for source in links_map.keys() {
		if !outputs.iter().any(|x| &x.name == source) {
			return Err(ResolveError::UnknownReference {
				name: source.clone(),
				field: schema::LINK_LIBS,
				expected_in: "\"output\"",
			});
		}
		let entry = Fields::new(links_map, Some(schema::LINK_LIBS));
		let mut targets = Vec::new();
		for target_name in entry.require_str_list(source, None)? {
			let link = if let Some(output) = outputs.iter().find(|x| x.name == target_name) {
				LinkRef::from_output(output)
			} else if let Some(lib) = imported_libs.iter().find(|x| x.name == target_name) {
				LinkRef::from_imported(lib)
			} else {
				return Err(ResolveError::UnknownReference {
					name: target_name,
					field: schema::LINK_LIBS,
					expected_in: "\"output\" nor \"imported_libs\"",
				});
			};
			if !targets.contains(&link) {
				targets.push(link);
			}
		}
		edges.push(LinkEdge { source: source.clone(), targets });
	}
	Ok(edges)
}

/// Makes an output that links an imported library see that library's include directories and headers.
fn augment_links(outputs: &mut [OutputUnit], imported_libs: &[ImportedLibrary], edges: &[LinkEdge]) {
	for edge in edges {
		let Some(output) = outputs.iter_mut().find(|x| x.name == edge.source) else {
			continue;
		};
		for target in &edge.targets {
			let LinkRef::Imported { name, .. } = target else {
				continue;
			};
			let Some(lib) = imported_libs.iter().find(|x| &x.name == name) else {
				continue;
			};
			if lib.include_dirs.is_empty() {
				continue;
			}
			log::debug!("output \"{}\" picks up include directories of \"{}\"", output.name, lib.name);
			extend_unique(&mut output.include_dirs, [var_ref(&lib.include_dirs_var())]);
			extend_unique(&mut output.sources, [var_ref(&lib.header_files_var())]);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn base_descriptor() -> Value {
		json!({
			"min_cmake_version": "3.12",
			"project_name": "demo",
			"allowed_c_standards": ["99", "11"],
			"allowed_cpp_standards": ["11", "14", "17"],
			"targets": {
				"debug": { "c_flags": ["-g"], "cpp_flags": ["-g", "-O0"] },
				"release": { "c_flags": [], "cpp_flags": ["-O2"] }
			},
			"output": {
				"app": {
					"type": "executable",
					"base_file": "main.cpp",
					"r_source_dirs": [],
					"r_header_dirs": [],
					"r_include_dirs": [],
					"executable_output_dir": "bin"
				}
			}
		})
	}

	fn resolve_json(descriptor: &Value) -> Result<Project, ResolveError> {
		resolve_descriptor(Path::new("."), descriptor)
	}

	#[test]
	fn test_minimal_descriptor() {
		let project = resolve_json(&base_descriptor()).unwrap();
		assert_eq!(project.info.name, "demo");
		assert_eq!(project.info.min_cmake_version, "3.12");
		assert_eq!(project.targets.len(), 2);
		assert_eq!(project.targets[0].name, "debug");
		assert_eq!(project.targets[0].cpp_flags, vec!["-g", "-O0"]);
		assert_eq!(project.initial_target(), Some("debug"));
		assert_eq!(project.cpp_standards.active(), "11");
		assert_eq!(project.outputs.len(), 1);
		let app = &project.outputs[0];
		assert_eq!(app.sources, vec!["main.cpp"]);
		assert_eq!(app.kind, OutputKind::Executable { output_dir: "bin".to_owned() });
		assert!(project.imported_libraries.is_empty());
		assert!(project.link_edges.is_empty());
	}

	#[test]
	fn test_missing_project_name() {
		let mut descriptor = base_descriptor();
		descriptor.as_object_mut().unwrap().remove("project_name");
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::MissingField { .. }));
		assert_eq!(err.field(), Some("project_name"));
		assert_eq!(err.parent(), None);
	}

	#[test]
	fn test_missing_output_type() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"].as_object_mut().unwrap().remove("type");
		let err = resolve_json(&descriptor).unwrap_err();
		assert_eq!(err.field(), Some("type"));
		assert_eq!(err.parent(), Some("app"));
		assert!(err.to_string().contains("Options: \"executable\""));
	}

	#[test]
	fn test_unknown_output_type() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"]["type"] = json!("dylib");
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::InvalidEnum { ref value, .. } if value == "dylib"));
	}

	#[test]
	fn test_target_flags_required() {
		let mut descriptor = base_descriptor();
		descriptor["targets"]["release"].as_object_mut().unwrap().remove("c_flags");
		let err = resolve_json(&descriptor).unwrap_err();
		assert_eq!(err.field(), Some("c_flags"));
		assert_eq!(err.parent(), Some("release"));
	}

	#[test]
	fn test_library_needs_both_output_dirs() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"]["type"] = json!("static_lib");
		descriptor["output"]["app"]["archive_output_dir"] = json!("lib");
		let err = resolve_json(&descriptor).unwrap_err();
		assert_eq!(err.field(), Some("library_output_dir"));

		descriptor["output"]["app"]["library_output_dir"] = json!("lib");
		let project = resolve_json(&descriptor).unwrap();
		assert!(matches!(project.outputs[0].kind, OutputKind::Library { linkage: Linkage::Static, .. }));
	}

	#[test]
	fn test_empty_output() {
		let mut descriptor = base_descriptor();
		descriptor["output"] = json!({});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::EmptyField { .. }));
		assert_eq!(err.field(), Some("output"));
	}

	#[test]
	fn test_output_without_sources() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"].as_object_mut().unwrap().remove("base_file");
		let err = resolve_json(&descriptor).unwrap_err();
		assert_eq!(err.field(), Some("r_source_dirs"));
		assert_eq!(err.parent(), Some("app"));
	}

	#[test]
	fn test_default_target() {
		let mut descriptor = base_descriptor();
		descriptor["default_target"] = json!("release");
		assert_eq!(resolve_json(&descriptor).unwrap().initial_target(), Some("release"));

		descriptor["default_target"] = json!("profile");
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::UnknownReference { .. }));
	}

	#[test]
	fn test_default_standard_fallback() {
		let mut descriptor = base_descriptor();
		descriptor["default_cpp_standard"] = json!(17);
		descriptor["default_c_standard"] = json!("18");
		let project = resolve_json(&descriptor).unwrap();
		assert_eq!(project.cpp_standards.active(), "17");
		assert_eq!(project.c_standards.active(), "99");
	}

	#[test]
	fn test_empty_allowed_standards() {
		let mut descriptor = base_descriptor();
		descriptor["allowed_c_standards"] = json!([]);
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::EmptyField { .. }));
	}

	#[test]
	fn test_link_to_unknown_names() {
		let mut descriptor = base_descriptor();
		descriptor["link_libs"] = json!({ "missing": [] });
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::UnknownReference { ref name, .. } if name == "missing"));

		descriptor["link_libs"] = json!({ "app": ["zlib"] });
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::UnknownReference { ref name, .. } if name == "zlib"));
	}

	#[test]
	fn test_imported_library_linkage() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"zlib": { "type": "dynamic", "root_dir": "deps/zlib", "lib_files": ["z"], "r_include_dirs": [] }
		});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::InvalidEnum { .. }));
		assert_eq!(err.parent(), Some("zlib"));
	}

	#[test]
	fn test_link_augments_includes_once() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"zlib": {
				"type": "static",
				"root_dir": "deps/zlib",
				"lib_files": ["lib/z", "lib/zextra"],
				"r_include_dirs": [],
				"include_dirs": ["include"]
			}
		});
		descriptor["link_libs"] = json!({ "app": ["zlib", "zlib"] });
		let project = resolve_json(&descriptor).unwrap();
		let lib = &project.imported_libraries[0];
		assert_eq!(lib.lib_files, vec!["deps/zlib/lib/z", "deps/zlib/lib/zextra"]);
		assert_eq!(lib.include_dirs, vec!["deps/zlib/include"]);

		let app = project.output("app").unwrap();
		assert_eq!(app.include_dirs.iter().filter(|x| *x == "${ZLIB_INCLUDE_DIRS}").count(), 1);
		assert_eq!(app.sources.iter().filter(|x| *x == "${ZLIB_HEADER_FILES}").count(), 1);
		assert_eq!(project.link_edges[0].targets.len(), 1);
		assert_eq!(project.link_edges[0].targets[0].link_names(), vec!["zlib_0", "zlib_1"]);
	}

	#[test]
	fn test_link_without_includes_does_not_augment() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"m": { "type": "shared", "root_dir": "deps/m", "lib_files": ["m"], "r_include_dirs": [] }
		});
		descriptor["link_libs"] = json!({ "app": ["m"] });
		let project = resolve_json(&descriptor).unwrap();
		assert_eq!(project.outputs[0].sources, vec!["main.cpp"]);
		assert!(project.outputs[0].include_dirs.is_empty());
	}

	#[test]
	fn test_executable_needs_output_dir() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"].as_object_mut().unwrap().remove("executable_output_dir");
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::MissingField { .. }));
		assert_eq!(err.field(), Some("executable_output_dir"));
		assert_eq!(err.parent(), Some("app"));
	}

	#[test]
	fn test_output_dirs_are_read_after_search_dirs() {
		let mut descriptor = base_descriptor();
		let app = descriptor["output"]["app"].as_object_mut().unwrap();
		app.remove("executable_output_dir");
		app.remove("r_include_dirs");
		let err = resolve_json(&descriptor).unwrap_err();
		assert_eq!(err.field(), Some("r_include_dirs"));

		// An unknown type is still reported before anything else
		descriptor["output"]["app"]["type"] = json!("bundle");
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::InvalidEnum { .. }));
	}

	#[test]
	fn test_shared_library_output() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"]["type"] = json!("Shared_Lib");
		descriptor["output"]["app"]["archive_output_dir"] = json!("lib");
		descriptor["output"]["app"]["library_output_dir"] = json!("bin");
		let project = resolve_json(&descriptor).unwrap();
		assert_eq!(
			project.outputs[0].kind,
			OutputKind::Library { linkage: Linkage::Shared, archive_dir: "lib".to_owned(), library_dir: "bin".to_owned() }
		);
	}

	#[test]
	fn test_output_type_ignores_case() {
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"]["type"] = json!("EXECUTABLE");
		let project = resolve_json(&descriptor).unwrap();
		assert!(project.outputs[0].is_executable());
	}

	#[test]
	fn test_base_file_not_listed_twice() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("src")).unwrap();
		fs::write(dir.path().join("src/main.cpp"), "").unwrap();
		fs::write(dir.path().join("src/util.cpp"), "").unwrap();
		let mut descriptor = base_descriptor();
		descriptor["output"]["app"]["base_file"] = json!("./src/main.cpp");
		descriptor["output"]["app"]["r_source_dirs"] = json!(["src"]);
		let project = resolve_descriptor(dir.path(), &descriptor).unwrap();
		assert_eq!(project.outputs[0].sources, vec!["src/main.cpp", "src/util.cpp"]);
	}

	#[test]
	fn test_imported_library_needs_lib_files() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"zlib": { "type": "static", "root_dir": "deps/zlib", "lib_files": [], "r_include_dirs": [] }
		});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::EmptyField { .. }));
		assert_eq!(err.field(), Some("lib_files"));
		assert_eq!(err.parent(), Some("zlib"));
	}

	#[test]
	fn test_imported_library_needs_root_dir() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"zlib": { "type": "static", "lib_files": ["z"], "r_include_dirs": [] }
		});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::MissingField { .. }));
		assert_eq!(err.field(), Some("root_dir"));
		assert_eq!(err.parent(), Some("zlib"));
	}

	#[test]
	fn test_imported_library_header_union() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("deps/zlib/include")).unwrap();
		fs::write(dir.path().join("deps/zlib/include/zlib.h"), "").unwrap();
		fs::write(dir.path().join("deps/zlib/include/zconf.h"), "").unwrap();
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"zlib": {
				"type": "static",
				"root_dir": "deps/zlib",
				"lib_files": ["lib/z"],
				"r_include_dirs": ["include"],
				"header_files": ["include/zlib.h", "extra/custom.h"]
			}
		});
		let project = resolve_descriptor(dir.path(), &descriptor).unwrap();
		let lib = &project.imported_libraries[0];
		assert_eq!(lib.include_dirs, vec!["deps/zlib/include"]);
		assert_eq!(
			lib.header_files,
			vec!["deps/zlib/include/zconf.h", "deps/zlib/include/zlib.h", "deps/zlib/extra/custom.h"]
		);
	}

	#[test]
	fn test_names_differing_only_in_case() {
		let mut descriptor = base_descriptor();
		descriptor["imported_libs"] = json!({
			"Zlib": { "type": "static", "root_dir": "a", "lib_files": ["z"], "r_include_dirs": [] },
			"zlib": { "type": "static", "root_dir": "b", "lib_files": ["z"], "r_include_dirs": [] }
		});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(
			matches!(err, ResolveError::DuplicateName { ref name, ref previous, .. } if name == "zlib" && previous == "Zlib")
		);
		assert_eq!(err.field(), Some("imported_libs"));

		descriptor["imported_libs"] = json!({
			"APP": { "type": "shared", "root_dir": "a", "lib_files": ["app"], "r_include_dirs": [] }
		});
		let err = resolve_json(&descriptor).unwrap_err();
		assert!(matches!(err, ResolveError::DuplicateName { ref name, .. } if name == "APP"));
	}

	#[test]
	fn test_top_level_must_be_object() {
		let err = resolve_json(&json!(["not", "an", "object"])).unwrap_err();
		assert!(matches!(err, ResolveError::WrongType { .. }));
	}

	#[test]
	fn test_invalid_root() {
		let err = resolve(Path::new("does/not/exist")).unwrap_err();
		assert!(matches!(err, ResolveError::InvalidRoot { .. }));
	}
}
