//! Names shared by the resolver and the generator.

pub const DESCRIPTOR_FILE: &str = "cmake_data.json";
pub const CMAKELISTS_TXT: &str = "CMakeLists.txt";

// Project info tags
pub const MIN_CMAKE_VERSION: &str = "min_cmake_version";
pub const PROJECT_NAME: &str = "project_name";

// Language standard tags
pub const DEFAULT_C_STANDARD: &str = "default_c_standard";
pub const DEFAULT_CPP_STANDARD: &str = "default_cpp_standard";
pub const ALLOWED_C_STANDARDS: &str = "allowed_c_standards";
pub const ALLOWED_CPP_STANDARDS: &str = "allowed_cpp_standards";

// Build target tags
pub const TARGETS: &str = "targets";
pub const C_FLAGS: &str = "c_flags";
pub const CPP_FLAGS: &str = "cpp_flags";
pub const DEFAULT_TARGET: &str = "default_target";

// Output item tags
pub const OUTPUT: &str = "output";
pub const TYPE: &str = "type";
pub const BASE_FILE: &str = "base_file";
pub const R_SOURCE_DIRS: &str = "r_source_dirs";
pub const R_HEADER_DIRS: &str = "r_header_dirs";
pub const R_INCLUDE_DIRS: &str = "r_include_dirs";
pub const INCLUDE_DIRS: &str = "include_dirs";
pub const EXE_OUTPUT_DIR: &str = "executable_output_dir";
pub const ARCHIVE_OUTPUT_DIR: &str = "archive_output_dir";
pub const LIB_OUTPUT_DIR: &str = "library_output_dir";

// Imported library tags
pub const IMPORTED_LIBS: &str = "imported_libs";
pub const ROOT_DIR: &str = "root_dir";
pub const LIB_FILES: &str = "lib_files";
pub const HEADER_FILES: &str = "header_files";

pub const LINK_LIBS: &str = "link_libs";

pub const EXECUTABLE: &str = "executable";
pub const STATIC_LIB: &str = "static_lib";
pub const SHARED_LIB: &str = "shared_lib";
pub const OUTPUT_TYPES: &[&str] = &[EXECUTABLE, STATIC_LIB, SHARED_LIB];

pub const STATIC: &str = "static";
pub const SHARED: &str = "shared";
pub const LINKAGE_TYPES: &[&str] = &[STATIC, SHARED];

// CMake variable suffixes
pub const SOURCES_SUFFIX: &str = "_SOURCES";
pub const OUTPUT_SUFFIX: &str = "_CMAKE_OUTPUT";
pub const INCLUDE_DIRS_SUFFIX: &str = "_INCLUDE_DIRS";
pub const HEADER_FILES_SUFFIX: &str = "_HEADER_FILES";

// CMake operating system predicates
pub const WINDOWS_OS: &str = "WIN32";
pub const MAC_OS: &str = "APPLE";
pub const LINUX_OS: &str = "UNIX AND NOT APPLE";
pub const UNIX_OS: &str = "UNIX";

pub const C_SOURCE_TYPES: &[&str] = &["c"];
pub const CPP_SOURCE_TYPES: &[&str] = &["cpp", "cc", "c++", "cxx"];
pub const C_HEADER_TYPES: &[&str] = &["h"];
pub const CPP_HEADER_TYPES: &[&str] = &["hpp", "hh", "h++", "hxx", "h"];

/// Every suffix searched for by `r_source_dirs`.
pub fn source_types() -> Vec<&'static str> {
	merge_types(C_SOURCE_TYPES, CPP_SOURCE_TYPES)
}

/// Every suffix searched for by `r_header_dirs` and imported library includes.
pub fn header_types() -> Vec<&'static str> {
	merge_types(C_HEADER_TYPES, CPP_HEADER_TYPES)
}

fn merge_types(a: &[&'static str], b: &[&'static str]) -> Vec<&'static str> {
	let mut types = a.to_vec();
	for ext in b {
		if !types.contains(ext) {
			types.push(ext);
		}
	}
	types
}

#[test]
fn test_type_classes_are_unique() {
	let headers = header_types();
	assert_eq!(headers.iter().filter(|x| **x == "h").count(), 1);
	assert_eq!(headers.len(), 5);
	assert_eq!(source_types(), vec!["c", "cpp", "cc", "c++", "cxx"]);
}
