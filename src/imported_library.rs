use serde::Serialize;

use crate::{
	misc::{header_files_var, imported_identifier, include_dirs_var, with_index},
	output_unit::Linkage,
};

/// A prebuilt library that is linked against but not compiled.
#[derive(Debug, Clone, Serialize)]
pub struct ImportedLibrary {
	pub name: String,
	pub linkage: Linkage,
	pub root_dir: String,
	/// Project-relative paths without platform prefix or suffix, e.g. `third_party/zlib/lib/z`.
	pub lib_files: Vec<String>,
	pub include_dirs: Vec<String>,
	pub header_files: Vec<String>,
}

impl ImportedLibrary {
	/// One identifier per library file, `<name>_0` .. `<name>_<n-1>`.
	pub fn identifiers(&self) -> Vec<String> {
		let base = imported_identifier(&self.name);
		(0..self.lib_files.len()).map(|i| with_index(&base, i)).collect()
	}

	pub fn include_dirs_var(&self) -> String {
		include_dirs_var(&self.name)
	}

	pub fn header_files_var(&self) -> String {
		header_files_var(&self.name)
	}
}

/// Splits `dir/name` into (`dir/`, `name`).
pub(crate) fn split_lib_path(lib_file: &str) -> (&str, &str) {
	match lib_file.rfind('/') {
		Some(i) => (&lib_file[..=i], &lib_file[i + 1..]),
		None => ("", lib_file),
	}
}

/// File names used on Windows: the static library or import library, and the DLL.
pub(crate) fn windows_files(lib_file: &str) -> (String, String) {
	(format!("{}.lib", lib_file), format!("{}.dll", lib_file))
}

pub(crate) fn unix_file(lib_file: &str, ext: &str) -> String {
	let (dir, name) = split_lib_path(lib_file);
	format!("{}lib{}.{}", dir, name, ext)
}

#[test]
fn test_platform_file_names() {
	assert_eq!(unix_file("deps/zlib/lib/z", "a"), "deps/zlib/lib/libz.a");
	assert_eq!(unix_file("z", "so"), "libz.so");
	assert_eq!(windows_files("deps/zlib/lib/z"), ("deps/zlib/lib/z.lib".to_owned(), "deps/zlib/lib/z.dll".to_owned()));
}

#[test]
fn test_identifiers_fan_out() {
	let lib = ImportedLibrary {
		name: "SDL2".to_owned(),
		linkage: Linkage::Shared,
		root_dir: "deps/sdl2".to_owned(),
		lib_files: vec!["deps/sdl2/lib/SDL2".to_owned(), "deps/sdl2/lib/SDL2main".to_owned()],
		include_dirs: Vec::new(),
		header_files: Vec::new(),
	};
	assert_eq!(lib.identifiers(), vec!["sdl2_0", "sdl2_1"]);
	assert_eq!(lib.include_dirs_var(), "SDL2_INCLUDE_DIRS");
}
