use std::{
	collections::HashSet, //
	path::{Component, Path},
};

use crate::schema::{
	HEADER_FILES_SUFFIX, //
	INCLUDE_DIRS_SUFFIX,
	OUTPUT_SUFFIX,
	SOURCES_SUFFIX,
};

pub(crate) fn normalize_separators(path: &str) -> String {
	path.replace('\\', "/")
}

/// Converts `path` into the form written to the build script: relative to `root` when it lies under it,
/// with forward slashes and no leading `./`.
pub(crate) fn script_path(path: &Path, root: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);
	let mut ret = String::new();
	for component in relative.components() {
		let part = match component {
			Component::CurDir => continue,
			Component::RootDir => {
				ret.push('/');
				continue;
			}
			Component::Prefix(prefix) => {
				ret += &normalize_separators(&prefix.as_os_str().to_string_lossy());
				continue;
			}
			Component::ParentDir => "..".to_owned(),
			Component::Normal(x) => x.to_string_lossy().into_owned(),
		};
		if !ret.is_empty() && !ret.ends_with('/') {
			ret.push('/');
		}
		ret += &normalize_separators(&part);
	}
	if ret.is_empty() {
		".".to_owned()
	} else {
		ret
	}
}

pub fn var_ref(name: &str) -> String {
	format!("${{{}}}", name)
}

pub fn is_var_ref(entry: &str) -> bool {
	entry.len() > 3 && entry.starts_with("${") && entry.ends_with('}')
}

pub fn is_absolute(entry: &str) -> bool {
	entry.starts_with('/') || Path::new(entry).is_absolute()
}

/// Identifier used for compiled output targets.
pub fn output_identifier(name: &str) -> String {
	name.to_uppercase() + OUTPUT_SUFFIX
}

pub fn sources_var(name: &str) -> String {
	name.to_uppercase() + SOURCES_SUFFIX
}

pub fn include_dirs_var(name: &str) -> String {
	name.to_uppercase() + INCLUDE_DIRS_SUFFIX
}

pub fn header_files_var(name: &str) -> String {
	name.to_uppercase() + HEADER_FILES_SUFFIX
}

/// Base identifier of an imported library before the per-file index is appended.
pub fn imported_identifier(name: &str) -> String {
	name.to_lowercase()
}

pub fn with_index(name: &str, index: usize) -> String {
	format!("{}_{}", name, index)
}

/// `debug` -> `Debug`, `relWithDebInfo` -> `RelWithDebInfo`
pub fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Appends each item not already present, keeping first-seen order.
pub(crate) fn extend_unique(list: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
	let mut seen: HashSet<String> = list.iter().cloned().collect();
	for item in items {
		if seen.insert(item.clone()) {
			list.push(item);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_script_path_strips_root() {
		let root = PathBuf::from("/home/me/project");
		let path = root.join("src").join("main.cpp");
		let normalized = script_path(&path, &root);
		assert_eq!(normalized, "src/main.cpp");
		assert!(!normalized.starts_with("/home/me/project"));
	}

	#[test]
	fn test_script_path_current_dir_root() {
		let path = Path::new(".").join("src").join("a.c");
		assert_eq!(script_path(&path, Path::new(".")), "src/a.c");
		assert_eq!(script_path(Path::new("./include"), Path::new(".")), "include");
		assert_eq!(script_path(Path::new("."), Path::new(".")), ".");
	}

	#[test]
	fn test_script_path_outside_root() {
		let root = PathBuf::from("proj");
		assert_eq!(script_path(&root.join("..").join("shared").join("x.h"), &root), "../shared/x.h");
		assert_eq!(script_path(Path::new("/opt/lib/foo"), &root), "/opt/lib/foo");
	}

	#[test]
	fn test_normalize_separators() {
		assert_eq!(normalize_separators(r"src\nested\file.cpp"), "src/nested/file.cpp");
		assert!(!normalize_separators(r"a\b").contains('\\'));
	}

	#[test]
	fn test_var_refs() {
		assert_eq!(var_ref("FOO_INCLUDE_DIRS"), "${FOO_INCLUDE_DIRS}");
		assert!(is_var_ref("${FOO_HEADER_FILES}"));
		assert!(!is_var_ref("src/main.cpp"));
		assert!(!is_var_ref("${}"));
		assert!(!is_var_ref("${PROJECT_SOURCE_DIR}/main.cpp"));
	}

	#[test]
	fn test_identifiers() {
		assert_eq!(output_identifier("app"), "APP_CMAKE_OUTPUT");
		assert_eq!(sources_var("myLib"), "MYLIB_SOURCES");
		assert_eq!(include_dirs_var("zlib"), "ZLIB_INCLUDE_DIRS");
		assert_eq!(header_files_var("zlib"), "ZLIB_HEADER_FILES");
		assert_eq!(imported_identifier("SDL2"), "sdl2");
		assert_eq!(with_index("sdl2", 1), "sdl2_1");
		// Same input, same identifier
		assert_eq!(output_identifier("Core"), output_identifier("Core"));
	}

	#[test]
	fn test_capitalize() {
		assert_eq!(capitalize("debug"), "Debug");
		assert_eq!(capitalize("Release"), "Release");
		assert_eq!(capitalize("relWithDebInfo"), "RelWithDebInfo");
		assert_eq!(capitalize(""), "");
	}

	#[test]
	fn test_extend_unique() {
		let mut list = vec!["a".to_owned(), "b".to_owned()];
		extend_unique(&mut list, vec!["b".to_owned(), "c".to_owned(), "a".to_owned(), "c".to_owned()]);
		assert_eq!(list, vec!["a", "b", "c"]);
	}
}
