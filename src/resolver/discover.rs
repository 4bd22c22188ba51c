use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::misc::{extend_unique, script_path};

fn is_hidden(entry: &DirEntry) -> bool {
	entry.depth() > 0 && entry.file_name().to_str().is_some_and(|x| x.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
	match path.extension().and_then(|x| x.to_str()) {
		Some(ext) => extensions.contains(&ext),
		None => false,
	}
}

fn walk(base: &Path, search_dir: &str) -> impl Iterator<Item = DirEntry> {
	let dir = base.join(search_dir);
	if !dir.is_dir() {
		log::warn!("Search directory does not exist: \"{}\"", dir.display());
	}
	WalkDir::new(dir)
		.follow_links(true)
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|x| !is_hidden(x))
		.filter_map(|x| match x {
			Ok(entry) => Some(entry),
			Err(e) => {
				// A missing search root was already reported above
				if e.depth() > 0 {
					log::warn!("Skipping unreadable entry: {}", e);
				}
				None
			}
		})
}

/// Files under each of `search_dirs` (relative to `base`) whose extension is one of `extensions`.
/// Paths are returned relative to `root` with forward slashes, each file once, in walk order.
pub(crate) fn files_recursive(root: &Path, base: &Path, search_dirs: &[String], extensions: &[&str]) -> Vec<String> {
	let mut files = Vec::new();
	for search_dir in search_dirs {
		let found = walk(base, search_dir)
			.filter(|x| x.file_type().is_file() && has_extension(x.path(), extensions))
			.map(|x| script_path(x.path(), root));
		extend_unique(&mut files, found);
	}
	log::debug!("found {} files under [{}]", files.len(), search_dirs.join(", "));
	files
}

/// Each of `search_dirs` (relative to `base`) and every directory below it, relative to `root`.
pub(crate) fn dirs_recursive(root: &Path, base: &Path, search_dirs: &[String]) -> Vec<String> {
	let mut dirs = Vec::new();
	for search_dir in search_dirs {
		let found = walk(base, search_dir)
			.filter(|x| x.file_type().is_dir())
			.map(|x| script_path(x.path(), root));
		extend_unique(&mut dirs, found);
	}
	log::debug!("found {} directories under [{}]", dirs.len(), search_dirs.join(", "));
	dirs
}
