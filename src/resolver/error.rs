use core::fmt;
use std::{
	error::Error, //
	io,
	path::PathBuf,
};

use crate::schema::DESCRIPTOR_FILE;

#[derive(Debug)]
pub enum ResolveError {
	/// The descriptor file does not exist.
	NotFound { path: PathBuf },
	Io { path: PathBuf, source: io::Error },
	Parse { path: PathBuf, source: serde_json::Error },
	/// The root argument is not a usable project directory.
	InvalidRoot { path: PathBuf, reason: String },
	MissingField { field: String, parent: Option<String>, reason: Option<&'static str> },
	WrongType { field: String, parent: Option<String>, expected: &'static str },
	InvalidEnum { field: String, parent: Option<String>, value: String, allowed: &'static [&'static str] },
	EmptyField { field: String, parent: Option<String>, reason: &'static str },
	UnknownReference { name: String, field: &'static str, expected_in: &'static str },
	/// Two outputs or imported libraries whose names differ only in letter case.
	DuplicateName { name: String, previous: String, field: &'static str },
}

impl ResolveError {
	/// Name of the descriptor field responsible for this error, if any.
	pub fn field(&self) -> Option<&str> {
		match self {
			ResolveError::MissingField { field, .. }
			| ResolveError::WrongType { field, .. }
			| ResolveError::InvalidEnum { field, .. }
			| ResolveError::EmptyField { field, .. } => Some(field.as_str()),
			ResolveError::UnknownReference { field, .. } | ResolveError::DuplicateName { field, .. } => Some(*field),
			_ => None,
		}
	}

	pub fn parent(&self) -> Option<&str> {
		match self {
			ResolveError::MissingField { parent, .. }
			| ResolveError::WrongType { parent, .. }
			| ResolveError::InvalidEnum { parent, .. }
			| ResolveError::EmptyField { parent, .. } => parent.as_deref(),
			_ => None,
		}
	}

	/// True for errors in the descriptor's contents rather than in reading it.
	pub fn is_schema_error(&self) -> bool {
		self.field().is_some()
	}
}

fn write_location(f: &mut fmt::Formatter<'_>, parent: &Option<String>) -> fmt::Result {
	match parent {
		Some(parent) => write!(f, "Please add it inside its parent tag \"{}\".", parent),
		None => write!(f, "Please add it to the file."),
	}
}

fn field_path(field: &str, parent: &Option<String>) -> String {
	match parent {
		Some(parent) => format!("{}.{}", parent, field),
		None => field.to_owned(),
	}
}

impl fmt::Display for ResolveError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResolveError::NotFound { path } => write!(f, "{} not found: {}", DESCRIPTOR_FILE, path.display()),
			ResolveError::Io { path, source } => write!(f, "Error reading {}: {}", path.display(), source),
			ResolveError::Parse { path, source } => write!(f, "Error parsing {}: {}", path.display(), source),
			ResolveError::InvalidRoot { path, reason } => {
				write!(f, "Invalid project root \"{}\": {}", path.display(), reason)
			}
			ResolveError::MissingField { field, parent, reason } => {
				write!(f, "Tag \"{}\" missing in {}. ", field, DESCRIPTOR_FILE)?;
				write_location(f, parent)?;
				if let Some(reason) = reason {
					write!(f, "\n{}", reason)?;
				}
				Ok(())
			}
			ResolveError::WrongType { field, parent, expected } => write!(
				f,
				"Tag \"{}\" in {} has the wrong type. Expected {}.",
				field_path(field, parent),
				DESCRIPTOR_FILE,
				expected
			),
			ResolveError::InvalidEnum { field, parent, value, allowed } => write!(
				f,
				"Tag \"{}\" in {} has invalid value \"{}\". Options: {}",
				field_path(field, parent),
				DESCRIPTOR_FILE,
				value,
				allowed.iter().map(|x| format!("\"{}\"", x)).collect::<Vec<_>>().join(", ")
			),
			ResolveError::EmptyField { field, parent, reason } => write!(
				f,
				"Tag \"{}\" in {} must not be empty.\n{}",
				field_path(field, parent),
				DESCRIPTOR_FILE,
				reason
			),
			ResolveError::UnknownReference { name, field, expected_in } => write!(
				f,
				"\"{}\" tag in \"{}\" not found in {}. Make sure your names match.",
				name, field, expected_in
			),
			ResolveError::DuplicateName { name, previous, field } => write!(
				f,
				"\"{}\" in \"{}\" clashes with \"{}\". Output and imported library names must differ by more than letter case.",
				name, field, previous
			),
		}
	}
}

impl Error for ResolveError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			ResolveError::Io { source, .. } => Some(source),
			ResolveError::Parse { source, .. } => Some(source),
			_ => None,
		}
	}
}

#[test]
fn test_missing_field_message() {
	let err = ResolveError::MissingField {
		field: "type".to_owned(),
		parent: Some("app".to_owned()),
		reason: Some("Without a type, we do not know what to compile your code into."),
	};
	assert_eq!(
		err.to_string(),
		"Tag \"type\" missing in cmake_data.json. Please add it inside its parent tag \"app\".\nWithout a type, we do not know what to compile your code into."
	);
	assert_eq!(err.field(), Some("type"));
	assert_eq!(err.parent(), Some("app"));
	assert!(err.is_schema_error());

	let err = ResolveError::MissingField { field: "project_name".to_owned(), parent: None, reason: None };
	assert_eq!(err.to_string(), "Tag \"project_name\" missing in cmake_data.json. Please add it to the file.");
}
