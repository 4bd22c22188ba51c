use serde_json::{Map, Value};

use super::error::ResolveError;

/// Typed access to the members of one descriptor object. Errors name the member and, below the top level,
/// the key of the enclosing entry.
#[derive(Clone, Copy)]
pub(crate) struct Fields<'a> {
	map: &'a Map<String, Value>,
	parent: Option<&'a str>,
}

impl<'a> Fields<'a> {
	pub(crate) fn new(map: &'a Map<String, Value>, parent: Option<&'a str>) -> Self {
		Fields { map, parent }
	}

	/// Fields of the object stored under `name` in `map`, where `map` was read from `tag`.
	pub(crate) fn entry(&self, tag: &str, name: &'a str, value: &'a Value) -> Result<Fields<'a>, ResolveError> {
		match value.as_object() {
			Some(map) => Ok(Fields::new(map, Some(name))),
			None => Err(ResolveError::WrongType {
				field: name.to_owned(),
				parent: Some(tag.to_owned()),
				expected: "an object",
			}),
		}
	}

	pub(crate) fn missing(&self, tag: &str, why: Option<&'static str>) -> ResolveError {
		ResolveError::MissingField { field: tag.to_owned(), parent: self.parent.map(str::to_owned), reason: why }
	}

	pub(crate) fn wrong_type(&self, tag: &str, expected: &'static str) -> ResolveError {
		ResolveError::WrongType { field: tag.to_owned(), parent: self.parent.map(str::to_owned), expected }
	}

	pub(crate) fn empty(&self, tag: &str, why: &'static str) -> ResolveError {
		ResolveError::EmptyField { field: tag.to_owned(), parent: self.parent.map(str::to_owned), reason: why }
	}

	pub(crate) fn invalid_enum(&self, tag: &str, value: &str, allowed: &'static [&'static str]) -> ResolveError {
		ResolveError::InvalidEnum {
			field: tag.to_owned(),
			parent: self.parent.map(str::to_owned),
			value: value.to_owned(),
			allowed,
		}
	}

	pub(crate) fn require(&self, tag: &str, why: Option<&'static str>) -> Result<&'a Value, ResolveError> {
		match self.map.get(tag) {
			Some(x) => Ok(x),
			None => Err(self.missing(tag, why)),
		}
	}

	pub(crate) fn require_str(&self, tag: &str, why: Option<&'static str>) -> Result<String, ResolveError> {
		match self.require(tag, why)? {
			Value::String(x) => Ok(x.clone()),
			_ => Err(self.wrong_type(tag, "a string")),
		}
	}

	pub(crate) fn optional_str(&self, tag: &str) -> Result<Option<String>, ResolveError> {
		match self.map.get(tag) {
			None | Some(Value::Null) => Ok(None),
			Some(Value::String(x)) => Ok(Some(x.clone())),
			Some(_) => Err(self.wrong_type(tag, "a string")),
		}
	}

	/// A string or a number, rendered as text. Language standards are commonly written either way.
	pub(crate) fn optional_scalar(&self, tag: &str) -> Result<Option<String>, ResolveError> {
		match self.map.get(tag) {
			None | Some(Value::Null) => Ok(None),
			Some(value) => match scalar_string(value) {
				Some(x) => Ok(Some(x)),
				None => Err(self.wrong_type(tag, "a string or a number")),
			},
		}
	}

	pub(crate) fn require_scalar_list(&self, tag: &str, why: Option<&'static str>) -> Result<Vec<String>, ResolveError> {
		let items = match self.require(tag, why)? {
			Value::Array(x) => x,
			_ => return Err(self.wrong_type(tag, "an array of strings or numbers")),
		};
		items
			.iter()
			.map(|x| scalar_string(x).ok_or_else(|| self.wrong_type(tag, "an array of strings or numbers")))
			.collect()
	}

	pub(crate) fn require_str_list(&self, tag: &str, why: Option<&'static str>) -> Result<Vec<String>, ResolveError> {
		let value = self.require(tag, why)?;
		self.str_list(tag, value)
	}

	/// An absent list reads as empty.
	pub(crate) fn optional_str_list(&self, tag: &str) -> Result<Vec<String>, ResolveError> {
		match self.map.get(tag) {
			None | Some(Value::Null) => Ok(Vec::new()),
			Some(value) => self.str_list(tag, value),
		}
	}

	fn str_list(&self, tag: &str, value: &Value) -> Result<Vec<String>, ResolveError> {
		let items = match value {
			Value::Array(x) => x,
			_ => return Err(self.wrong_type(tag, "an array of strings")),
		};
		items
			.iter()
			.map(|x| match x {
				Value::String(s) => Ok(s.clone()),
				_ => Err(self.wrong_type(tag, "an array of strings")),
			})
			.collect()
	}

	pub(crate) fn require_object(
		&self,
		tag: &str,
		why: Option<&'static str>,
	) -> Result<&'a Map<String, Value>, ResolveError> {
		match self.require(tag, why)? {
			Value::Object(x) => Ok(x),
			_ => Err(self.wrong_type(tag, "an object")),
		}
	}

	pub(crate) fn optional_object(&self, tag: &str) -> Result<Option<&'a Map<String, Value>>, ResolveError> {
		match self.map.get(tag) {
			None | Some(Value::Null) => Ok(None),
			Some(Value::Object(x)) => Ok(Some(x)),
			Some(_) => Err(self.wrong_type(tag, "an object")),
		}
	}
}

fn scalar_string(value: &Value) -> Option<String> {
	match value {
		Value::String(x) => Some(x.clone()),
		Value::Number(x) => Some(x.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_require_reports_parent() {
		let value = json!({ "r_source_dirs": ["src"] });
		let fields = Fields::new(value.as_object().unwrap(), Some("app"));
		let err = fields.require_str("type", None).unwrap_err();
		assert_eq!(err.field(), Some("type"));
		assert_eq!(err.parent(), Some("app"));
		assert!(matches!(err, ResolveError::MissingField { .. }));
	}

	#[test]
	fn test_wrong_types() {
		let value = json!({ "type": 3, "dirs": ["a", 1], "obj": [] });
		let fields = Fields::new(value.as_object().unwrap(), None);
		assert!(matches!(fields.require_str("type", None), Err(ResolveError::WrongType { .. })));
		assert!(matches!(fields.require_str_list("dirs", None), Err(ResolveError::WrongType { .. })));
		assert!(matches!(fields.optional_object("obj"), Err(ResolveError::WrongType { .. })));
	}

	#[test]
	fn test_scalars_and_optionals() {
		let value = json!({ "allowed": [11, "14", 17], "default": 17 });
		let fields = Fields::new(value.as_object().unwrap(), None);
		assert_eq!(fields.require_scalar_list("allowed", None).unwrap(), vec!["11", "14", "17"]);
		assert_eq!(fields.optional_scalar("default").unwrap(), Some("17".to_owned()));
		assert_eq!(fields.optional_scalar("absent").unwrap(), None);
		assert!(fields.optional_str_list("absent").unwrap().is_empty());
		assert!(fields.optional_object("absent").unwrap().is_none());
	}
}
