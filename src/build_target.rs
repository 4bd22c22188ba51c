use serde::Serialize;

use crate::misc::capitalize;

/// A named build configuration such as `debug` or `release`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildTarget {
	pub name: String,
	pub c_flags: Vec<String>,
	pub cpp_flags: Vec<String>,
}

impl BuildTarget {
	/// Value of `CMAKE_BUILD_TYPE` that selects this target.
	pub fn config_name(&self) -> String {
		capitalize(&self.name)
	}
}
