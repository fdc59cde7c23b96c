//! Error types for DOM reconciliation and property table construction.

/// Errors surfaced by DOM mutations.
///
/// The reconciler never catches these; any rejection from the DOM layer is
/// returned to the caller unchanged.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The current environment has no DOM to mutate.
	#[error("DOM unavailable: the current environment cannot use the DOM")]
	Unavailable,

	/// An attribute name is not a valid XML name.
	#[error("Invalid character in attribute name: '{name}'")]
	InvalidCharacter {
		/// The rejected attribute name.
		name: String,
	},

	/// A qualified name does not fit its namespace.
	#[error("Namespace error: '{name}' is not valid in namespace {namespace:?}")]
	Namespace {
		/// The namespace URI the attribute was written in.
		namespace: String,
		/// The rejected qualified name.
		name: String,
	},

	/// Any other exception raised by the DOM layer.
	#[error("DOM exception: {0}")]
	Exception(String),
}

/// Errors raised while building a [`PropertyTable`](crate::PropertyTable).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TableError {
	/// A logical property name was empty.
	#[error("Property name cannot be empty")]
	EmptyName,

	/// A field-backed descriptor has no property name.
	#[error("Property '{name}' must use a node field but has no property name")]
	MissingPropertyName {
		/// The logical property name.
		name: String,
	},

	/// An attribute-backed descriptor has no attribute name.
	#[error("Property '{name}' is attribute-backed but has no attribute name")]
	MissingAttributeName {
		/// The logical property name.
		name: String,
	},

	/// The same logical name was registered twice in one builder.
	#[error("Property '{name}' is already registered")]
	Duplicate {
		/// The logical property name.
		name: String,
	},

	/// A property configuration document could not be parsed.
	#[error("Invalid property configuration: {0}")]
	Config(#[from] serde_json::Error),
}
