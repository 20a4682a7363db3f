//! Error types for vellum-reactive

use thiserror::Error;

/// Error type for reactive reads, writes and notifications
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
	/// The expression contained no segments at all
	#[error("Expression is empty")]
	EmptyPath,

	/// The expression contained an empty segment (`a..b`, `.a`)
	#[error("Expression `{path}` contains an empty segment")]
	EmptySegment {
		/// The offending expression
		path: String,
	},

	/// An intermediate segment resolved to a primitive
	#[error("Cannot read `{segment}` of a non-object value while resolving `{path}`")]
	NotAnObject {
		/// The expression being resolved
		path: String,
		/// The segment that could not be read
		segment: String,
	},

	/// A segment named a field that does not exist
	#[error("Field `{segment}` does not exist while resolving `{path}`")]
	MissingField {
		/// The expression being resolved
		path: String,
		/// The missing field
		segment: String,
	},

	/// A data root was not an object
	#[error("Reactive data root must be an object, found {found}")]
	InvalidRoot {
		/// Kind of the value that was supplied
		found: String,
	},

	/// A write targeted a computed field defined without a setter
	#[error("Computed field `{name}` is read-only")]
	ReadOnly {
		/// Name of the computed field
		name: String,
	},

	/// A render callback reported a failure
	#[error("Render callback failed: {0}")]
	Render(String),
}

impl ReactiveError {
	/// Re-attributes a resolution error to the full expression it occurred in.
	pub fn within(self, expression: &str) -> Self {
		match self {
			Self::NotAnObject { segment, .. } => Self::NotAnObject {
				path: expression.to_string(),
				segment,
			},
			Self::MissingField { segment, .. } => Self::MissingField {
				path: expression.to_string(),
				segment,
			},
			other => other,
		}
	}
}

/// Result type for reactive operations
pub type Result<T> = std::result::Result<T, ReactiveError>;
