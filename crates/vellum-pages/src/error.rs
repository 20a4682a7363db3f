//! Error types for vellum-pages

use thiserror::Error;
use vellum_reactive::ReactiveError;

/// Error type for compiling, mounting and dispatching
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
	/// An attribute carried the directive prefix but named no known directive
	#[error("Unknown directive `{name}`")]
	UnknownDirective {
		/// The full attribute name
		name: String,
	},

	/// A directive that needs an argument (`v-on:click`) had none
	#[error("Directive `{name}` requires an argument")]
	MissingArgument {
		/// The full attribute name
		name: String,
	},

	/// An event directive named a method the view model does not define
	#[error("Unknown method `{name}`")]
	UnknownMethod {
		/// The method name
		name: String,
	},

	/// The mount selector matched nothing
	#[error("Mount target `{selector}` not found")]
	RootNotFound {
		/// The selector that was queried
		selector: String,
	},

	/// The interpolation delimiters could not be turned into a pattern
	#[error("Invalid interpolation delimiters: {0}")]
	InvalidDelimiters(String),

	/// A read, write or notification failed
	#[error(transparent)]
	Reactive(#[from] ReactiveError),
}

/// Result type for vellum-pages operations
pub type Result<T> = std::result::Result<T, CompileError>;
