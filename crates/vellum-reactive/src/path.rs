//! Dotted-path resolution
//!
//! Template expressions are dotted field paths such as `person.address.city`.
//! Reads fold over the segments starting at a [`PathRoot`]; writes fold to the
//! penultimate segment and assign the last one. Both fail when an
//! intermediate segment is missing or does not resolve to an object.
//!
//! The leaf is allowed to be missing: a read yields null and a write defines
//! the field on its parent.
//!
//! Every segment read goes through [`ReactiveObject::lookup`], so an observer
//! evaluating a path subscribes to each existing field along it, not just the
//! leaf.

use core::fmt;
use core::str::FromStr;

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{ReactiveError, Result};
use crate::object::ReactiveObject;
use crate::value::ReactiveValue;

/// The scope a path starts from
///
/// [`ReactiveObject`] resolves its own fields; the pages layer implements it
/// for the view model so computed fields resolve alongside data fields.
pub trait PathRoot {
	/// Read the first segment of a path; `None` if the scope has no such name.
	fn read_root(&self, key: &str) -> Result<Option<ReactiveValue>>;

	/// Assign a single-segment path, adding the name if it is missing.
	/// Returns whether the value changed.
	fn write_root(&self, key: &str, value: ReactiveValue) -> Result<bool>;
}

/// A parsed dotted expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
	raw: String,
	segments: Vec<String>,
}

impl Path {
	/// Parse a dotted expression.
	///
	/// Surrounding whitespace is ignored, both for the whole expression and
	/// for each segment.
	pub fn parse(expression: &str) -> Result<Self> {
		let raw = expression.trim();
		if raw.is_empty() {
			return Err(ReactiveError::EmptyPath);
		}
		let segments = raw
			.split('.')
			.map(str::trim)
			.map(ToString::to_string)
			.collect::<Vec<_>>();
		if segments.iter().any(String::is_empty) {
			return Err(ReactiveError::EmptySegment {
				path: raw.to_string(),
			});
		}
		Ok(Self {
			raw: raw.to_string(),
			segments,
		})
	}

	/// The expression as written (trimmed)
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// The individual field names
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Number of segments, always at least one
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Returns true if the path has no segments; never the case once parsed.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	fn split_first(&self) -> (&str, &[String]) {
		// `parse` guarantees at least one segment
		match self.segments.split_first() {
			Some((first, rest)) => (first.as_str(), rest),
			None => ("", &[]),
		}
	}
}

impl FromStr for Path {
	type Err = ReactiveError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

/// Resolve `path` against `root`.
///
/// A missing leaf resolves to null.
pub fn get_path(root: &dyn PathRoot, path: &Path) -> Result<ReactiveValue> {
	let (first, rest) = path.split_first();
	let mut current = root.read_root(first).map_err(|e| e.within(path.as_str()))?;
	let mut reached = first;
	for segment in rest {
		let object = expect_object(current, path, reached, segment)?;
		current = object.lookup(segment);
		reached = segment.as_str();
	}
	Ok(current.unwrap_or_default())
}

/// Assign `value` at `path` under `root`.
///
/// A missing leaf is defined on its parent. Returns whether the terminal
/// field changed (and therefore notified).
pub fn set_path(root: &dyn PathRoot, path: &Path, value: impl Into<ReactiveValue>) -> Result<bool> {
	let value = value.into();
	let (first, rest) = path.split_first();
	let Some((last, middle)) = rest.split_last() else {
		return root
			.write_root(first, value)
			.map_err(|e| e.within(path.as_str()));
	};

	let mut current = root.read_root(first).map_err(|e| e.within(path.as_str()))?;
	let mut reached = first;
	for segment in middle {
		let object = expect_object(current, path, reached, segment)?;
		current = object.lookup(segment);
		reached = segment.as_str();
	}
	let parent = expect_object(current, path, reached, last)?;
	parent
		.assign(last, value)
		.map_err(|e| e.within(path.as_str()))
}

/// The object `reached` resolved to, before reading `next` from it
fn expect_object(
	value: Option<ReactiveValue>,
	path: &Path,
	reached: &str,
	next: &str,
) -> Result<ReactiveObject> {
	match value {
		Some(ReactiveValue::Object(object)) => Ok(object),
		Some(ReactiveValue::Primitive(_)) => Err(ReactiveError::NotAnObject {
			path: path.as_str().to_string(),
			segment: next.to_string(),
		}),
		None => Err(ReactiveError::MissingField {
			path: path.as_str().to_string(),
			segment: reached.to_string(),
		}),
	}
}
