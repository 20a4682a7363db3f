//! Reactive Object
//!
//! `ReactiveObject` is the reactive store: every field owns its current value
//! and one [`DependencySet`]. Field access is intercepted through explicit
//! methods instead of property traps:
//!
//! - [`ReactiveObject::get`] subscribes the active observer (if any) and
//!   returns the stored value.
//! - [`ReactiveObject::set`] is a no-op when the new value equals the stored
//!   one. Otherwise the value is stored and the field's dependents are
//!   notified synchronously.
//!
//! The equality gate is the only thing that stops a render callback which
//! writes back the value it just read from notifying itself forever.
//!
//! ## Example
//!
//! ```ignore
//! use serde_json::json;
//! use vellum_reactive::ReactiveObject;
//!
//! let data = ReactiveObject::from_json(json!({ "person": { "name": "Alice" } }))?;
//! let person = data.get("person")?;
//! person.as_object().unwrap().set("name", "Bob")?;
//! ```

use core::cell::RefCell;
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map, Value as JsonValue};

use crate::dependency::DependencySet;
use crate::error::{ReactiveError, Result};
use crate::path::PathRoot;
use crate::tracking;
use crate::value::ReactiveValue;

/// One reactive field: its stored value and the observers depending on it
pub(crate) struct ReactiveField {
	value: RefCell<ReactiveValue>,
	dependents: DependencySet,
}

impl ReactiveField {
	fn new(value: ReactiveValue) -> Self {
		Self {
			value: RefCell::new(value),
			dependents: DependencySet::new(),
		}
	}
}

/// A shared handle to an object whose fields are reactive
///
/// Cloning the handle shares the same fields; two handles are equal only if
/// they point to the same object.
#[derive(Clone, Default)]
pub struct ReactiveObject {
	fields: Rc<RefCell<Vec<(String, Rc<ReactiveField>)>>>,
}

impl ReactiveObject {
	/// Create an object with no fields
	pub fn new() -> Self {
		Self::default()
	}

	/// Wrap a plain object.
	///
	/// Fails with [`ReactiveError::InvalidRoot`] when `value` is not an object.
	pub fn from_json(value: JsonValue) -> Result<Self> {
		match value {
			JsonValue::Object(map) => Ok(Self::from_map(map)),
			other => Err(ReactiveError::InvalidRoot {
				found: kind_name(&other).to_string(),
			}),
		}
	}

	/// Wrap every entry of `map`, recursively.
	pub fn from_map(map: Map<String, JsonValue>) -> Self {
		let object = Self::new();
		for (key, value) in map {
			object.define(key, value);
		}
		object
	}

	/// Make `key` a reactive field holding `value`.
	///
	/// `value` is wrapped before the field exists, so nested objects are
	/// reactive before the first read. Defining a key that already exists
	/// behaves like [`ReactiveObject::set`] but never fails: the existing
	/// dependency set is kept and notified.
	pub fn define(&self, key: impl Into<String>, value: impl Into<ReactiveValue>) {
		let key = key.into();
		let value = value.into();
		if self.field(&key).is_some() {
			if let Err(error) = self.set(&key, value) {
				tracing::warn!(field = %key, %error, "redefining field notified a failing observer");
			}
			return;
		}
		self.fields
			.borrow_mut()
			.push((key, Rc::new(ReactiveField::new(value))));
	}

	/// Read a field, subscribing the active observer to it.
	///
	/// Fails with [`ReactiveError::MissingField`] if the field does not exist.
	pub fn get(&self, key: &str) -> Result<ReactiveValue> {
		self.lookup(key).ok_or_else(|| missing_field(key))
	}

	/// Read a field if it exists, subscribing the active observer to it.
	pub fn lookup(&self, key: &str) -> Option<ReactiveValue> {
		let field = self.field(key)?;
		tracking::subscribe_active(&field.dependents);
		Some(field.value.borrow().clone())
	}

	/// Read a field without subscribing anyone.
	pub fn get_untracked(&self, key: &str) -> Result<ReactiveValue> {
		let field = self.require(key)?;
		Ok(field.value.borrow().clone())
	}

	/// Write a field.
	///
	/// Returns `Ok(false)` without notifying when `value` equals the stored
	/// value. Otherwise stores it and notifies the field's dependents,
	/// returning the first error an observer reports.
	pub fn set(&self, key: &str, value: impl Into<ReactiveValue>) -> Result<bool> {
		let field = self.require(key)?;
		let value = value.into();
		if *field.value.borrow() == value {
			tracing::trace!(field = key, "write skipped, value unchanged");
			return Ok(false);
		}
		field.value.replace(value);
		tracing::trace!(field = key, "field changed");
		field.dependents.publish()?;
		Ok(true)
	}

	/// Write a field, defining it first if it does not exist.
	///
	/// Defining a new field counts as a change but notifies nobody, since
	/// nothing can depend on a field before it exists.
	pub fn assign(&self, key: &str, value: impl Into<ReactiveValue>) -> Result<bool> {
		if self.contains_key(key) {
			return self.set(key, value);
		}
		tracing::trace!(field = key, "defining field on write");
		self.define(key, value);
		Ok(true)
	}

	/// Whether `key` is a field of this object
	pub fn contains_key(&self, key: &str) -> bool {
		self.field(key).is_some()
	}

	/// Field names in definition order
	pub fn keys(&self) -> Vec<String> {
		self.fields
			.borrow()
			.iter()
			.map(|(key, _)| key.clone())
			.collect()
	}

	/// Number of fields
	pub fn len(&self) -> usize {
		self.fields.borrow().len()
	}

	/// Returns true if the object has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.borrow().is_empty()
	}

	/// Number of subscription entries on `key`'s dependency set.
	///
	/// `None` if the field does not exist.
	pub fn subscriber_count(&self, key: &str) -> Option<usize> {
		self.field(key).map(|field| field.dependents.len())
	}

	/// Snapshot into a plain object without tracking any reads.
	pub fn to_json(&self) -> JsonValue {
		let map = self
			.fields
			.borrow()
			.iter()
			.map(|(key, field)| (key.clone(), field.value.borrow().to_json()))
			.collect::<Map<_, _>>();
		JsonValue::Object(map)
	}

	/// Whether both handles point to the same object.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.fields, &other.fields)
	}

	fn field(&self, key: &str) -> Option<Rc<ReactiveField>> {
		self.fields
			.borrow()
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, field)| Rc::clone(field))
	}

	fn require(&self, key: &str) -> Result<Rc<ReactiveField>> {
		self.field(key).ok_or_else(|| missing_field(key))
	}
}

impl PathRoot for ReactiveObject {
	fn read_root(&self, key: &str) -> Result<Option<ReactiveValue>> {
		Ok(self.lookup(key))
	}

	fn write_root(&self, key: &str, value: ReactiveValue) -> Result<bool> {
		self.assign(key, value)
	}
}

impl PartialEq for ReactiveObject {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for ReactiveObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReactiveObject")
			.field("value", &self.to_json())
			.finish()
	}
}

fn missing_field(key: &str) -> ReactiveError {
	ReactiveError::MissingField {
		path: key.to_string(),
		segment: key.to_string(),
	}
}

fn kind_name(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
