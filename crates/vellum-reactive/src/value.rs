//! Reactive Value
//!
//! The closed value-kind model the store works with. A plain data value is
//! turned into a [`ReactiveValue`] by [`wrap`], the single place that decides
//! what becomes reactive:
//!
//! | Input | Result |
//! |-------|--------|
//! | object | [`ReactiveValue::Object`], every field wrapped recursively |
//! | array | [`ReactiveValue::Primitive`], stored as-is (arrays are not intercepted) |
//! | null, bool, number, string | [`ReactiveValue::Primitive`] |
//!
//! Equality follows strict inequality semantics: primitives compare by value,
//! objects by identity.

use core::fmt;

use serde_json::{Map, Value as JsonValue};

use crate::object::ReactiveObject;

/// A value held by a reactive field
#[derive(Clone)]
pub enum ReactiveValue {
	/// A value that is reactive only through the field that owns it
	Primitive(JsonValue),
	/// A nested object whose fields are reactive themselves
	Object(ReactiveObject),
}

/// Turn a plain value into its reactive form.
///
/// Objects are wrapped field by field, transitively; everything else is kept
/// as a primitive.
pub fn wrap(value: JsonValue) -> ReactiveValue {
	match value {
		JsonValue::Object(map) => ReactiveValue::Object(ReactiveObject::from_map(map)),
		other => ReactiveValue::Primitive(other),
	}
}

impl ReactiveValue {
	/// Returns true for nested objects.
	pub fn is_object(&self) -> bool {
		matches!(self, Self::Object(_))
	}

	/// The nested object, if this is one
	pub fn as_object(&self) -> Option<&ReactiveObject> {
		match self {
			Self::Object(object) => Some(object),
			Self::Primitive(_) => None,
		}
	}

	/// The primitive payload, if this is one
	pub fn as_primitive(&self) -> Option<&JsonValue> {
		match self {
			Self::Primitive(value) => Some(value),
			Self::Object(_) => None,
		}
	}

	/// The string payload, if this is a string primitive
	pub fn as_str(&self) -> Option<&str> {
		self.as_primitive().and_then(JsonValue::as_str)
	}

	/// Snapshot into a plain value without tracking any reads.
	pub fn to_json(&self) -> JsonValue {
		match self {
			Self::Primitive(value) => value.clone(),
			Self::Object(object) => object.to_json(),
		}
	}

	/// Text used when the value is written into the document.
	///
	/// Strings are inserted verbatim, numbers in their shortest form, arrays
	/// as comma-joined elements and objects as `[object Object]`.
	pub fn to_display_string(&self) -> String {
		match self {
			Self::Primitive(value) => display_primitive(value),
			Self::Object(_) => OBJECT_TEXT.to_string(),
		}
	}

	/// Text used when the value is assigned to a node property such as its
	/// text content, inner markup or input value.
	///
	/// Same as [`ReactiveValue::to_display_string`] except that null clears
	/// the property.
	pub fn to_property_string(&self) -> String {
		match self {
			Self::Primitive(JsonValue::Null) => String::new(),
			other => other.to_display_string(),
		}
	}
}

const OBJECT_TEXT: &str = "[object Object]";

fn display_primitive(value: &JsonValue) -> String {
	match value {
		JsonValue::Null => "null".to_string(),
		JsonValue::Bool(flag) => flag.to_string(),
		JsonValue::Number(number) => {
			if let Some(int) = number.as_i64() {
				int.to_string()
			} else if let Some(uint) = number.as_u64() {
				uint.to_string()
			} else {
				// f64 Display already drops a zero fraction
				number.as_f64().map(|float| float.to_string()).unwrap_or_default()
			}
		}
		JsonValue::String(text) => text.clone(),
		JsonValue::Array(items) => items
			.iter()
			.map(|item| match item {
				JsonValue::Null => String::new(),
				JsonValue::Object(_) => OBJECT_TEXT.to_string(),
				other => display_primitive(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		JsonValue::Object(_) => OBJECT_TEXT.to_string(),
	}
}

impl PartialEq for ReactiveValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Primitive(a), Self::Primitive(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl Default for ReactiveValue {
	fn default() -> Self {
		Self::Primitive(JsonValue::Null)
	}
}

impl fmt::Debug for ReactiveValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(value) => f.debug_tuple("Primitive").field(value).finish(),
			Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
		}
	}
}

impl fmt::Display for ReactiveValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_display_string())
	}
}

impl From<JsonValue> for ReactiveValue {
	fn from(value: JsonValue) -> Self {
		wrap(value)
	}
}

impl From<Map<String, JsonValue>> for ReactiveValue {
	fn from(map: Map<String, JsonValue>) -> Self {
		Self::Object(ReactiveObject::from_map(map))
	}
}

// Already reactive: keep identity, never re-wrap
impl From<ReactiveObject> for ReactiveValue {
	fn from(object: ReactiveObject) -> Self {
		Self::Object(object)
	}
}

macro_rules! impl_from_primitive {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ReactiveValue {
				fn from(value: $ty) -> Self {
					Self::Primitive(JsonValue::from(value))
				}
			}
		)*
	};
}

impl_from_primitive!(bool, i32, i64, u32, u64, f64, String, &str);

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), "null")]
	#[case(json!(true), "true")]
	#[case(json!(2), "2")]
	#[case(json!(-7), "-7")]
	#[case(json!(2.5), "2.5")]
	#[case(json!(1.0), "1")]
	#[case(json!("Alice"), "Alice")]
	#[case(json!([1, null, "x"]), "1,,x")]
	#[case(json!({ "a": 1 }), "[object Object]")]
	fn test_display_string(#[case] input: JsonValue, #[case] expected: &str) {
		assert_eq!(wrap(input).to_display_string(), expected);
	}

	#[rstest]
	#[case(json!(null), "")]
	#[case(json!(0), "0")]
	#[case(json!(false), "false")]
	#[case(json!("text"), "text")]
	fn test_property_string_clears_null(#[case] input: JsonValue, #[case] expected: &str) {
		assert_eq!(wrap(input).to_property_string(), expected);
	}

	#[rstest]
	fn test_wrap_objects_recursively() {
		let value = wrap(json!({ "person": { "address": { "city": "Oslo" } }, "tags": ["a"] }));

		let person = value.as_object().unwrap().get_untracked("person").unwrap();
		let address = person.as_object().unwrap().get_untracked("address").unwrap();
		assert!(address.is_object());

		let tags = value.as_object().unwrap().get_untracked("tags").unwrap();
		assert_eq!(tags.as_primitive(), Some(&json!(["a"])));
	}

	#[rstest]
	fn test_objects_compare_by_identity() {
		let a = wrap(json!({ "x": 1 }));
		let b = wrap(json!({ "x": 1 }));

		assert_ne!(a, b);
		assert_eq!(a, a.clone());
	}

	#[rstest]
	fn test_rewrapping_an_object_keeps_identity() {
		let object = ReactiveObject::from_json(json!({ "x": 1 })).unwrap();
		let value: ReactiveValue = object.clone().into();

		assert!(value.as_object().unwrap().ptr_eq(&object));
	}

	proptest! {
		#[test]
		fn prop_primitive_equality_matches_json(a in any::<i64>(), b in any::<i64>()) {
			prop_assert_eq!(ReactiveValue::from(a) == ReactiveValue::from(b), a == b);
		}

		#[test]
		fn prop_strings_display_verbatim(text in ".*") {
			prop_assert_eq!(ReactiveValue::from(text.as_str()).to_display_string(), text);
		}
	}
}
