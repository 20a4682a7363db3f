//! The view model: the scope templates are evaluated against
//!
//! A [`ViewModel`] combines the reactive data object with computed fields
//! and methods. Every data field, computed field and method name is
//! reachable directly on the scope:
//!
//! - [`ViewModel::get`] / [`ViewModel::set`] read and write a top-level name,
//!   resolving computed fields first and data fields second
//! - [`ViewModel::get_path`] / [`ViewModel::set_path`] do the same for dotted
//!   expressions
//! - [`ViewModel::call`] invokes a method with the scope bound
//!
//! The handle is cheap to clone; clones share the same scope.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use vellum_dom::Event;
use vellum_reactive::{Path, PathRoot, ReactiveObject, ReactiveValue};

use crate::computed::Computed;
use crate::error::{CompileError, Result};

/// A method invokable from an event directive
pub type Method = Rc<dyn Fn(&ViewModel, &Event) -> vellum_reactive::Result<()>>;

/// Wrap a closure as a [`Method`].
pub fn method<F>(f: F) -> Method
where
	F: Fn(&ViewModel, &Event) -> vellum_reactive::Result<()> + 'static,
{
	Rc::new(f)
}

struct Scope {
	data: ReactiveObject,
	computed: Vec<(String, Computed)>,
	methods: HashMap<String, Method>,
}

/// Shared handle to a data object with its computed fields and methods
#[derive(Clone)]
pub struct ViewModel {
	scope: Rc<Scope>,
}

impl ViewModel {
	/// Create a scope over `data`.
	///
	/// A computed field whose name is also a data field shadows it.
	pub fn new(
		data: ReactiveObject,
		computed: Vec<(String, Computed)>,
		methods: Vec<(String, Method)>,
	) -> Self {
		for (name, _) in &computed {
			if data.contains_key(name) {
				tracing::warn!(%name, "computed field shadows a data field");
			}
		}
		Self {
			scope: Rc::new(Scope {
				data,
				computed,
				methods: methods.into_iter().collect(),
			}),
		}
	}

	/// A scope with data only
	pub fn from_data(data: ReactiveObject) -> Self {
		Self::new(data, Vec::new(), Vec::new())
	}

	/// The underlying data object
	pub fn data(&self) -> &ReactiveObject {
		&self.scope.data
	}

	/// Read a top-level name (tracked). A missing name reads as null.
	pub fn get(&self, name: &str) -> vellum_reactive::Result<ReactiveValue> {
		Ok(self.read_root(name)?.unwrap_or_default())
	}

	/// Write a top-level name, defining a data field if it is missing.
	///
	/// Returns whether a data field changed. Writes through a computed
	/// setter always report a change.
	pub fn set(&self, name: &str, value: impl Into<ReactiveValue>) -> vellum_reactive::Result<bool> {
		self.write_root(name, value.into())
	}

	/// Read a dotted expression.
	pub fn get_path(&self, expression: &str) -> vellum_reactive::Result<ReactiveValue> {
		vellum_reactive::get_path(self, &Path::parse(expression)?)
	}

	/// Write a dotted expression.
	pub fn set_path(
		&self,
		expression: &str,
		value: impl Into<ReactiveValue>,
	) -> vellum_reactive::Result<bool> {
		vellum_reactive::set_path(self, &Path::parse(expression)?, value)
	}

	/// Is `name` a computed field?
	pub fn is_computed(&self, name: &str) -> bool {
		self.computed(name).is_some()
	}

	/// Is `name` a method?
	pub fn has_method(&self, name: &str) -> bool {
		self.scope.methods.contains_key(name)
	}

	/// Invoke method `name` with this scope and `event`.
	pub fn call(&self, name: &str, event: &Event) -> Result<()> {
		let method = self
			.scope
			.methods
			.get(name)
			.cloned()
			.ok_or_else(|| CompileError::UnknownMethod {
				name: name.to_string(),
			})?;
		tracing::debug!(method = name, event = %event.event_type, "calling method");
		method(self, event)?;
		Ok(())
	}

	fn computed(&self, name: &str) -> Option<&Computed> {
		self.scope
			.computed
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, c)| c)
	}
}

impl PathRoot for ViewModel {
	fn read_root(&self, key: &str) -> vellum_reactive::Result<Option<ReactiveValue>> {
		match self.computed(key) {
			Some(computed) => computed.get(self).map(Some),
			None => Ok(self.scope.data.lookup(key)),
		}
	}

	fn write_root(&self, key: &str, value: ReactiveValue) -> vellum_reactive::Result<bool> {
		match self.computed(key) {
			Some(computed) => computed.set(self, key, value).map(|()| true),
			None => self.scope.data.assign(key, value),
		}
	}
}

impl fmt::Debug for ViewModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut methods = self.scope.methods.keys().collect::<Vec<_>>();
		methods.sort();
		f.debug_struct("ViewModel")
			.field("data", &self.scope.data)
			.field(
				"computed",
				&self.scope.computed.iter().map(|(n, _)| n).collect::<Vec<_>>(),
			)
			.field("methods", &methods)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::cell::RefCell;
	use vellum_reactive::{Observer, ReactiveError};

	fn full_name() -> Computed {
		Computed::accessor(
			|vm| {
				Ok(format!("{} {}", vm.get("first")?, vm.get("last")?).into())
			},
			|vm, value| {
				let text = value.to_display_string();
				let (first, last) = text.split_once(' ').unwrap_or((text.as_str(), ""));
				vm.set("first", first)?;
				vm.set("last", last)?;
				Ok(())
			},
		)
	}

	#[fixture]
	fn view_model() -> ViewModel {
		let data = ReactiveObject::from_json(json!({
			"first": "Ada",
			"last": "Lovelace",
			"count": 1,
			"person": { "name": "Alice" },
		}))
		.unwrap();
		let increment = method(|vm, _event| {
			let count = vm.get("count")?.to_json().as_i64().unwrap_or_default();
			vm.set("count", count + 1)?;
			Ok(())
		});
		ViewModel::new(
			data,
			vec![
				("fullName".to_string(), full_name()),
				(
					"initial".to_string(),
					Computed::getter(|vm| {
						let first = vm.get("first")?.to_display_string();
						Ok(first.chars().next().map(String::from).unwrap_or_default().into())
					}),
				),
			],
			vec![("increment".to_string(), increment)],
		)
	}

	#[rstest]
	fn test_proxy_reads_and_writes_data(view_model: ViewModel) {
		assert_eq!(view_model.get("count").unwrap(), 1.into());

		assert_eq!(view_model.set("count", 5), Ok(true));

		assert_eq!(view_model.data().get_untracked("count").unwrap(), 5.into());
	}

	#[rstest]
	fn test_proxy_missing_name(view_model: ViewModel) {
		assert_eq!(view_model.get("nickname"), Ok(ReactiveValue::default()));

		assert_eq!(view_model.set("nickname", "Ada"), Ok(true));

		assert_eq!(view_model.get("nickname").unwrap().as_str(), Some("Ada"));
		assert!(view_model.data().contains_key("nickname"));
	}

	#[rstest]
	fn test_dotted_paths(view_model: ViewModel) {
		assert_eq!(view_model.set_path("person.name", "Bob"), Ok(true));
		assert_eq!(view_model.get_path("person.name").unwrap().as_str(), Some("Bob"));
	}

	#[rstest]
	fn test_computed_reads_fresh_values(view_model: ViewModel) {
		assert_eq!(view_model.get("fullName").unwrap().as_str(), Some("Ada Lovelace"));

		view_model.set("first", "Grace").unwrap();

		assert_eq!(view_model.get("fullName").unwrap().as_str(), Some("Grace Lovelace"));
		assert_eq!(view_model.get("initial").unwrap().as_str(), Some("G"));
	}

	#[rstest]
	fn test_computed_setter_writes_through(view_model: ViewModel) {
		assert_eq!(view_model.set("fullName", "Grace Hopper"), Ok(true));

		assert_eq!(view_model.get("first").unwrap().as_str(), Some("Grace"));
		assert_eq!(view_model.get("last").unwrap().as_str(), Some("Hopper"));
	}

	#[rstest]
	fn test_getter_only_computed_is_read_only(view_model: ViewModel) {
		assert_eq!(
			view_model.set("initial", "X"),
			Err(ReactiveError::ReadOnly {
				name: "initial".to_string()
			})
		);
	}

	#[rstest]
	fn test_observer_on_computed_tracks_getter_reads(view_model: ViewModel) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let _observer = Observer::new(Rc::new(view_model.clone()), "fullName", move |value| {
			sink.borrow_mut().push(value.to_display_string());
			Ok(())
		})
		.unwrap();

		view_model.set("last", "Byron").unwrap();

		assert_eq!(*seen.borrow(), vec!["Ada Byron"]);
		assert_eq!(view_model.data().subscriber_count("first"), Some(1));
	}

	#[rstest]
	fn test_call_method_with_scope(view_model: ViewModel) {
		view_model.call("increment", &Event::new("click")).unwrap();
		view_model.call("increment", &Event::new("click")).unwrap();

		assert_eq!(view_model.get("count").unwrap(), 3.into());
	}

	#[rstest]
	fn test_call_unknown_method(view_model: ViewModel) {
		assert!(view_model.has_method("increment"));
		assert!(!view_model.has_method("decrement"));
		assert_eq!(
			view_model.call("decrement", &Event::new("click")),
			Err(CompileError::UnknownMethod {
				name: "decrement".to_string()
			})
		);
	}

	#[rstest]
	fn test_computed_shadows_data_field() {
		let data = ReactiveObject::from_json(json!({ "label": "stored" })).unwrap();
		let view_model = ViewModel::new(
			data,
			vec![(
				"label".to_string(),
				Computed::getter(|_| Ok("derived".into())),
			)],
			Vec::new(),
		);

		assert!(view_model.is_computed("label"));
		assert_eq!(view_model.get("label").unwrap().as_str(), Some("derived"));
	}
}
