//! Computed fields
//!
//! A computed field is derived from other fields every time it is read; it
//! has no storage and no dependency set of its own. Because the getter runs
//! inside whatever evaluation is reading it, an observer bound to a computed
//! field subscribes to the fields the getter reads.

use std::fmt;
use std::rc::Rc;

use vellum_reactive::{ReactiveError, ReactiveValue, Result};

use crate::view_model::ViewModel;

type Getter = Rc<dyn Fn(&ViewModel) -> Result<ReactiveValue>>;
type Setter = Rc<dyn Fn(&ViewModel, ReactiveValue) -> Result<()>>;

/// A getter, optionally paired with a setter
#[derive(Clone)]
pub struct Computed {
	getter: Getter,
	setter: Option<Setter>,
}

impl Computed {
	/// A read-only computed field.
	pub fn getter<G>(getter: G) -> Self
	where
		G: Fn(&ViewModel) -> Result<ReactiveValue> + 'static,
	{
		Self {
			getter: Rc::new(getter),
			setter: None,
		}
	}

	/// A computed field with both a getter and a setter.
	pub fn accessor<G, S>(getter: G, setter: S) -> Self
	where
		G: Fn(&ViewModel) -> Result<ReactiveValue> + 'static,
		S: Fn(&ViewModel, ReactiveValue) -> Result<()> + 'static,
	{
		Self {
			getter: Rc::new(getter),
			setter: Some(Rc::new(setter)),
		}
	}

	/// Returns true if the field has a setter.
	pub fn is_writable(&self) -> bool {
		self.setter.is_some()
	}

	pub(crate) fn get(&self, scope: &ViewModel) -> Result<ReactiveValue> {
		(self.getter)(scope)
	}

	pub(crate) fn set(&self, scope: &ViewModel, name: &str, value: ReactiveValue) -> Result<()> {
		match &self.setter {
			Some(setter) => setter(scope, value),
			None => Err(ReactiveError::ReadOnly {
				name: name.to_string(),
			}),
		}
	}
}

impl fmt::Debug for Computed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Computed")
			.field("writable", &self.is_writable())
			.finish_non_exhaustive()
	}
}
