//! Observer - one live binding between an expression and a render callback
//!
//! An `Observer` is created once per template binding. Construction performs
//! a tracked evaluation of its expression: the observer occupies the tracking
//! slot while the path is resolved, so it becomes a dependent of every field
//! on the path. If resolution fails the observer subscribes to nothing and
//! construction returns the error.
//!
//! When any of those fields changes, [`Observer::update`] re-evaluates,
//! compares against the last seen value and calls the render callback only
//! if the value differs.
//!
//! ## Re-tracking
//!
//! By default [`Observer::update`] evaluates untracked: the subscriptions made
//! at construction are the only ones the observer ever holds, so repeated
//! notifications never grow the dependency sets. The trade-off is that
//! fields reached only after a parent object was replaced are not observed.
//! [`UpdateTracking::Retrack`] re-evaluates under tracking instead and
//! subscribes to any dependency set that does not already contain the
//! observer.
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use serde_json::json;
//! use vellum_reactive::{Observer, ReactiveObject};
//!
//! let data = ReactiveObject::from_json(json!({ "count": 1 }))?;
//! let _observer = Observer::new(Rc::new(data.clone()), "count", |value| {
//!     println!("count is now {value}");
//!     Ok(())
//! })?;
//!
//! data.set("count", 2)?; // prints "count is now 2"
//! data.set("count", 2)?; // unchanged, prints nothing
//! ```

use core::cell::RefCell;
use core::fmt;

extern crate alloc;
use alloc::boxed::Box;
use alloc::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{Path, PathRoot, get_path};
use crate::tracking;
use crate::value::ReactiveValue;

/// Render callback invoked with the new value after a change
pub type RenderFn = Box<dyn Fn(&ReactiveValue) -> Result<()> + 'static>;

/// How [`Observer::update`] evaluates its expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateTracking {
	/// Re-evaluate without tracking; subscriptions are fixed at construction
	#[default]
	Untracked,
	/// Re-evaluate under tracking, subscribing only where not yet subscribed
	Retrack,
}

/// A live binding between a dotted expression and a render callback
pub struct Observer {
	root: Rc<dyn PathRoot>,
	expression: Path,
	last_value: RefCell<ReactiveValue>,
	callback: RenderFn,
	tracking: UpdateTracking,
}

impl Observer {
	/// Create an observer with [`UpdateTracking::Untracked`].
	///
	/// The expression is evaluated once, tracked, before this returns. The
	/// callback is not invoked for that first value; callers render it
	/// themselves from [`Observer::value`].
	pub fn new<F>(root: Rc<dyn PathRoot>, expression: &str, callback: F) -> Result<Rc<Self>>
	where
		F: Fn(&ReactiveValue) -> Result<()> + 'static,
	{
		Self::with_tracking(root, expression, UpdateTracking::default(), callback)
	}

	/// Create an observer with an explicit update tracking mode.
	pub fn with_tracking<F>(
		root: Rc<dyn PathRoot>,
		expression: &str,
		tracking: UpdateTracking,
		callback: F,
	) -> Result<Rc<Self>>
	where
		F: Fn(&ReactiveValue) -> Result<()> + 'static,
	{
		let expression = Path::parse(expression)?;
		let observer = Rc::new(Self {
			root,
			expression,
			last_value: RefCell::new(ReactiveValue::default()),
			callback: Box::new(callback),
			tracking,
		});

		let initial = observer.evaluate_tracked(false)?;
		observer.last_value.replace(initial);
		tracing::debug!(expression = %observer.expression, "observer created");
		Ok(observer)
	}

	/// Re-evaluate after a dependency changed.
	///
	/// Invokes the callback only when the new value differs from the last
	/// seen one, updating the last seen value first.
	pub fn update(self: &Rc<Self>) -> Result<()> {
		let value = match self.tracking {
			UpdateTracking::Untracked => {
				tracking::untracked(|| get_path(self.root.as_ref(), &self.expression))?
			}
			UpdateTracking::Retrack => self.evaluate_tracked(true)?,
		};

		if *self.last_value.borrow() == value {
			tracing::trace!(expression = %self.expression, "observer value unchanged");
			return Ok(());
		}
		self.last_value.replace(value.clone());
		tracing::trace!(expression = %self.expression, "observer rendering");
		(self.callback)(&value)
	}

	/// The last value seen by this observer
	pub fn value(&self) -> ReactiveValue {
		self.last_value.borrow().clone()
	}

	/// The expression this observer watches
	pub fn expression(&self) -> &Path {
		&self.expression
	}

	/// The update tracking mode
	pub fn tracking(&self) -> UpdateTracking {
		self.tracking
	}

	fn evaluate_tracked(self: &Rc<Self>, dedupe: bool) -> Result<ReactiveValue> {
		let guard = tracking::enter(Rc::clone(self), dedupe);
		let value = get_path(self.root.as_ref(), &self.expression)?;
		guard.commit();
		Ok(value)
	}
}

impl fmt::Debug for Observer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observer")
			.field("expression", &self.expression)
			.field("last_value", &self.last_value.borrow())
			.field("tracking", &self.tracking)
			.finish()
	}
}
