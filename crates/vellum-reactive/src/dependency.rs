//! Dependency Set
//!
//! One `DependencySet` exists per reactive field. It records the observers
//! that read the field during a tracked evaluation and notifies them, in
//! subscription order, when the field changes.

use core::cell::RefCell;
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::error::Result;
use crate::observer::Observer;

/// Ordered set of observers interested in one reactive field
///
/// Subscriptions are never removed. Subscribing the same observer twice
/// records it twice; see [`DependencySet::subscribe_unique`] for the
/// deduplicating variant used by re-tracking observers.
///
/// Cloning the handle shares the same subscriber list.
#[derive(Clone, Default)]
pub struct DependencySet {
	subscribers: Rc<RefCell<Vec<Rc<Observer>>>>,
}

impl DependencySet {
	/// Create an empty dependency set
	pub fn new() -> Self {
		Self::default()
	}

	/// Append `observer` unconditionally.
	pub fn subscribe(&self, observer: Rc<Observer>) {
		tracing::trace!(expression = %observer.expression(), "subscribing observer");
		self.subscribers.borrow_mut().push(observer);
	}

	/// Append `observer` unless it is already subscribed.
	///
	/// Returns `true` when the observer was added.
	pub fn subscribe_unique(&self, observer: Rc<Observer>) -> bool {
		if self.contains(&observer) {
			return false;
		}
		self.subscribe(observer);
		true
	}

	/// Notify every subscriber, in subscription order.
	///
	/// The subscriber list is snapshotted first: observers subscribed while
	/// the notification is running are not visited by it. The first failing
	/// observer aborts the loop and its error is returned; later subscribers
	/// are not notified for this change.
	pub fn publish(&self) -> Result<()> {
		let snapshot: Vec<Rc<Observer>> = self.subscribers.borrow().clone();
		tracing::trace!(subscribers = snapshot.len(), "publishing change");
		for observer in &snapshot {
			observer.update()?;
		}
		Ok(())
	}

	/// Whether `observer` is subscribed (by identity).
	pub fn contains(&self, observer: &Rc<Observer>) -> bool {
		self.subscribers
			.borrow()
			.iter()
			.any(|subscribed| Rc::ptr_eq(subscribed, observer))
	}

	/// Number of subscription entries, duplicates included
	pub fn len(&self) -> usize {
		self.subscribers.borrow().len()
	}

	/// Returns true if nothing is subscribed.
	pub fn is_empty(&self) -> bool {
		self.subscribers.borrow().is_empty()
	}
}

impl fmt::Debug for DependencySet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DependencySet")
			.field("subscribers", &self.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ReactiveError;
	use crate::object::ReactiveObject;
	use rstest::rstest;
	use serde_json::json;

	fn recording_observer(
		object: &ReactiveObject,
		expression: &str,
		label: &'static str,
		log: Rc<RefCell<Vec<&'static str>>>,
	) -> Rc<Observer> {
		Observer::new(Rc::new(object.clone()), expression, move |_| {
			log.borrow_mut().push(label);
			Ok(())
		})
		.unwrap()
	}

	#[rstest]
	fn test_subscribe_keeps_duplicates() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let observer = Observer::new(Rc::new(object.clone()), "a", |_| Ok(())).unwrap();
		let set = DependencySet::new();

		set.subscribe(observer.clone());
		set.subscribe(observer.clone());

		assert_eq!(set.len(), 2);
		assert!(set.contains(&observer));
	}

	#[rstest]
	fn test_subscribe_unique_skips_existing() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let observer = Observer::new(Rc::new(object.clone()), "a", |_| Ok(())).unwrap();
		let set = DependencySet::new();

		assert!(set.subscribe_unique(observer.clone()));
		assert!(!set.subscribe_unique(observer));
		assert_eq!(set.len(), 1);
	}

	#[rstest]
	fn test_publish_runs_in_subscription_order() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let log = Rc::new(RefCell::new(Vec::new()));
		let _first = recording_observer(&object, "a", "first", log.clone());
		let _second = recording_observer(&object, "a", "second", log.clone());

		object.set("a", 2).unwrap();

		assert_eq!(*log.borrow(), vec!["first", "second"]);
	}

	#[rstest]
	fn test_failing_observer_aborts_remaining_notifications() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let log = Rc::new(RefCell::new(Vec::new()));
		let _failing = Observer::new(Rc::new(object.clone()), "a", |_| {
			Err(ReactiveError::Render("boom".to_string()))
		})
		.unwrap();
		let _after = recording_observer(&object, "a", "after", log.clone());

		let result = object.set("a", 2);

		assert_eq!(result, Err(ReactiveError::Render("boom".to_string())));
		assert!(log.borrow().is_empty());
		// The write itself happened before notification
		assert_eq!(object.get_untracked("a").unwrap(), 2.into());
	}

	#[rstest]
	fn test_publish_on_empty_set_is_noop() {
		let set = DependencySet::new();
		assert!(set.is_empty());
		assert_eq!(set.publish(), Ok(()));
	}
}
