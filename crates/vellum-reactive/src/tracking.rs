//! Tracking Context
//!
//! The active-observer slot: while an [`Observer`] evaluates its expression it
//! occupies this slot, and every reactive field read during that span
//! subscribes the observer to the field's [`DependencySet`].
//!
//! ## Invariants
//!
//! 1. At most one observer occupies the slot at a time.
//! 2. The slot is only ever written through [`TrackingGuard`], which restores
//!    the previous occupant when dropped. Early returns, `?` propagation and
//!    unwinding therefore all leave the slot as they found it.
//! 3. The slot is thread-local; evaluation is single-threaded and synchronous.
//! 4. Dependency sets read during an evaluation are only subscribed to once
//!    the evaluation succeeds ([`TrackingGuard::commit`]). A guard dropped
//!    without committing subscribes the observer to nothing.
//!
//! ## Example
//!
//! ```ignore
//! use vellum_reactive::tracking;
//!
//! assert!(!tracking::is_tracking());
//! let value = tracking::untracked(|| object.get("count"));
//! ```

use core::cell::RefCell;

extern crate alloc;
use alloc::rc::Rc;

use crate::dependency::DependencySet;
use crate::observer::Observer;

/// The observer currently evaluating, plus how it subscribes
struct Frame {
	observer: Rc<Observer>,
	/// Skip dependency sets that already contain the observer
	dedupe: bool,
	/// Dependency sets read so far, in read order
	pending: Vec<DependencySet>,
}

thread_local! {
	static ACTIVE: RefCell<Option<Frame>> = const { RefCell::new(None) };
}

/// Scoped occupation of the active-observer slot
///
/// Created by [`enter`] and [`untracked`]; dropping it restores whatever
/// occupied the slot before.
#[must_use = "the tracking scope ends as soon as the guard is dropped"]
pub struct TrackingGuard {
	previous: Option<Frame>,
}

impl TrackingGuard {
	/// End the scope, subscribing the observer to every dependency set read
	/// during it.
	pub(crate) fn commit(self) {
		let frame = ACTIVE.with(|slot| slot.borrow_mut().take());
		let Some(frame) = frame else {
			return;
		};
		for dependents in frame.pending {
			if frame.dedupe {
				dependents.subscribe_unique(Rc::clone(&frame.observer));
			} else {
				dependents.subscribe(Rc::clone(&frame.observer));
			}
		}
	}
}

impl Drop for TrackingGuard {
	fn drop(&mut self) {
		let previous = self.previous.take();
		// The slot may already be gone during thread teardown
		let _ = ACTIVE.try_with(|slot| *slot.borrow_mut() = previous);
	}
}

/// Make `observer` the active observer until the returned guard drops.
pub(crate) fn enter(observer: Rc<Observer>, dedupe: bool) -> TrackingGuard {
	let frame = Frame {
		observer,
		dedupe,
		pending: Vec::new(),
	};
	let previous = ACTIVE.with(|slot| slot.replace(Some(frame)));
	TrackingGuard { previous }
}

/// Run `f` with the slot cleared, so reads inside it are never attributed to
/// an enclosing evaluation.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
	let previous = ACTIVE.with(|slot| slot.replace(None));
	let _guard = TrackingGuard { previous };
	f()
}

/// Whether an observer is currently evaluating on this thread.
pub fn is_tracking() -> bool {
	ACTIVE.with(|slot| slot.borrow().is_some())
}

/// Record `dependents` for the active observer, if any.
///
/// Called by every tracked field read.
pub(crate) fn subscribe_active(dependents: &DependencySet) {
	ACTIVE.with(|slot| {
		if let Some(frame) = slot.borrow_mut().as_mut() {
			frame.pending.push(dependents.clone());
		}
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::object::ReactiveObject;
	use rstest::rstest;
	use serde_json::json;

	fn observer_on(object: &ReactiveObject, expression: &str) -> Rc<Observer> {
		Observer::new(Rc::new(object.clone()), expression, |_| Ok(())).unwrap()
	}

	#[rstest]
	fn test_slot_is_empty_by_default() {
		assert!(!is_tracking());
	}

	#[rstest]
	fn test_guard_restores_slot_on_drop() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let observer = observer_on(&object, "a");

		{
			let _guard = enter(observer, false);
			assert!(is_tracking());
		}
		assert!(!is_tracking());
	}

	#[rstest]
	fn test_untracked_clears_and_restores() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let observer = observer_on(&object, "a");
		assert_eq!(object.subscriber_count("a"), Some(1));

		let _guard = enter(observer, false);
		untracked(|| {
			assert!(!is_tracking());
			let _ = object.get("a");
		});
		assert!(is_tracking());
		assert_eq!(object.subscriber_count("a"), Some(1));
	}

	#[rstest]
	fn test_only_committed_scopes_subscribe() {
		let object = ReactiveObject::from_json(json!({ "a": 1, "b": 2 })).unwrap();
		let observer = observer_on(&object, "a");

		{
			let _guard = enter(observer.clone(), false);
			let _ = object.get("b");
		}
		assert_eq!(object.subscriber_count("b"), Some(0));

		let guard = enter(observer, false);
		let _ = object.get("b");
		guard.commit();
		assert_eq!(object.subscriber_count("b"), Some(1));
		assert!(!is_tracking());
	}

	#[rstest]
	fn test_guard_restores_slot_after_panic() {
		let object = ReactiveObject::from_json(json!({ "a": 1 })).unwrap();
		let observer = observer_on(&object, "a");

		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let _guard = enter(observer, false);
			panic!("evaluation failed");
		}));

		assert!(result.is_err());
		assert!(!is_tracking());
	}
}
