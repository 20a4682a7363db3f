//! DOM events and listeners

use std::error::Error;
use std::rc::Rc;

/// Error returned by a failing listener
pub type ListenerError = Box<dyn Error + 'static>;

/// An event listener
///
/// Listeners may fail; the error propagates to whoever dispatched the event.
pub type Listener = Rc<dyn Fn(&Event) -> Result<(), ListenerError> + 'static>;

/// Event type name fired by text inputs on every edit
pub const INPUT: &str = "input";

/// A dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	/// The event type, e.g. `"click"`
	pub event_type: String,
	/// Optional payload, e.g. the inserted text of an input event
	pub data: Option<String>,
}

impl Event {
	/// Creates a new event with no payload.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			data: None,
		}
	}

	/// Creates an `input` event carrying `data`.
	pub fn input(data: impl Into<String>) -> Self {
		Self {
			event_type: INPUT.to_string(),
			data: Some(data.into()),
		}
	}

	/// Sets the payload.
	pub fn with_data(mut self, data: impl Into<String>) -> Self {
		self.data = Some(data.into());
		self
	}
}

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
	F: Fn(&Event) -> Result<(), ListenerError> + 'static,
{
	Rc::new(f)
}
