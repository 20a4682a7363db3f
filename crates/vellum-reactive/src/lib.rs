//! Vellum Reactive - dependency tracking engine
//!
//! Fine-grained, pull-then-push reactivity for plain data objects.
//!
//! ## Architecture
//!
//! - [`DependencySet`]: per-field list of interested observers
//! - [`ReactiveObject`]: the reactive store; field reads subscribe the active
//!   observer, field writes (on change only) notify the field's dependents
//! - [`Observer`]: a binding from a dotted expression to a render callback
//! - [`tracking`]: the scoped active-observer slot
//! - [`path`]: dotted-path reads and writes over a [`PathRoot`]
//!
//! Everything runs synchronously on one thread: a write notifies every
//! dependent before it returns, and each dependent may write again,
//! depth-first.
//!
//! ## Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use serde_json::json;
//! use vellum_reactive::{Observer, ReactiveObject};
//!
//! let data = ReactiveObject::from_json(json!({ "person": { "name": "Alice" } }))?;
//! let rendered = Rc::new(RefCell::new(String::new()));
//!
//! let sink = rendered.clone();
//! let _observer = Observer::new(Rc::new(data.clone()), "person.name", move |value| {
//!     *sink.borrow_mut() = value.to_display_string();
//!     Ok(())
//! })?;
//!
//! vellum_reactive::set_path(&data, &"person.name".parse()?, "Bob")?;
//! assert_eq!(*rendered.borrow(), "Bob");
//! ```

#![warn(missing_docs)]

pub mod dependency;
pub mod error;
pub mod object;
pub mod observer;
pub mod path;
pub mod tracking;
pub mod value;

pub use dependency::DependencySet;
pub use error::{ReactiveError, Result};
pub use object::ReactiveObject;
pub use observer::{Observer, RenderFn, UpdateTracking};
pub use path::{Path, PathRoot, get_path, set_path};
pub use value::{ReactiveValue, wrap};
