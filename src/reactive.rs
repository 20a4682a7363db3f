//! Dependency tracking engine
//!
//! Reactive objects hold one dependency set per field. Reading a field while
//! an observer evaluates subscribes that observer; writing a different value
//! notifies every subscriber synchronously, in subscription order.
//!
//! ```rust,ignore
//! use vellum::reactive::{Observer, PathRoot, ReactiveObject};
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let data = ReactiveObject::from_json(json!({ "a": { "b": 1 } }))?;
//! let root: Rc<dyn PathRoot> = Rc::new(data.clone());
//! let _observer = Observer::new(root, "a.b", |value| {
//!     println!("a.b is now {value}");
//!     Ok(())
//! })?;
//! ```

pub use vellum_reactive::*;
