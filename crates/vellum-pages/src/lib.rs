//! Vellum Pages - declarative bindings from templates to reactive data
//!
//! This crate connects the reactive engine of `vellum-reactive` to a DOM
//! through `vellum-dom`'s traits:
//!
//! - [`ViewModel`]: data object, computed fields and methods in one scope
//! - [`Directive`]: `v-text`, `v-html`, `v-model`, `v-on:<event>` and
//!   `v-bind:<attribute>` attributes
//! - [`Template`]: `{{ expression }}` interpolation in text
//! - [`Compiler`]: one walk over the DOM, one observer per binding
//! - [`App`]: mounting by selector or node
//!
//! ## Example
//!
//! ```ignore
//! use serde_json::json;
//! use vellum_dom::{Document, DomNode};
//! use vellum_pages::{App, AppOptions};
//!
//! let document = Document::parse(r#"
//!     <div id="app">
//!         <input v-model="name">
//!         <p>Hello, {{ name }}!</p>
//!         <button v-on:click="reset">Reset</button>
//!     </div>
//! "#);
//!
//! let app = App::mount(
//!     &document,
//!     AppOptions::new("#app")
//!         .data(json!({ "name": "Alice" }))
//!         .method("reset", |vm, _event| {
//!             vm.set("name", "")?;
//!             Ok(())
//!         }),
//! )?;
//!
//! app.view_model().set("name", "Bob")?; // input value and paragraph follow
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod compiler;
pub mod computed;
pub mod config;
pub mod directive;
pub mod error;
pub mod mustache;
pub mod view_model;

pub use app::{App, AppOptions, MountTarget};
pub use compiler::{Binding, BindingKind, Compiler};
pub use computed::Computed;
pub use config::TemplateConfig;
pub use directive::{Directive, DirectiveKind};
pub use error::{CompileError, Result};
pub use mustache::{Interpolator, Template};
pub use view_model::{Method, ViewModel, method};
