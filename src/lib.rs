//! # Vellum
//!
//! A minimal reactive data-binding engine: a plain data object is turned into
//! a reactive one, a template subtree is scanned for directives and `{{ }}`
//! interpolations, and every later write to a field re-renders exactly the
//! nodes that read it.
//!
//! ## Feature Flags
//!
//! - `dom` - DOM collaborator traits and the in-memory [`dom::Document`]
//! - `pages` (default) - directive compiler, view model and [`pages::App`]
//!
//! The dependency tracking engine in [`reactive`] is always available.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use vellum::prelude::*;
//! use serde_json::json;
//!
//! let document = Document::parse(r#"
//!     <div id="app">
//!         <input v-model="user.name">
//!         <p v-text="user.name"></p>
//!         <p>{{ greeting }}</p>
//!     </div>
//! "#);
//!
//! let app = App::mount(
//!     &document,
//!     AppOptions::new("#app")
//!         .data(json!({ "user": { "name": "Alice" } }))
//!         .computed("greeting", Computed::getter(|vm| {
//!             Ok(format!("Hello, {}", vm.get_path("user.name")?).into())
//!         })),
//! )?;
//!
//! app.view_model().set_path("user.name", "Bob")?;
//! ```

#[cfg(feature = "dom")]
pub mod dom;
#[cfg(feature = "pages")]
pub mod pages;
pub mod reactive;

pub use vellum_reactive::{Observer, ReactiveError, ReactiveObject, ReactiveValue, UpdateTracking};

#[cfg(feature = "dom")]
pub use vellum_dom::{Document, DomDocument, DomNode, Event, Node};

#[cfg(feature = "pages")]
pub use vellum_pages::{App, AppOptions, CompileError, Computed, TemplateConfig, ViewModel};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::reactive::{
		Observer, Path, PathRoot, ReactiveError, ReactiveObject, ReactiveValue, UpdateTracking,
		get_path, set_path,
	};

	#[cfg(feature = "dom")]
	pub use crate::dom::{Document, DomDocument, DomNode, Event, Node, listener};

	#[cfg(feature = "pages")]
	pub use crate::pages::{
		App, AppOptions, CompileError, Computed, MountTarget, TemplateConfig, ViewModel, method,
	};
}
