//! Application entry point
//!
//! ```ignore
//! use serde_json::json;
//! use vellum_dom::Document;
//! use vellum_pages::{App, AppOptions, Computed};
//!
//! let document = Document::parse(r#"<div id="app"><p>{{ greeting }}</p></div>"#);
//! let app = App::mount(
//!     &document,
//!     AppOptions::new("#app")
//!         .data(json!({ "name": "Alice" }))
//!         .computed("greeting", Computed::getter(|vm| {
//!             Ok(format!("Hello, {}!", vm.get("name")?).into())
//!         })),
//! )?;
//!
//! app.view_model().set("name", "Bob")?;
//! ```

use serde_json::Value as JsonValue;
use vellum_dom::{DomDocument, DomNode, Event};
use vellum_reactive::ReactiveObject;

use crate::compiler::{Binding, Compiler};
use crate::computed::Computed;
use crate::config::TemplateConfig;
use crate::error::{CompileError, Result};
use crate::view_model::{Method, ViewModel, method};

/// Where to mount: a node, or a selector resolved against the document
#[derive(Debug, Clone)]
pub enum MountTarget<N> {
	/// An already resolved node
	Node(N),
	/// A selector such as `#app`
	Selector(String),
}

impl<N> From<&str> for MountTarget<N> {
	fn from(selector: &str) -> Self {
		Self::Selector(selector.to_string())
	}
}

impl<N> From<String> for MountTarget<N> {
	fn from(selector: String) -> Self {
		Self::Selector(selector)
	}
}

/// Options for [`App::mount`]
pub struct AppOptions<N> {
	el: MountTarget<N>,
	data: JsonValue,
	computed: Vec<(String, Computed)>,
	methods: Vec<(String, Method)>,
	config: TemplateConfig,
}

impl<N: DomNode> AppOptions<N> {
	/// Options mounting at `el` with empty data.
	pub fn new(el: impl Into<MountTarget<N>>) -> Self {
		Self {
			el: el.into(),
			data: JsonValue::Object(Default::default()),
			computed: Vec::new(),
			methods: Vec::new(),
			config: TemplateConfig::default(),
		}
	}

	/// Options mounting at an already resolved node.
	pub fn at_node(node: N) -> Self {
		Self::new(MountTarget::Node(node))
	}

	/// Sets the data object. Must be a JSON object.
	pub fn data(mut self, data: JsonValue) -> Self {
		self.data = data;
		self
	}

	/// Adds a computed field.
	pub fn computed(mut self, name: impl Into<String>, computed: Computed) -> Self {
		self.computed.push((name.into(), computed));
		self
	}

	/// Adds a method callable from `v-on` directives.
	pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(&ViewModel, &Event) -> vellum_reactive::Result<()> + 'static,
	{
		self.methods.push((name.into(), method(f)));
		self
	}

	/// Sets the template configuration.
	pub fn config(mut self, config: TemplateConfig) -> Self {
		self.config = config;
		self
	}
}

/// A mounted application
pub struct App<N> {
	root: N,
	view_model: ViewModel,
	bindings: Vec<Binding>,
}

impl<N: DomNode> App<N> {
	/// Make the data reactive, build the scope and compile the mount
	/// target's subtree.
	pub fn mount<D>(document: &D, options: AppOptions<N>) -> Result<Self>
	where
		D: DomDocument<Node = N>,
	{
		let root = match options.el {
			MountTarget::Node(node) => node,
			MountTarget::Selector(selector) => document
				.query_selector(&selector)
				.ok_or(CompileError::RootNotFound { selector })?,
		};

		let data = ReactiveObject::from_json(options.data)?;
		let view_model = ViewModel::new(data, options.computed, options.methods);
		let compiler = Compiler::new(view_model.clone(), options.config)?;
		let bindings = compiler.compile(&root)?;
		tracing::debug!(bindings = bindings.len(), "app mounted");

		Ok(Self {
			root,
			view_model,
			bindings,
		})
	}

	/// The scope bound to the template
	pub fn view_model(&self) -> &ViewModel {
		&self.view_model
	}

	/// Bindings created at mount, in document order
	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}

	/// The mount root
	pub fn root(&self) -> &N {
		&self.root
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use vellum_dom::{Document, Node};
	use vellum_reactive::ReactiveError;

	#[rstest]
	fn test_mount_by_selector() {
		let document = Document::parse(r#"<main></main><div id="app">{{ name }}</div>"#);

		let app = App::mount(&document, AppOptions::new("#app").data(json!({ "name": "Alice" }))).unwrap();

		assert_eq!(app.root().text_content(), "Alice");
		assert_eq!(app.bindings().len(), 1);
	}

	#[rstest]
	fn test_mount_by_node() {
		let root = Node::element("div").with_child(Node::text("{{ n }}"));
		let document = Document::new();

		let app = App::mount(&document, AppOptions::at_node(root.clone()).data(json!({ "n": 7 }))).unwrap();

		assert_eq!(root.text_content(), "7");
		app.view_model().set("n", 8).unwrap();
		assert_eq!(root.text_content(), "8");
	}

	#[rstest]
	fn test_mount_missing_root() {
		let document = Document::parse("<div></div>");

		let result = App::mount(&document, AppOptions::<Node>::new("#app"));

		assert!(matches!(result, Err(CompileError::RootNotFound { selector }) if selector == "#app"));
	}

	#[rstest]
	fn test_mount_rejects_non_object_data() {
		let document = Document::parse(r#"<div id="app"></div>"#);

		let result = App::mount(&document, AppOptions::new("#app").data(json!([1, 2])));

		assert!(matches!(
			result,
			Err(CompileError::Reactive(ReactiveError::InvalidRoot { .. }))
		));
	}
}
