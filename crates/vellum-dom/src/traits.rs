//! The DOM collaborator interface
//!
//! The binding layer only ever talks to the document through these traits.
//! [`Node`](crate::Node) and [`Document`](crate::Document) implement them in
//! memory; a browser-backed implementation would wrap `web_sys` handles.

use crate::event::Listener;

/// Kind of a DOM node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// An element such as `<div>`
	Element,
	/// A text node
	Text,
	/// A comment node
	Comment,
}

/// Operations the binder needs from a DOM node handle
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait DomNode: Clone + 'static {
	/// The node's kind
	fn kind(&self) -> NodeKind;

	/// Returns true for element nodes.
	fn is_element(&self) -> bool {
		self.kind() == NodeKind::Element
	}

	/// Lower-case tag name for elements, `None` otherwise
	fn tag_name(&self) -> Option<String>;

	/// Direct children in document order
	fn children(&self) -> Vec<Self>;

	/// Attributes in document order
	fn attributes(&self) -> Vec<(String, String)>;

	/// A single attribute value
	fn attribute(&self, name: &str) -> Option<String>;

	/// Set (or add) an attribute
	fn set_attribute(&self, name: &str, value: &str);

	/// Text of the node and all its descendants
	fn text_content(&self) -> String;

	/// Replace the node's text; for elements this replaces all children.
	fn set_text_content(&self, text: &str);

	/// Replace the node's children with parsed markup.
	///
	/// The markup is inserted as-is; no sanitization is performed.
	fn set_inner_html(&self, markup: &str);

	/// The form-control value property
	fn value(&self) -> String;

	/// Set the form-control value property
	fn set_value(&self, value: &str);

	/// Register a listener for `event_type`.
	fn add_event_listener(&self, event_type: &str, listener: Listener);
}

/// A document that can resolve selectors to nodes
pub trait DomDocument {
	/// The node handle type
	type Node: DomNode;

	/// First element matching `selector` in document order
	fn query_selector(&self, selector: &str) -> Option<Self::Node>;
}
