//! In-memory DOM nodes

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::event::{Event, Listener, ListenerError};
use crate::markup;
use crate::traits::{DomNode, NodeKind};

/// Elements that never have children or a closing tag
pub(crate) const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

struct NodeData {
	kind: NodeKind,
	tag: Option<String>,
	attributes: Vec<(String, String)>,
	children: Vec<Node>,
	/// Text for text and comment nodes
	text: String,
	/// Form-control value property, initialised from the `value` attribute
	value: Option<String>,
	listeners: Vec<(String, Listener)>,
}

impl NodeData {
	fn new(kind: NodeKind, tag: Option<String>, text: String) -> Self {
		Self {
			kind,
			tag,
			attributes: Vec::new(),
			children: Vec::new(),
			text,
			value: None,
			listeners: Vec::new(),
		}
	}
}

/// A shared handle to an in-memory DOM node
///
/// Cloning the handle does not clone the node; both handles observe the same
/// attributes, children and listeners.
#[derive(Clone)]
pub struct Node {
	inner: Rc<RefCell<NodeData>>,
}

impl Node {
	/// Create an element. The tag name is lower-cased.
	pub fn element(tag: &str) -> Self {
		Self::from_data(NodeData::new(
			NodeKind::Element,
			Some(tag.to_ascii_lowercase()),
			String::new(),
		))
	}

	/// Create a text node.
	pub fn text(text: impl Into<String>) -> Self {
		Self::from_data(NodeData::new(NodeKind::Text, None, text.into()))
	}

	/// Create a comment node.
	pub fn comment(text: impl Into<String>) -> Self {
		Self::from_data(NodeData::new(NodeKind::Comment, None, text.into()))
	}

	fn from_data(data: NodeData) -> Self {
		Self {
			inner: Rc::new(RefCell::new(data)),
		}
	}

	/// Builder form of [`DomNode::set_attribute`]
	pub fn with_attribute(self, name: &str, value: &str) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Builder form of [`Node::append_child`]
	pub fn with_child(self, child: Node) -> Self {
		self.append_child(child);
		self
	}

	/// Append a child. Ignored on text and comment nodes.
	pub fn append_child(&self, child: Node) {
		let mut data = self.inner.borrow_mut();
		if data.kind != NodeKind::Element {
			tracing::warn!("append_child on a non-element node ignored");
			return;
		}
		data.children.push(child);
	}

	/// Replace every child.
	pub fn replace_children(&self, children: Vec<Node>) {
		self.inner.borrow_mut().children = children;
	}

	/// Returns true if both handles refer to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Number of listeners registered for `event_type`
	pub fn listener_count(&self, event_type: &str) -> usize {
		self.inner
			.borrow()
			.listeners
			.iter()
			.filter(|(t, _)| t == event_type)
			.count()
	}

	/// Run the listeners registered for the event's type, in registration
	/// order.
	///
	/// Stops at the first failing listener and returns its error.
	pub fn dispatch_event(&self, event: &Event) -> Result<(), ListenerError> {
		// Listeners may touch this node; release the borrow first
		let listeners = self
			.inner
			.borrow()
			.listeners
			.iter()
			.filter(|(t, _)| *t == event.event_type)
			.map(|(_, l)| Rc::clone(l))
			.collect::<Vec<_>>();

		tracing::trace!(event = %event.event_type, listeners = listeners.len(), "dispatching event");
		for listener in listeners {
			listener(event)?;
		}
		Ok(())
	}

	/// Simulate typing: set the value property, then fire `input`.
	pub fn input(&self, value: &str) -> Result<(), ListenerError> {
		self.set_value(value);
		self.dispatch_event(&Event::input(value))
	}

	/// Serialize the node's children.
	pub fn inner_html(&self) -> String {
		let mut out = String::new();
		for child in self.inner.borrow().children.iter() {
			child.write_html(&mut out);
		}
		out
	}

	/// Serialize the node itself.
	pub fn outer_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		let data = self.inner.borrow();
		match data.kind {
			NodeKind::Text => out.push_str(&html_escape::encode_text(&data.text)),
			NodeKind::Comment => {
				out.push_str("<!--");
				out.push_str(&data.text);
				out.push_str("-->");
			}
			NodeKind::Element => {
				let tag = data.tag.as_deref().unwrap_or_default();
				out.push('<');
				out.push_str(tag);
				for (name, value) in &data.attributes {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&html_escape::encode_double_quoted_attribute(value));
					out.push('"');
				}
				out.push('>');
				if VOID_ELEMENTS.contains(&tag) {
					return;
				}
				for child in &data.children {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
		}
	}

	fn collect_text(&self, out: &mut String) {
		let data = self.inner.borrow();
		match data.kind {
			NodeKind::Text => out.push_str(&data.text),
			NodeKind::Comment => {}
			NodeKind::Element => {
				for child in &data.children {
					child.collect_text(out);
				}
			}
		}
	}
}

impl DomNode for Node {
	fn kind(&self) -> NodeKind {
		self.inner.borrow().kind
	}

	fn tag_name(&self) -> Option<String> {
		self.inner.borrow().tag.clone()
	}

	fn children(&self) -> Vec<Self> {
		self.inner.borrow().children.clone()
	}

	fn attributes(&self) -> Vec<(String, String)> {
		self.inner.borrow().attributes.clone()
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.inner
			.borrow()
			.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.clone())
	}

	fn set_attribute(&self, name: &str, value: &str) {
		let mut data = self.inner.borrow_mut();
		match data.attributes.iter().position(|(n, _)| n == name) {
			Some(index) => data.attributes[index].1 = value.to_string(),
			None => data.attributes.push((name.to_string(), value.to_string())),
		}
	}

	fn text_content(&self) -> String {
		if self.is_element() {
			let mut out = String::new();
			self.collect_text(&mut out);
			return out;
		}
		self.inner.borrow().text.clone()
	}

	fn set_text_content(&self, text: &str) {
		let mut data = self.inner.borrow_mut();
		let kind = data.kind;
		match kind {
			NodeKind::Text | NodeKind::Comment => data.text = text.to_string(),
			NodeKind::Element => {
				data.children.clear();
				if !text.is_empty() {
					data.children.push(Node::text(text));
				}
			}
		}
	}

	fn set_inner_html(&self, markup: &str) {
		if !self.is_element() {
			self.set_text_content(markup);
			return;
		}
		self.replace_children(markup::parse_fragment(markup));
	}

	fn value(&self) -> String {
		let data = self.inner.borrow();
		if let Some(value) = &data.value {
			return value.clone();
		}
		data.attributes
			.iter()
			.find(|(n, _)| n == "value")
			.map(|(_, v)| v.clone())
			.unwrap_or_default()
	}

	fn set_value(&self, value: &str) {
		self.inner.borrow_mut().value = Some(value.to_string());
	}

	fn add_event_listener(&self, event_type: &str, listener: Listener) {
		self.inner
			.borrow_mut()
			.listeners
			.push((event_type.to_string(), listener));
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.outer_html())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::{INPUT, listener};
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_attributes_replace_in_place() {
		let node = Node::element("DIV")
			.with_attribute("id", "a")
			.with_attribute("class", "x");

		node.set_attribute("id", "b");

		assert_eq!(node.tag_name().as_deref(), Some("div"));
		assert_eq!(
			node.attributes(),
			vec![
				("id".to_string(), "b".to_string()),
				("class".to_string(), "x".to_string()),
			]
		);
	}

	#[rstest]
	fn test_text_content_concatenates_descendants() {
		let node = Node::element("p")
			.with_child(Node::text("Hello, "))
			.with_child(Node::element("b").with_child(Node::text("world")))
			.with_child(Node::comment("ignored"));

		assert_eq!(node.text_content(), "Hello, world");
	}

	#[rstest]
	fn test_set_text_content_replaces_children() {
		let node = Node::element("p").with_child(Node::element("b"));

		node.set_text_content("<i>plain</i>");

		assert_eq!(node.children().len(), 1);
		assert_eq!(node.inner_html(), "&lt;i&gt;plain&lt;/i&gt;");
	}

	#[rstest]
	fn test_set_inner_html_parses_markup() {
		let node = Node::element("div");

		node.set_inner_html("<b>bold</b> text");

		assert_eq!(node.children().len(), 2);
		assert_eq!(node.inner_html(), "<b>bold</b> text");
		assert_eq!(node.text_content(), "bold text");
	}

	#[rstest]
	fn test_value_defaults_to_attribute() {
		let input = Node::element("input").with_attribute("value", "initial");
		assert_eq!(input.value(), "initial");

		input.set_value("typed");

		assert_eq!(input.value(), "typed");
		assert_eq!(input.attribute("value").as_deref(), Some("initial"));
	}

	#[rstest]
	fn test_dispatch_runs_matching_listeners_in_order() {
		let node = Node::element("button");
		let order = Rc::new(RefCell::new(Vec::new()));
		for name in ["first", "second"] {
			let order = order.clone();
			node.add_event_listener(
				"click",
				listener(move |_| {
					order.borrow_mut().push(name);
					Ok(())
				}),
			);
		}
		node.add_event_listener("keyup", listener(|_| panic!("wrong event type")));

		node.dispatch_event(&Event::new("click")).unwrap();

		assert_eq!(*order.borrow(), vec!["first", "second"]);
	}

	#[rstest]
	fn test_dispatch_stops_at_first_error() {
		let node = Node::element("button");
		let reached = Rc::new(Cell::new(false));
		node.add_event_listener("click", listener(|_| Err("boom".into())));
		let reached_clone = reached.clone();
		node.add_event_listener(
			"click",
			listener(move |_| {
				reached_clone.set(true);
				Ok(())
			}),
		);

		let result = node.dispatch_event(&Event::new("click"));

		assert_eq!(result.unwrap_err().to_string(), "boom");
		assert!(!reached.get());
	}

	#[rstest]
	fn test_listener_may_mutate_its_node() {
		let node = Node::element("input");
		let handle = node.clone();
		node.add_event_listener(
			INPUT,
			listener(move |_| {
				handle.set_attribute("data-seen", &handle.value());
				Ok(())
			}),
		);

		node.input("abc").unwrap();

		assert_eq!(node.attribute("data-seen").as_deref(), Some("abc"));
	}

	#[rstest]
	fn test_outer_html_escapes_and_skips_void_close() {
		let node = Node::element("div")
			.with_attribute("title", "a \"quote\"")
			.with_child(Node::element("br"))
			.with_child(Node::text("1 < 2"));

		assert_eq!(
			node.outer_html(),
			"<div title=\"a &quot;quote&quot;\"><br>1 &lt; 2</div>"
		);
	}
}
