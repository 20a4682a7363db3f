//! In-memory document and selector queries

use crate::markup::parse_fragment;
use crate::node::Node;
use crate::traits::{DomDocument, DomNode};

/// A simple selector: `#id`, `.class` or a tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// `#id`
	Id(String),
	/// `.class`
	Class(String),
	/// `tag`, matched case-insensitively
	Tag(String),
}

impl Selector {
	/// Parse a simple selector. Returns `None` for anything else.
	pub fn parse(selector: &str) -> Option<Self> {
		let selector = selector.trim();
		let (build, name): (fn(String) -> Self, &str) = match selector.chars().next()? {
			'#' => (Self::Id, &selector[1..]),
			'.' => (Self::Class, &selector[1..]),
			_ => (|tag: String| Self::Tag(tag.to_ascii_lowercase()), selector),
		};
		let valid = !name.is_empty()
			&& name
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
		valid.then(|| build(name.to_string()))
	}

	/// Does `node` match this selector?
	pub fn matches<N: DomNode>(&self, node: &N) -> bool {
		if !node.is_element() {
			return false;
		}
		match self {
			Self::Id(id) => node.attribute("id").as_deref() == Some(id.as_str()),
			Self::Class(class) => node
				.attribute("class")
				.is_some_and(|list| list.split_whitespace().any(|c| c == class)),
			Self::Tag(tag) => node.tag_name().as_deref() == Some(tag.as_str()),
		}
	}
}

/// An in-memory document
///
/// Markup handed to [`Document::parse`] becomes the content of the `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
	body: Node,
}

impl Document {
	/// An empty document
	pub fn new() -> Self {
		Self {
			body: Node::element("body"),
		}
	}

	/// Parse `markup` as body content.
	pub fn parse(markup: &str) -> Self {
		let document = Self::new();
		document.body.replace_children(parse_fragment(markup));
		document
	}

	/// The `<body>` element
	pub fn body(&self) -> Node {
		self.body.clone()
	}

	/// Every element below the body matching `selector`, in document order
	pub fn query_selector_all(&self, selector: &str) -> Vec<Node> {
		let Some(selector) = parse_supported(selector) else {
			return Vec::new();
		};
		descendants(&self.body)
			.into_iter()
			.filter(|node| selector.matches(node))
			.collect()
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl DomDocument for Document {
	type Node = Node;

	fn query_selector(&self, selector: &str) -> Option<Node> {
		let selector = parse_supported(selector)?;
		descendants(&self.body)
			.into_iter()
			.find(|node| selector.matches(node))
	}
}

fn parse_supported(selector: &str) -> Option<Selector> {
	let parsed = Selector::parse(selector);
	if parsed.is_none() {
		tracing::warn!(selector, "unsupported selector");
	}
	parsed
}

/// Pre-order descendants of `root`, excluding `root` itself
pub fn descendants<N: DomNode>(root: &N) -> Vec<N> {
	let mut out = Vec::new();
	let mut stack = root.children();
	stack.reverse();
	while let Some(node) = stack.pop() {
		let mut children = node.children();
		children.reverse();
		stack.extend(children);
		out.push(node);
	}
	out
}
