//! Forgiving HTML fragment parser
//!
//! Parses the subset of HTML that templates use: elements with quoted,
//! unquoted or bare attributes, text, comments, void and self-closing
//! elements, and raw-text `<script>`/`<style>` bodies. Like a browser, it
//! never fails:
//!
//! - an unmatched closing tag is ignored
//! - a closing tag closes every element opened after its match
//! - elements still open at the end of input are closed implicitly
//! - a `<` that does not start a tag is literal text
//!
//! Entities are decoded in text and attribute values.

use crate::node::{Node, VOID_ELEMENTS};
use crate::traits::DomNode;

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse `markup` into a list of sibling nodes.
pub fn parse_fragment(markup: &str) -> Vec<Node> {
	let mut parser = Parser {
		input: markup,
		pos: 0,
		text: String::new(),
		stack: Vec::new(),
		roots: Vec::new(),
	};
	parser.run();
	parser.roots
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
	/// Pending text, merged until the next non-text node
	text: String,
	stack: Vec<Node>,
	roots: Vec<Node>,
}

impl<'a> Parser<'a> {
	fn run(&mut self) {
		while self.pos < self.input.len() {
			let rest = self.rest();
			if rest.starts_with("<!--") {
				self.comment();
			} else if rest.starts_with("</") {
				self.close_tag();
			} else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
				self.open_tag();
			} else {
				self.text();
			}
		}
		self.flush_text();
	}

	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
		let rest = self.rest();
		let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
		self.pos += end;
		&rest[..end]
	}

	fn skip_whitespace(&mut self) {
		self.take_while(char::is_whitespace);
	}

	fn append(&mut self, node: Node) {
		match self.stack.last() {
			Some(parent) => parent.append_child(node),
			None => self.roots.push(node),
		}
	}

	fn flush_text(&mut self) {
		if self.text.is_empty() {
			return;
		}
		let text = std::mem::take(&mut self.text);
		self.append(Node::text(text));
	}

	fn text(&mut self) {
		let rest = self.rest();
		// A leading `<` got here because it does not start a tag
		let first = rest.chars().next().map_or(1, char::len_utf8);
		let end = rest[first..].find('<').map_or(rest.len(), |i| i + first);
		self.text
			.push_str(&html_escape::decode_html_entities(&rest[..end]));
		self.pos += end;
	}

	fn comment(&mut self) {
		self.flush_text();
		let body = &self.rest()["<!--".len()..];
		let (text, consumed) = match body.find("-->") {
			Some(end) => (&body[..end], end + "-->".len()),
			None => (body, body.len()),
		};
		self.pos += "<!--".len() + consumed;
		self.append(Node::comment(text));
	}

	fn close_tag(&mut self) {
		self.flush_text();
		let body = &self.rest()["</".len()..];
		let end = body.find('>');
		let name = body[..end.unwrap_or(body.len())].trim().to_ascii_lowercase();
		self.pos += "</".len() + end.map_or(body.len(), |e| e + 1);

		let open = self
			.stack
			.iter()
			.rposition(|node| node_has_tag(node, &name));
		match open {
			Some(index) => self.stack.truncate(index),
			None => tracing::warn!(tag = %name, "ignoring unmatched closing tag"),
		}
	}

	fn open_tag(&mut self) {
		self.flush_text();
		self.pos += 1;
		let name = self
			.take_while(|c| c.is_ascii_alphanumeric() || c == '-')
			.to_ascii_lowercase();
		let element = Node::element(&name);
		let self_closing = self.attributes(&element);

		self.append(element.clone());
		if RAW_TEXT_ELEMENTS.contains(&name.as_str()) && !self_closing {
			self.raw_text(&element, &name);
		} else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
			self.stack.push(element);
		}
	}

	/// Parse attributes up to the end of the start tag.
	///
	/// Returns true for a self-closing `/>` tag.
	fn attributes(&mut self, element: &Node) -> bool {
		loop {
			self.skip_whitespace();
			let rest = self.rest();
			if rest.is_empty() {
				return false;
			}
			if rest.starts_with("/>") {
				self.pos += 2;
				return true;
			}
			if rest.starts_with('>') {
				self.pos += 1;
				return false;
			}

			let name = self.take_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/'));
			if name.is_empty() {
				// Stray `/` or `=`
				self.pos += 1;
				continue;
			}
			self.skip_whitespace();
			let value = if self.rest().starts_with('=') {
				self.pos += 1;
				self.skip_whitespace();
				self.attribute_value()
			} else {
				String::new()
			};
			element.set_attribute(&name.to_ascii_lowercase(), &value);
		}
	}

	fn attribute_value(&mut self) -> String {
		let rest = self.rest();
		let raw = match rest.chars().next() {
			Some(quote @ ('"' | '\'')) => {
				let body = &rest[1..];
				match body.find(quote) {
					Some(end) => {
						self.pos += end + 2;
						&body[..end]
					}
					None => {
						self.pos += rest.len();
						body
					}
				}
			}
			_ => self.take_while(|c| !c.is_whitespace() && c != '>'),
		};
		html_escape::decode_html_entities(raw).into_owned()
	}

	fn raw_text(&mut self, element: &Node, name: &str) {
		let rest = self.rest();
		let closing = format!("</{name}");
		let end = rest
			.to_ascii_lowercase()
			.find(&closing)
			.unwrap_or(rest.len());
		if end > 0 {
			element.append_child(Node::text(&rest[..end]));
		}
		self.pos += end;
		if self.pos < self.input.len() {
			// Consume the closing tag itself
			let after = &self.rest()[closing.len()..];
			self.pos += closing.len() + after.find('>').map_or(after.len(), |e| e + 1);
		}
	}
}

fn node_has_tag(node: &Node, name: &str) -> bool {
	node.tag_name().as_deref() == Some(name)
}
