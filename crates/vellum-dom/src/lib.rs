//! Vellum DOM - the document seam for the binding layer
//!
//! The binder never manipulates a concrete DOM. It walks and mutates nodes
//! through [`DomNode`] and resolves mount points through [`DomDocument`].
//! This crate provides both traits and an in-memory implementation:
//!
//! - [`Node`]: shared, mutable node handle with listeners and serialization
//! - [`Document`]: body container with `#id` / `.class` / tag queries
//! - [`markup`]: a forgiving HTML fragment parser
//!
//! ## Example
//!
//! ```ignore
//! use vellum_dom::{Document, DomDocument, DomNode};
//!
//! let document = Document::parse(r#"<div id="app"><p>Hello</p></div>"#);
//! let app = document.query_selector("#app").unwrap();
//! app.set_inner_html("<b>Bye</b>");
//! assert_eq!(app.inner_html(), "<b>Bye</b>");
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod event;
pub mod markup;
pub mod node;
pub mod traits;

pub use document::{Document, Selector, descendants};
pub use event::{Event, INPUT, Listener, ListenerError, listener};
pub use markup::parse_fragment;
pub use node::Node;
pub use traits::{DomDocument, DomNode, NodeKind};
