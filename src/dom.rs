//! DOM collaborator interface
//!
//! The compiler talks to nodes only through [`DomNode`] and [`DomDocument`].
//! The in-memory [`Document`] implements both and parses markup leniently.

pub use vellum_dom::*;
