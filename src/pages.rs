//! Declarative bindings
//!
//! Directives (`v-text`, `v-html`, `v-model`, `v-on:<event>`,
//! `v-bind:<attribute>`) and `{{ }}` interpolation compiled against a
//! [`ViewModel`] scope.

pub use vellum_pages::*;
