//! Directive attributes
//!
//! A directive is an attribute whose name starts with the configured prefix:
//!
//! | Attribute | Kind | Effect |
//! |-----------|------|--------|
//! | `v-text="expr"` | [`DirectiveKind::Text`] | text content follows `expr` |
//! | `v-html="expr"` | [`DirectiveKind::Html`] | inner markup follows `expr` (unsanitized) |
//! | `v-model="expr"` | [`DirectiveKind::Model`] | two-way binding with the value property |
//! | `v-on:event="method"` | [`DirectiveKind::On`] | calls `method` on the event |
//! | `v-bind:attr="expr"` | [`DirectiveKind::Bind`] | attribute `attr` follows `expr` |

use std::fmt;

use crate::config::TemplateConfig;
use crate::error::{CompileError, Result};

/// The closed set of directives the compiler understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
	/// `v-text`
	Text,
	/// `v-html`
	Html,
	/// `v-model`
	Model,
	/// `v-on:<event>`
	On,
	/// `v-bind:<attribute>`
	Bind,
}

impl DirectiveKind {
	/// Look up a directive by its name without prefix.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"text" => Some(Self::Text),
			"html" => Some(Self::Html),
			"model" => Some(Self::Model),
			"on" => Some(Self::On),
			"bind" => Some(Self::Bind),
			_ => None,
		}
	}

	/// The directive name without prefix
	pub fn name(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Html => "html",
			Self::Model => "model",
			Self::On => "on",
			Self::Bind => "bind",
		}
	}

	/// Whether the directive needs an argument after the separator
	pub fn requires_argument(self) -> bool {
		matches!(self, Self::On | Self::Bind)
	}
}

impl fmt::Display for DirectiveKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A parsed directive attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
	/// Which directive
	pub kind: DirectiveKind,
	/// The part after the separator (event or attribute name)
	pub argument: Option<String>,
	/// The attribute value, trimmed
	pub expression: String,
}

impl Directive {
	/// Parse one attribute.
	///
	/// Returns `Ok(None)` when the attribute is not a directive at all.
	pub fn parse(attr_name: &str, expression: &str, config: &TemplateConfig) -> Result<Option<Self>> {
		let Some(rest) = attr_name.strip_prefix(config.directive_prefix.as_str()) else {
			return Ok(None);
		};
		let (name, argument) = match rest.split_once(config.argument_separator) {
			Some((name, argument)) => (name, Some(argument.trim())),
			None => (rest, None),
		};

		let kind = DirectiveKind::from_name(name).ok_or_else(|| CompileError::UnknownDirective {
			name: attr_name.to_string(),
		})?;
		let argument = argument.filter(|a| !a.is_empty()).map(str::to_string);
		if kind.requires_argument() && argument.is_none() {
			return Err(CompileError::MissingArgument {
				name: attr_name.to_string(),
			});
		}
		if !kind.requires_argument() && argument.is_some() {
			tracing::warn!(attribute = attr_name, "argument ignored for `{kind}` directive");
		}

		Ok(Some(Self {
			kind,
			argument,
			expression: expression.trim().to_string(),
		}))
	}
}
