//! Template configuration types.

use serde::{Deserialize, Serialize};
use vellum_reactive::UpdateTracking;

/// Configuration for directive recognition and interpolation.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
	/// Attribute-name prefix marking a directive.
	pub directive_prefix: String,

	/// Separator between a directive name and its argument (`v-on:click`).
	pub argument_separator: char,

	/// Opening and closing interpolation tokens.
	pub delimiters: (String, String),

	/// How observers re-evaluate after a notification.
	pub update_tracking: UpdateTracking,
}

impl Default for TemplateConfig {
	fn default() -> Self {
		Self {
			directive_prefix: "v-".to_string(),
			argument_separator: ':',
			delimiters: ("{{".to_string(), "}}".to_string()),
			update_tracking: UpdateTracking::Untracked,
		}
	}
}

impl TemplateConfig {
	/// Creates a new TemplateConfig with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the directive prefix.
	pub fn directive_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.directive_prefix = prefix.into();
		self
	}

	/// Sets the argument separator.
	pub fn argument_separator(mut self, separator: char) -> Self {
		self.argument_separator = separator;
		self
	}

	/// Sets the interpolation delimiters.
	pub fn delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
		self.delimiters = (open.into(), close.into());
		self
	}

	/// Sets the observer update tracking mode.
	pub fn update_tracking(mut self, tracking: UpdateTracking) -> Self {
		self.update_tracking = tracking;
		self
	}
}
