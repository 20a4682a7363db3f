//! Mustache interpolation
//!
//! Text such as `"{{ a }} and {{ b }}"` is split once into literal and
//! expression parts. Rendering substitutes every expression with its current
//! value, so a change to any one interpolation re-renders the whole string.

use regex::Regex;
use vellum_reactive::{Path, PathRoot, get_path, tracking};

use crate::config::TemplateConfig;
use crate::error::{CompileError, Result};

/// Locates interpolations for one pair of delimiters
#[derive(Debug, Clone)]
pub struct Interpolator {
	pattern: Regex,
}

impl Interpolator {
	/// Build the interpolation pattern for `config.delimiters`.
	pub fn new(config: &TemplateConfig) -> Result<Self> {
		let (open, close) = &config.delimiters;
		if open.is_empty() || close.is_empty() {
			return Err(CompileError::InvalidDelimiters(
				"delimiters must not be empty".to_string(),
			));
		}
		let pattern = format!("{}(.+?){}", regex::escape(open), regex::escape(close));
		let pattern = Regex::new(&pattern).map_err(|e| CompileError::InvalidDelimiters(e.to_string()))?;
		Ok(Self { pattern })
	}

	/// Does `text` contain at least one interpolation?
	pub fn matches(&self, text: &str) -> bool {
		self.pattern.is_match(text)
	}

	/// Split `text` into a template.
	pub fn parse(&self, text: &str) -> Result<Template> {
		let mut parts = Vec::new();
		let mut last = 0;
		for captures in self.pattern.captures_iter(text) {
			let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
				continue;
			};
			if whole.start() > last {
				parts.push(Part::Literal(text[last..whole.start()].to_string()));
			}
			if inner.as_str().trim().is_empty() {
				tracing::warn!(text, "empty interpolation left as literal text");
				parts.push(Part::Literal(whole.as_str().to_string()));
			} else {
				parts.push(Part::Expression(Path::parse(inner.as_str())?));
			}
			last = whole.end();
		}
		if last < text.len() {
			parts.push(Part::Literal(text[last..].to_string()));
		}
		Ok(Template {
			source: text.to_string(),
			parts,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Literal(String),
	Expression(Path),
}

/// A text template with zero or more interpolations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	source: String,
	parts: Vec<Part>,
}

impl Template {
	/// Parse `text` with the delimiters from `config`.
	pub fn parse(text: &str, config: &TemplateConfig) -> Result<Self> {
		Interpolator::new(config)?.parse(text)
	}

	/// The text the template was parsed from
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Returns true if at least one expression was found.
	pub fn has_interpolations(&self) -> bool {
		self.parts.iter().any(|p| matches!(p, Part::Expression(_)))
	}

	/// The interpolated expressions in order of appearance
	pub fn expressions(&self) -> impl Iterator<Item = &Path> {
		self.parts.iter().filter_map(|p| match p {
			Part::Expression(path) => Some(path),
			Part::Literal(_) => None,
		})
	}

	/// Substitute every interpolation with its current value.
	///
	/// Reads are untracked; rendering never subscribes anything.
	pub fn render(&self, root: &dyn PathRoot) -> vellum_reactive::Result<String> {
		tracking::untracked(|| -> vellum_reactive::Result<String> {
			let mut out = String::with_capacity(self.source.len());
			for part in &self.parts {
				match part {
					Part::Literal(text) => out.push_str(text),
					Part::Expression(path) => out.push_str(&get_path(root, path)?.to_display_string()),
				}
			}
			Ok(out)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use vellum_reactive::{ReactiveError, ReactiveObject};

	#[fixture]
	fn data() -> ReactiveObject {
		ReactiveObject::from_json(json!({
			"a": 1,
			"b": 2,
			"person": { "name": "Alice" },
		}))
		.unwrap()
	}

	fn parse(text: &str) -> Template {
		Template::parse(text, &TemplateConfig::default()).unwrap()
	}

	#[rstest]
	#[case("{{a}} and {{b}}", "1 and 2")]
	#[case("{{ a }}{{ b }}", "12")]
	#[case("Hello, {{ person.name }}!", "Hello, Alice!")]
	#[case("no interpolation", "no interpolation")]
	#[case("{{ }} stays", "{{ }} stays")]
	#[case("{{a}", "{{a}")]
	fn test_render(data: ReactiveObject, #[case] text: &str, #[case] expected: &str) {
		assert_eq!(parse(text).render(&data).unwrap(), expected);
	}

	#[rstest]
	fn test_render_reads_current_values(data: ReactiveObject) {
		let template = parse("{{a}} and {{b}}");

		data.set("b", 3).unwrap();

		assert_eq!(template.render(&data).unwrap(), "1 and 3");
	}

	#[rstest]
	fn test_expressions_in_order() {
		let template = parse("{{ b }} then {{a}} then {{ b }}");

		let expressions = template.expressions().map(Path::as_str).collect::<Vec<_>>();

		assert_eq!(expressions, vec!["b", "a", "b"]);
		assert!(template.has_interpolations());
		assert!(!parse("plain").has_interpolations());
	}

	#[rstest]
	fn test_render_does_not_subscribe(data: ReactiveObject) {
		parse("{{a}}").render(&data).unwrap();

		assert_eq!(data.subscriber_count("a"), Some(0));
	}

	#[rstest]
	fn test_render_missing_leaf_as_null(data: ReactiveObject) {
		assert_eq!(parse("[{{ nope }}]").render(&data).unwrap(), "[null]");
	}

	#[rstest]
	fn test_render_missing_intermediate_fails(data: ReactiveObject) {
		assert!(matches!(
			parse("{{ nope.deeper }}").render(&data),
			Err(ReactiveError::MissingField { .. })
		));
	}

	#[rstest]
	fn test_malformed_expression_fails_to_parse() {
		assert!(matches!(
			Template::parse("{{ a..b }}", &TemplateConfig::default()),
			Err(CompileError::Reactive(ReactiveError::EmptySegment { .. }))
		));
	}

	#[rstest]
	fn test_custom_delimiters_are_escaped(data: ReactiveObject) {
		let config = TemplateConfig::new().delimiters("[[", "]]");
		let template = Template::parse("{{a}} [[ b ]]", &config).unwrap();

		assert_eq!(template.render(&data).unwrap(), "{{a}} 2");
	}

	#[rstest]
	fn test_empty_delimiters_rejected() {
		let config = TemplateConfig::new().delimiters("", "}}");
		assert!(matches!(
			Interpolator::new(&config),
			Err(CompileError::InvalidDelimiters(_))
		));
	}

	proptest! {
		#[test]
		fn prop_text_without_delimiters_renders_verbatim(text in "[^{}]*") {
			let data = ReactiveObject::new();
			let template = parse(&text);
			prop_assert!(!template.has_interpolations());
			prop_assert_eq!(template.render(&data).unwrap(), text);
		}

		#[test]
		fn prop_literals_survive_around_values(
			prefix in "[a-z ]{0,8}",
			suffix in "[a-z ]{0,8}",
			value in any::<i64>(),
		) {
			let data = ReactiveObject::from_json(json!({ "v": value })).unwrap();
			let template = parse(&format!("{prefix}{{{{ v }}}}{suffix}"));
			prop_assert_eq!(
				template.render(&data).unwrap(),
				format!("{prefix}{value}{suffix}")
			);
		}
	}
}
