//! Binder / compiler
//!
//! [`Compiler::compile`] walks the children of a root node once, top to
//! bottom. Element attributes are checked for directives in document order,
//! then the element's children are compiled. Every other node is an
//! interpolation candidate.
//!
//! Each binding creates its [`Observer`]s and performs the first render.
//! From then on the observers are owned by the dependency sets they
//! subscribed to; the compiler keeps no state.
//!
//! ## Directive handlers
//!
//! | Directive | Observer callback | Listener |
//! |-----------|-------------------|----------|
//! | text | `set_text_content` | - |
//! | html | `set_inner_html` | - |
//! | model | `set_value` | `input` writes the node value back |
//! | on | - | the event calls the named method |
//! | bind | `set_attribute` | - |
//! | `{{ }}` | full template re-render | - |
//!
//! The model directive is the only two-way binding. Writing the node value
//! back into the store notifies the model observer too, which then sees the
//! value it already holds and does nothing.
//!
//! Text, html and model sinks render null as empty; interpolations and
//! attributes render it as `null`.
//!
//! An event directive naming a method the view model does not have is
//! rejected at compile time with [`CompileError::UnknownMethod`], rather than
//! failing when the event first fires.

use std::rc::Rc;

use vellum_dom::{DomNode, INPUT, ListenerError, listener};
use vellum_reactive::{Observer, Path, PathRoot, ReactiveValue};

use crate::config::TemplateConfig;
use crate::directive::{Directive, DirectiveKind};
use crate::error::{CompileError, Result};
use crate::mustache::{Interpolator, Template};
use crate::view_model::ViewModel;

/// What a binding renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
	/// A directive attribute
	Directive(DirectiveKind),
	/// `{{ }}` interpolations in a text node, or in a text directive value
	Interpolation,
}

/// One binding produced by compilation
#[derive(Debug, Clone)]
pub struct Binding {
	/// What the binding renders into
	pub kind: BindingKind,
	/// Event or attribute name for `on` / `bind`
	pub argument: Option<String>,
	/// Expressions the binding observes, or the method name for `on`
	pub expressions: Vec<String>,
	/// The live observers, one per expression (none for `on`)
	pub observers: Vec<Rc<Observer>>,
}

impl Binding {
	fn new(kind: BindingKind) -> Self {
		Self {
			kind,
			argument: None,
			expressions: Vec::new(),
			observers: Vec::new(),
		}
	}
}

/// Compiles templates against one view model
pub struct Compiler {
	view_model: ViewModel,
	root: Rc<dyn PathRoot>,
	config: TemplateConfig,
	interpolator: Interpolator,
}

impl Compiler {
	/// Create a compiler for `view_model`.
	pub fn new(view_model: ViewModel, config: TemplateConfig) -> Result<Self> {
		let interpolator = Interpolator::new(&config)?;
		let root: Rc<dyn PathRoot> = Rc::new(view_model.clone());
		Ok(Self {
			view_model,
			root,
			config,
			interpolator,
		})
	}

	/// The configuration in use
	pub fn config(&self) -> &TemplateConfig {
		&self.config
	}

	/// Compile every descendant of `root`.
	///
	/// Stops at the first failing binding; bindings created before the
	/// failure stay live.
	pub fn compile<N: DomNode>(&self, root: &N) -> Result<Vec<Binding>> {
		let mut bindings = Vec::new();
		self.compile_children(root, &mut bindings)?;
		tracing::debug!(bindings = bindings.len(), "compiled template");
		Ok(bindings)
	}

	fn compile_children<N: DomNode>(&self, node: &N, bindings: &mut Vec<Binding>) -> Result<()> {
		for child in node.children() {
			if child.is_element() {
				self.compile_element(&child, bindings)?;
				// Children are read after the element's own directives ran
				self.compile_children(&child, bindings)?;
			} else {
				self.compile_text(&child, bindings)?;
			}
		}
		Ok(())
	}

	fn compile_element<N: DomNode>(&self, node: &N, bindings: &mut Vec<Binding>) -> Result<()> {
		for (name, value) in node.attributes() {
			let Some(directive) = Directive::parse(&name, &value, &self.config)? else {
				continue;
			};
			tracing::debug!(
				directive = %directive.kind,
				argument = ?directive.argument,
				expression = %directive.expression,
				"binding directive"
			);
			let binding = match directive.kind {
				DirectiveKind::Text => self.bind_content(node, &directive, |n, text| {
					n.set_text_content(text)
				})?,
				DirectiveKind::Html => self.bind_content(node, &directive, |n, markup| {
					n.set_inner_html(markup)
				})?,
				DirectiveKind::Model => self.bind_model(node, &directive)?,
				DirectiveKind::On => self.bind_event(node, &directive)?,
				DirectiveKind::Bind => self.bind_attribute(node, &directive)?,
			};
			bindings.push(binding);
		}
		Ok(())
	}

	fn compile_text<N: DomNode>(&self, node: &N, bindings: &mut Vec<Binding>) -> Result<()> {
		let content = node.text_content();
		if !self.interpolator.matches(&content) {
			return Ok(());
		}
		let template = self.interpolator.parse(&content)?;
		if !template.has_interpolations() {
			return Ok(());
		}
		tracing::debug!(template = %content, "binding interpolation");
		let binding = self.bind_template(node, template, |n, text| n.set_text_content(text))?;
		bindings.push(binding);
		Ok(())
	}

	/// Text and html directives: render the value, or a template when the
	/// expression itself contains interpolations.
	fn bind_content<N, F>(&self, node: &N, directive: &Directive, write: F) -> Result<Binding>
	where
		N: DomNode,
		F: Fn(&N, &str) + Clone + 'static,
	{
		if self.interpolator.matches(&directive.expression) {
			let template = self.interpolator.parse(&directive.expression)?;
			return self.bind_template(node, template, write);
		}

		let target = node.clone();
		let render = write.clone();
		let observer = self.observe(&directive.expression, move |value| {
			render(&target, &value.to_property_string());
			Ok(())
		})?;
		write(node, &observer.value().to_property_string());

		let mut binding = Binding::new(BindingKind::Directive(directive.kind));
		binding.expressions.push(directive.expression.clone());
		binding.observers.push(observer);
		Ok(binding)
	}

	/// One observer per interpolation; any change re-renders the whole
	/// template.
	fn bind_template<N, F>(&self, node: &N, template: Template, write: F) -> Result<Binding>
	where
		N: DomNode,
		F: Fn(&N, &str) + Clone + 'static,
	{
		let template = Rc::new(template);
		let mut binding = Binding::new(BindingKind::Interpolation);

		for expression in template.expressions() {
			let target = node.clone();
			let render = write.clone();
			let template = Rc::clone(&template);
			let view_model = self.view_model.clone();
			let observer = self.observe(expression.as_str(), move |_| {
				render(&target, &template.render(&view_model)?);
				Ok(())
			})?;
			binding.expressions.push(expression.to_string());
			binding.observers.push(observer);
		}

		write(node, &template.render(&self.view_model)?);
		Ok(binding)
	}

	fn bind_model<N: DomNode>(&self, node: &N, directive: &Directive) -> Result<Binding> {
		let target = node.clone();
		let observer = self.observe(&directive.expression, move |value| {
			target.set_value(&value.to_property_string());
			Ok(())
		})?;
		node.set_value(&observer.value().to_property_string());

		let path = Path::parse(&directive.expression)?;
		let source = node.clone();
		let view_model = self.view_model.clone();
		node.add_event_listener(
			INPUT,
			listener(move |_| -> std::result::Result<(), ListenerError> {
				let value = ReactiveValue::from(source.value());
				vellum_reactive::set_path(&view_model, &path, value)?;
				Ok(())
			}),
		);

		let mut binding = Binding::new(BindingKind::Directive(DirectiveKind::Model));
		binding.expressions.push(directive.expression.clone());
		binding.observers.push(observer);
		Ok(binding)
	}

	fn bind_event<N: DomNode>(&self, node: &N, directive: &Directive) -> Result<Binding> {
		let method = directive.expression.clone();
		if !self.view_model.has_method(&method) {
			return Err(CompileError::UnknownMethod { name: method });
		}
		// Checked by `Directive::parse`
		let event_type = directive.argument.clone().unwrap_or_default();

		let view_model = self.view_model.clone();
		let name = method.clone();
		node.add_event_listener(
			&event_type,
			listener(move |event| {
				view_model.call(&name, event)?;
				Ok(())
			}),
		);

		let mut binding = Binding::new(BindingKind::Directive(DirectiveKind::On));
		binding.argument = Some(event_type);
		binding.expressions.push(method);
		Ok(binding)
	}

	fn bind_attribute<N: DomNode>(&self, node: &N, directive: &Directive) -> Result<Binding> {
		let attribute = directive.argument.clone().unwrap_or_default();
		let target = node.clone();
		let name = attribute.clone();
		let observer = self.observe(&directive.expression, move |value| {
			target.set_attribute(&name, &value.to_display_string());
			Ok(())
		})?;
		node.set_attribute(&attribute, &observer.value().to_display_string());

		let mut binding = Binding::new(BindingKind::Directive(DirectiveKind::Bind));
		binding.argument = Some(attribute);
		binding.expressions.push(directive.expression.clone());
		binding.observers.push(observer);
		Ok(binding)
	}

	fn observe<F>(&self, expression: &str, callback: F) -> Result<Rc<Observer>>
	where
		F: Fn(&ReactiveValue) -> vellum_reactive::Result<()> + 'static,
	{
		Ok(Observer::with_tracking(
			Rc::clone(&self.root),
			expression,
			self.config.update_tracking,
			callback,
		)?)
	}
}
