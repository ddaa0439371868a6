//! Owning component context.
//!
//! Component instantiation lives outside this crate; the patch modules only
//! need a component's registered directives, its parent link (for error
//! propagation) and its `error_captured` hooks.

use core::fmt;
use std::collections::HashMap;
use std::error::Error;
use std::rc::Rc;

use crate::directive::DirectiveDef;

/// Called with the error and a label describing where it happened.
/// Returning `false` stops propagation to ancestors and the reporter.
pub type ErrorCapturedFn = Rc<dyn Fn(&(dyn Error + 'static), &str) -> bool>;

/// Shared handle to a component context.
pub type ComponentRef = Rc<ComponentContext>;

/// The component that owns a descriptor.
#[derive(Clone, Default)]
pub struct ComponentContext {
	pub name: Option<String>,
	/// Locally registered directives, keyed by id.
	pub directives: HashMap<String, Rc<DirectiveDef>>,
	pub parent: Option<ComponentRef>,
	pub error_captured: Vec<ErrorCapturedFn>,
}

impl ComponentContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	pub fn directive(mut self, id: impl Into<String>, def: DirectiveDef) -> Self {
		self.directives.insert(id.into(), Rc::new(def));
		self
	}

	pub fn parent(mut self, parent: ComponentRef) -> Self {
		self.parent = Some(parent);
		self
	}

	pub fn on_error_captured(
		mut self,
		hook: impl Fn(&(dyn Error + 'static), &str) -> bool + 'static,
	) -> Self {
		self.error_captured.push(Rc::new(hook));
		self
	}

	/// Freezes the context into a shared handle.
	pub fn into_ref(self) -> ComponentRef {
		Rc::new(self)
	}

	/// Name used in diagnostics.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or("<Anonymous>")
	}

	/// Iterates this component's ancestors, nearest first.
	pub fn ancestors(&self) -> impl Iterator<Item = &ComponentRef> {
		core::iter::successors(self.parent.as_ref(), |c| c.parent.as_ref())
	}
}

impl fmt::Debug for ComponentContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentContext")
			.field("name", &self.name)
			.field("directives", &self.directives.keys().collect::<Vec<_>>())
			.field("parent", &self.parent.as_ref().map(|p| p.display_name().to_string()))
			.field("error_captured", &self.error_captured.len())
			.finish()
	}
}

/// Options of the component a placeholder descriptor instantiates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOptions {
	/// When false, attributes the parent puts on the component's root are
	/// not applied to the host node.
	pub inherit_attrs: bool,
}

impl Default for ComponentOptions {
	fn default() -> Self {
		Self { inherit_attrs: true }
	}
}
