//! Directive bindings and definitions.
//!
//! A [`DirectiveBinding`] is what a render function attaches to a descriptor:
//! a name, an optional argument, modifiers and a value. A [`DirectiveDef`] is
//! the registered set of lifecycle callbacks that binding resolves to.

use core::fmt;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde_json::Value;

use crate::host::HostNode;
use crate::node::VNode;

/// A directive attached to a descriptor.
#[derive(Clone, Default)]
pub struct DirectiveBinding {
	/// Registered directive name, e.g. `focus`.
	pub name: String,
	/// Name as written in the template, including argument and modifiers.
	pub raw_name: Option<String>,
	/// Current value.
	pub value: Option<Value>,
	/// Value of the previous pass. Filled in by the directive module.
	pub old_value: Option<Value>,
	/// Source expression.
	pub expression: Option<String>,
	/// Argument (`tooltip:top` has arg `top`).
	pub arg: Option<String>,
	/// Argument of the previous pass. Filled in by the directive module.
	pub old_arg: Option<String>,
	/// Modifier flags. `None` is normalized to an empty set.
	pub modifiers: Option<BTreeSet<String>>,
	/// Resolved definition. Filled in during normalization.
	pub def: Option<Rc<DirectiveDef>>,
}

impl DirectiveBinding {
	/// Creates a binding for `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn raw_name(mut self, raw_name: impl Into<String>) -> Self {
		self.raw_name = Some(raw_name.into());
		self
	}

	pub fn value(mut self, value: Value) -> Self {
		self.value = Some(value);
		self
	}

	pub fn expression(mut self, expression: impl Into<String>) -> Self {
		self.expression = Some(expression.into());
		self
	}

	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.arg = Some(arg.into());
		self
	}

	/// Adds a modifier flag.
	pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
		self.modifiers
			.get_or_insert_with(BTreeSet::new)
			.insert(modifier.into());
		self
	}

	/// Attaches an already resolved definition.
	pub fn def(mut self, def: Rc<DirectiveDef>) -> Self {
		self.def = Some(def);
		self
	}

	/// Identity key used to pair bindings across passes.
	///
	/// The raw name when present, otherwise `name`, a `.`, and the sorted
	/// modifiers joined by `.` (so `focus` without modifiers keys as `focus.`).
	pub fn key(&self) -> String {
		if let Some(raw) = &self.raw_name {
			return raw.clone();
		}
		let modifiers: Vec<&str> = self.modifiers.iter().flatten().map(String::as_str).collect();
		format!("{}.{}", self.name, modifiers.join("."))
	}
}

impl fmt::Debug for DirectiveBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DirectiveBinding")
			.field("name", &self.name)
			.field("raw_name", &self.raw_name)
			.field("value", &self.value)
			.field("old_value", &self.old_value)
			.field("arg", &self.arg)
			.field("modifiers", &self.modifiers)
			.field("resolved", &self.def.is_some())
			.finish()
	}
}

/// The five lifecycle callbacks a directive may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveHook {
	Bind,
	Inserted,
	Update,
	ComponentUpdated,
	Unbind,
}

impl DirectiveHook {
	/// Returns the hook's conventional name, as used in diagnostics.
	pub fn as_str(self) -> &'static str {
		match self {
			DirectiveHook::Bind => "bind",
			DirectiveHook::Inserted => "inserted",
			DirectiveHook::Update => "update",
			DirectiveHook::ComponentUpdated => "componentUpdated",
			DirectiveHook::Unbind => "unbind",
		}
	}
}

impl fmt::Display for DirectiveHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Arguments passed to a directive lifecycle callback.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveHookArgs<'a> {
	/// Host node the directive is attached to.
	pub el: Option<&'a HostNode>,
	pub binding: &'a DirectiveBinding,
	pub vnode: &'a VNode,
	pub old_vnode: &'a VNode,
	/// Only meaningful for `unbind`: true when the whole node is destroyed.
	pub is_destroy: bool,
}

/// Signature of a directive lifecycle callback.
pub type DirectiveHookFn = dyn Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()>;

/// A registered directive definition.
#[derive(Clone, Default)]
pub struct DirectiveDef {
	pub bind: Option<Rc<DirectiveHookFn>>,
	pub inserted: Option<Rc<DirectiveHookFn>>,
	pub update: Option<Rc<DirectiveHookFn>>,
	pub component_updated: Option<Rc<DirectiveHookFn>>,
	pub unbind: Option<Rc<DirectiveHookFn>>,
}

impl DirectiveDef {
	/// Creates a definition with no callbacks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Function shorthand: the same callback handles `bind` and `update`.
	pub fn from_fn(
		f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static,
	) -> Self {
		let f: Rc<DirectiveHookFn> = Rc::new(f);
		Self {
			bind: Some(Rc::clone(&f)),
			update: Some(f),
			..Self::default()
		}
	}

	pub fn bind(mut self, f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static) -> Self {
		self.bind = Some(Rc::new(f));
		self
	}

	pub fn inserted(
		mut self,
		f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static,
	) -> Self {
		self.inserted = Some(Rc::new(f));
		self
	}

	pub fn update(
		mut self,
		f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static,
	) -> Self {
		self.update = Some(Rc::new(f));
		self
	}

	pub fn component_updated(
		mut self,
		f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static,
	) -> Self {
		self.component_updated = Some(Rc::new(f));
		self
	}

	pub fn unbind(
		mut self,
		f: impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static,
	) -> Self {
		self.unbind = Some(Rc::new(f));
		self
	}

	/// Returns the callback registered for `hook`.
	pub fn get(&self, hook: DirectiveHook) -> Option<&Rc<DirectiveHookFn>> {
		match hook {
			DirectiveHook::Bind => self.bind.as_ref(),
			DirectiveHook::Inserted => self.inserted.as_ref(),
			DirectiveHook::Update => self.update.as_ref(),
			DirectiveHook::ComponentUpdated => self.component_updated.as_ref(),
			DirectiveHook::Unbind => self.unbind.as_ref(),
		}
	}
}

impl fmt::Debug for DirectiveDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DirectiveDef")
			.field("bind", &self.bind.is_some())
			.field("inserted", &self.inserted.is_some())
			.field("update", &self.update.is_some())
			.field("component_updated", &self.component_updated.is_some())
			.field("unbind", &self.unbind.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_key_prefers_raw_name() {
		let binding = DirectiveBinding::new("focus")
			.raw_name("focus:a.lazy")
			.modifier("lazy");
		assert_eq!(binding.key(), "focus:a.lazy");
	}

	#[rstest]
	fn test_key_sorts_modifiers() {
		let binding = DirectiveBinding::new("model").modifier("trim").modifier("lazy");
		assert_eq!(binding.key(), "model.lazy.trim");
	}

	#[rstest]
	fn test_key_without_modifiers() {
		assert_eq!(DirectiveBinding::new("focus").key(), "focus.");
	}

	#[rstest]
	fn test_from_fn_sets_bind_and_update() {
		let def = DirectiveDef::from_fn(|_| Ok(()));
		assert!(def.get(DirectiveHook::Bind).is_some());
		assert!(def.get(DirectiveHook::Update).is_some());
		assert!(def.get(DirectiveHook::Inserted).is_none());
		assert!(def.get(DirectiveHook::Unbind).is_none());
	}

	#[rstest]
	#[case(DirectiveHook::Bind, "bind")]
	#[case(DirectiveHook::ComponentUpdated, "componentUpdated")]
	fn test_hook_names(#[case] hook: DirectiveHook, #[case] expected: &str) {
		assert_eq!(hook.to_string(), expected);
	}
}
