//! Directive definition lookup.

use std::collections::HashMap;
use std::rc::Rc;

use parking_lot::RwLock;
use reinhardt_vdom_core::{ComponentRef, DirectiveDef};

/// Resolves a directive name to its registered definition.
pub trait DirectiveResolver {
	/// Returns the definition bound to `name`, looking at `owner`'s local
	/// registrations before anything global. `None` means not found.
	fn resolve(&self, owner: Option<&ComponentRef>, name: &str) -> Option<Rc<DirectiveDef>>;
}

/// Global directive registrations.
///
/// Lookups try the id as given, its camelCase form, then its PascalCase form,
/// first against the owner's local directives and then against this registry.
#[derive(Debug, Default)]
pub struct DirectiveRegistry {
	directives: RwLock<HashMap<String, Rc<DirectiveDef>>>,
}

impl DirectiveRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a global directive, replacing any previous definition.
	pub fn register(&self, id: impl Into<String>, def: DirectiveDef) {
		self.directives.write().insert(id.into(), Rc::new(def));
	}

	/// Builder-style [`register`](Self::register).
	pub fn with(self, id: impl Into<String>, def: DirectiveDef) -> Self {
		self.register(id, def);
		self
	}

	pub fn unregister(&self, id: &str) -> bool {
		self.directives.write().remove(id).is_some()
	}

	pub fn len(&self) -> usize {
		self.directives.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl DirectiveResolver for DirectiveRegistry {
	fn resolve(&self, owner: Option<&ComponentRef>, name: &str) -> Option<Rc<DirectiveDef>> {
		let camelized = camelize(name);
		let pascal = capitalize(&camelized);
		let candidates = [name, camelized.as_str(), pascal.as_str()];

		if let Some(owner) = owner
			&& let Some(def) = candidates.iter().find_map(|id| owner.directives.get(*id))
		{
			return Some(Rc::clone(def));
		}

		let global = self.directives.read();
		candidates
			.iter()
			.find_map(|id| global.get(*id))
			.map(Rc::clone)
	}
}

/// `foo-bar` to `fooBar`.
pub fn camelize(id: &str) -> String {
	let mut out = String::with_capacity(id.len());
	let mut chars = id.chars().peekable();
	while let Some(c) = chars.next() {
		match chars.peek() {
			Some(next) if c == '-' && (next.is_alphanumeric() || *next == '_') => {
				let next = chars.next().unwrap_or_default();
				out.extend(next.to_uppercase());
			}
			_ => out.push(c),
		}
	}
	out
}

/// Upper-cases the first character.
pub fn capitalize(id: &str) -> String {
	let mut chars = id.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// `fooBar` to `foo-bar`.
pub fn hyphenate(id: &str) -> String {
	let mut out = String::with_capacity(id.len() + 4);
	for (i, c) in id.char_indices() {
		if c.is_ascii_uppercase() && i > 0 {
			out.push('-');
		}
		out.push(c.to_ascii_lowercase());
	}
	out
}
