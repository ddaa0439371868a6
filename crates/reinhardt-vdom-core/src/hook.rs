//! Lifecycle hook slots of a node descriptor.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::handler::Handler;
use crate::invoker::{HookFn, HookInvoker};
use crate::node::VNode;

/// A named lifecycle event on a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookSlot {
	Init,
	Create,
	Prepatch,
	Update,
	Postpatch,
	Insert,
	Destroy,
	Remove,
}

impl HookSlot {
	/// All slots in lifecycle order.
	pub const ALL: [HookSlot; 8] = [
		HookSlot::Init,
		HookSlot::Create,
		HookSlot::Prepatch,
		HookSlot::Update,
		HookSlot::Postpatch,
		HookSlot::Insert,
		HookSlot::Destroy,
		HookSlot::Remove,
	];

	/// Returns the canonical lowercase name.
	pub fn as_str(self) -> &'static str {
		match self {
			HookSlot::Init => "init",
			HookSlot::Create => "create",
			HookSlot::Prepatch => "prepatch",
			HookSlot::Update => "update",
			HookSlot::Postpatch => "postpatch",
			HookSlot::Insert => "insert",
			HookSlot::Destroy => "destroy",
			HookSlot::Remove => "remove",
		}
	}

	/// Parses a canonical slot name.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|slot| slot.as_str() == name)
	}
}

impl fmt::Display for HookSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The value stored in one hook slot.
#[derive(Debug, Clone)]
pub enum HookValue {
	/// A plain callback supplied by whoever built the descriptor.
	Plain(Handler<HookFn>),
	/// An invoker, usually composed by the hook merger.
	Invoker(Rc<HookInvoker>),
}

impl HookValue {
	/// Wraps a closure as a plain hook.
	pub fn from_fn(f: impl Fn(&VNode, &VNode) + 'static) -> Self {
		HookValue::Plain(hook_handler(f))
	}

	/// Fires the slot with `(old, vnode)`.
	pub fn call(&self, old: &VNode, vnode: &VNode) {
		match self {
			HookValue::Plain(handler) => (handler.func())(old, vnode),
			HookValue::Invoker(invoker) => invoker.call(old, vnode),
		}
	}

	/// Returns the invoker if this slot holds one.
	pub fn as_invoker(&self) -> Option<&Rc<HookInvoker>> {
		match self {
			HookValue::Invoker(invoker) => Some(invoker),
			HookValue::Plain(_) => None,
		}
	}

	/// Returns true when this slot holds an invoker built by the hook merger.
	pub fn is_merged(&self) -> bool {
		self.as_invoker().is_some_and(|inv| inv.is_merged())
	}
}

/// Hook slot to its value.
pub type HookTable = IndexMap<HookSlot, HookValue>;

/// Creates a hook handle from a closure.
pub fn hook_handler(f: impl Fn(&VNode, &VNode) + 'static) -> Handler<HookFn> {
	let func: Rc<HookFn> = Rc::new(f);
	Handler::new(func)
}

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use rstest::rstest;

	#[rstest]
	#[case("insert", Some(HookSlot::Insert))]
	#[case("postpatch", Some(HookSlot::Postpatch))]
	#[case("Insert", None)]
	#[case("mounted", None)]
	fn test_parse(#[case] name: &str, #[case] expected: Option<HookSlot>) {
		assert_eq!(HookSlot::parse(name), expected);
	}

	#[rstest]
	fn test_names_round_trip() {
		for slot in HookSlot::ALL {
			assert_eq!(HookSlot::parse(slot.as_str()), Some(slot));
		}
	}

	#[rstest]
	fn test_plain_hook_call() {
		let hits = Rc::new(Cell::new(0));
		let counter = Rc::clone(&hits);
		let hook = HookValue::from_fn(move |_, _| counter.set(counter.get() + 1));

		let node = VNode::empty();
		hook.call(&node, &node);
		assert_eq!(hits.get(), 1);
		assert!(!hook.is_merged());
	}
}
