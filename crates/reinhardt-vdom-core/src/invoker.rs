//! Identity-stable callback invokers.
//!
//! An [`Invoker`] is registered once with the host (as an event listener) or
//! stored once in a hook slot, and is then reused for the lifetime of the
//! host node. Updates replace the callbacks it holds, never the invoker
//! itself, so the host sees no remove/add churn.
//!
//! ## Re-entrancy
//!
//! [`Invoker::invoke`] snapshots the callback list before running it. A
//! callback may therefore remove itself (or a sibling) from the invoker while
//! it runs without causing another callback of the same pass to be skipped
//! or run twice.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

use crate::event::HostEvent;
use crate::handler::{Handler, HandlerId, Handlers};
use crate::node::VNode;

/// Callback type held by event listener invokers.
pub type ListenerFn = dyn Fn(&HostEvent);

/// Callback type held by hook-slot invokers, called with `(old, vnode)`.
pub type HookFn = dyn Fn(&VNode, &VNode);

/// Invoker registered with the host for one event name.
pub type ListenerInvoker = Invoker<ListenerFn>;

/// Invoker stored in a descriptor's hook table.
pub type HookInvoker = Invoker<HookFn>;

/// A stable callback wrapper around a replaceable set of callbacks.
pub struct Invoker<F: ?Sized> {
	fns: RefCell<Handlers<F>>,
	merged: Cell<bool>,
}

impl<F: ?Sized> Invoker<F> {
	/// Creates a new invoker over `fns`.
	pub fn new(fns: impl Into<Handlers<F>>) -> Rc<Self> {
		Rc::new(Self {
			fns: RefCell::new(fns.into()),
			merged: Cell::new(false),
		})
	}

	/// Runs every held callback in order through `call`.
	///
	/// Returns `Some` with the callback's result only when a single callback
	/// (not a sequence) is held; sequences yield `None`.
	pub fn invoke<R>(&self, mut call: impl FnMut(&F) -> R) -> Option<R> {
		// Snapshot first: callbacks may mutate `fns` while running.
		let snapshot = self.fns.borrow().clone();
		match snapshot {
			Handlers::Single(handler) => Some(call(handler.func())),
			Handlers::Many(list) => {
				for handler in &list {
					call(handler.func());
				}
				None
			}
		}
	}

	/// Returns a copy of the held callbacks.
	pub fn fns(&self) -> Handlers<F> {
		self.fns.borrow().clone()
	}

	/// Replaces the held callbacks, keeping the invoker's identity.
	pub fn set_fns(&self, fns: impl Into<Handlers<F>>) {
		*self.fns.borrow_mut() = fns.into();
	}

	/// Appends a callback. A single held callback is promoted to a sequence.
	pub fn push(&self, handler: Handler<F>) {
		let mut fns = self.fns.borrow_mut();
		match &mut *fns {
			Handlers::Many(list) => list.push(handler),
			Handlers::Single(existing) => {
				let existing = existing.clone();
				*fns = Handlers::Many(vec![existing, handler]);
			}
		}
	}

	/// Removes the callback with `id`. Returns whether one was removed.
	///
	/// Removing the only callback of a `Single` invoker leaves an empty
	/// sequence behind.
	pub fn remove(&self, id: HandlerId) -> bool {
		let mut fns = self.fns.borrow_mut();
		match &mut *fns {
			Handlers::Many(list) => {
				let before = list.len();
				list.retain(|h| h.id() != id);
				list.len() != before
			}
			Handlers::Single(handler) if handler.id() == id => {
				*fns = Handlers::Many(Vec::new());
				true
			}
			Handlers::Single(_) => false,
		}
	}

	/// Returns the number of held callbacks.
	pub fn len(&self) -> usize {
		self.fns.borrow().len()
	}

	/// Returns true when no callback is held.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true when this invoker was composed by the hook merger.
	pub fn is_merged(&self) -> bool {
		self.merged.get()
	}

	/// Marks this invoker as composed by the hook merger.
	pub fn mark_merged(&self) {
		self.merged.set(true);
	}
}

impl ListenerInvoker {
	/// Dispatches a host event to every held listener.
	pub fn call(&self, event: &HostEvent) {
		self.invoke(|f| f(event));
	}
}

impl HookInvoker {
	/// Fires the hook slot with the `(old, vnode)` pair.
	pub fn call(&self, old: &VNode, vnode: &VNode) {
		self.invoke(|f| f(old, vnode));
	}
}

impl<F: ?Sized> fmt::Debug for Invoker<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Invoker")
			.field("fns", &*self.fns.borrow())
			.field("merged", &self.merged.get())
			.finish()
	}
}
