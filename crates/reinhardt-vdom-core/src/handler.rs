//! Identity-carrying callback handles.
//!
//! Host registrations and merged hook slots key callbacks by identity, not by
//! behaviour. A [`Handler`] pairs an `Rc` callback with a process-unique
//! [`HandlerId`]; clones share the id, so two handlers compare equal exactly
//! when they came from the same `Handler::new` call.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;

/// Unique identifier of a [`Handler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
	/// Allocates a fresh identifier.
	pub fn next() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(1);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw numeric value.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

/// A callback with stable identity.
pub struct Handler<F: ?Sized> {
	id: HandlerId,
	func: Rc<F>,
}

impl<F: ?Sized> Handler<F> {
	/// Wraps an already type-erased callback, assigning it a new identity.
	pub fn new(func: Rc<F>) -> Self {
		Self::with_id(HandlerId::next(), func)
	}

	/// Wraps a callback under an identity allocated by the caller.
	///
	/// Used when the callback has to know its own id before it exists, e.g.
	/// a hook that removes itself from the invoker that runs it.
	pub fn with_id(id: HandlerId, func: Rc<F>) -> Self {
		Self { id, func }
	}

	/// Returns the identity of this handler.
	pub fn id(&self) -> HandlerId {
		self.id
	}

	/// Returns the underlying callback.
	pub fn func(&self) -> &F {
		&self.func
	}

	/// Returns true when both handles refer to the same registration.
	pub fn same(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<F: ?Sized> Clone for Handler<F> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			func: Rc::clone(&self.func),
		}
	}
}

impl<F: ?Sized> fmt::Debug for Handler<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Handler").field(&self.id.0).finish()
	}
}

/// One callback or an ordered sequence of callbacks bound to a single slot.
///
/// The distinction matters to [`Invoker`](crate::invoker::Invoker): only a
/// `Single` handler has its return value passed back to the caller.
pub enum Handlers<F: ?Sized> {
	/// Exactly one callback.
	Single(Handler<F>),
	/// Zero or more callbacks, run in order.
	Many(Vec<Handler<F>>),
}

impl<F: ?Sized> Handlers<F> {
	/// Returns the number of callbacks held.
	pub fn len(&self) -> usize {
		match self {
			Handlers::Single(_) => 1,
			Handlers::Many(list) => list.len(),
		}
	}

	/// Returns true when no callback is held.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true when a handler with `id` is held.
	pub fn contains(&self, id: HandlerId) -> bool {
		match self {
			Handlers::Single(handler) => handler.id() == id,
			Handlers::Many(list) => list.iter().any(|h| h.id() == id),
		}
	}

	/// Identity comparison: same shape and the same handlers in the same order.
	pub fn same(&self, other: &Self) -> bool {
		match (self, other) {
			(Handlers::Single(a), Handlers::Single(b)) => a.same(b),
			(Handlers::Many(a), Handlers::Many(b)) => {
				a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same(y))
			}
			_ => false,
		}
	}

	/// Flattens into a list, preserving order.
	pub fn into_vec(self) -> Vec<Handler<F>> {
		match self {
			Handlers::Single(handler) => vec![handler],
			Handlers::Many(list) => list,
		}
	}

	/// Iterates the held handlers in order.
	pub fn iter(&self) -> impl Iterator<Item = &Handler<F>> {
		let slice: &[Handler<F>] = match self {
			Handlers::Single(handler) => core::slice::from_ref(handler),
			Handlers::Many(list) => list,
		};
		slice.iter()
	}
}

impl<F: ?Sized> Clone for Handlers<F> {
	fn clone(&self) -> Self {
		match self {
			Handlers::Single(handler) => Handlers::Single(handler.clone()),
			Handlers::Many(list) => Handlers::Many(list.clone()),
		}
	}
}

impl<F: ?Sized> fmt::Debug for Handlers<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Handlers::Single(handler) => f.debug_tuple("Single").field(handler).finish(),
			Handlers::Many(list) => f.debug_tuple("Many").field(list).finish(),
		}
	}
}

impl<F: ?Sized> From<Handler<F>> for Handlers<F> {
	fn from(handler: Handler<F>) -> Self {
		Handlers::Single(handler)
	}
}

impl<F: ?Sized> From<Vec<Handler<F>>> for Handlers<F> {
	fn from(list: Vec<Handler<F>>) -> Self {
		Handlers::Many(list)
	}
}
