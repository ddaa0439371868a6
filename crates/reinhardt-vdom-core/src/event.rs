//! Event listener values carried by node descriptors.

use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::handler::{Handler, Handlers};
use crate::host::HostNode;
use crate::invoker::{ListenerFn, ListenerInvoker};

/// An event delivered by the host to a registered listener invoker.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
	/// The event type (e.g. `"click"`).
	pub event_type: String,
	/// The node the event was dispatched on.
	pub target: Option<HostNode>,
	/// Host-specific payload.
	pub detail: Value,
}

impl HostEvent {
	/// Creates an event without target or payload.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			target: None,
			detail: Value::Null,
		}
	}

	/// Sets the dispatch target.
	pub fn target(mut self, target: HostNode) -> Self {
		self.target = Some(target);
		self
	}

	/// Sets the payload.
	pub fn detail(mut self, detail: Value) -> Self {
		self.detail = detail;
		self
	}
}

/// A listener handle for [`ListenerFn`] callbacks.
pub type ListenerHandler = Handler<ListenerFn>;

/// The value bound to one event name in [`ListenerMap`].
#[derive(Debug, Clone)]
pub enum Listener {
	/// Raw callbacks as produced by the render function.
	Handlers(Handlers<ListenerFn>),
	/// An invoker already registered with the host by a previous pass.
	Invoker(Rc<ListenerInvoker>),
}

impl Listener {
	/// Wraps a closure as a single listener.
	pub fn from_fn(f: impl Fn(&HostEvent) + 'static) -> Self {
		Listener::Handlers(Handlers::Single(listener_handler(f)))
	}

	/// Returns the invoker if this value already is one.
	pub fn as_invoker(&self) -> Option<&Rc<ListenerInvoker>> {
		match self {
			Listener::Invoker(invoker) => Some(invoker),
			Listener::Handlers(_) => None,
		}
	}

	/// Converts into raw handlers.
	///
	/// An invoker is folded into a single handler that forwards to it, so
	/// the invoker keeps owning its current callbacks.
	pub fn into_fns(self) -> Handlers<ListenerFn> {
		match self {
			Listener::Handlers(handlers) => handlers,
			Listener::Invoker(invoker) => {
				Handlers::Single(listener_handler(move |event| invoker.call(event)))
			}
		}
	}

	/// Flattens into a handler list, preserving order.
	pub fn into_handlers(self) -> Vec<ListenerHandler> {
		self.into_fns().into_vec()
	}

	/// Concatenates two optional listener values, `first` running first.
	///
	/// Returns the other side unchanged when one side is `None`.
	pub fn concat(first: Option<Listener>, second: Option<Listener>) -> Option<Listener> {
		match (first, second) {
			(Some(a), Some(b)) => {
				let mut list = a.into_handlers();
				list.extend(b.into_handlers());
				Some(Listener::Handlers(Handlers::Many(list)))
			}
			(a, None) => a,
			(None, b) => b,
		}
	}
}

impl From<ListenerHandler> for Listener {
	fn from(handler: ListenerHandler) -> Self {
		Listener::Handlers(Handlers::Single(handler))
	}
}

impl From<Vec<ListenerHandler>> for Listener {
	fn from(list: Vec<ListenerHandler>) -> Self {
		Listener::Handlers(Handlers::Many(list))
	}
}

/// Creates a listener handle from a closure.
pub fn listener_handler(f: impl Fn(&HostEvent) + 'static) -> ListenerHandler {
	let func: Rc<ListenerFn> = Rc::new(f);
	Handler::new(func)
}

/// Event name (possibly carrying `&`, `~`, `!` modifier prefixes) to listener.
///
/// A `None` value stands for a binding whose handler evaluated to nothing.
pub type ListenerMap = IndexMap<String, Option<Listener>>;

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use rstest::rstest;

	#[rstest]
	fn test_into_handlers_forwards_to_invoker() {
		let hits = Rc::new(Cell::new(0));
		let counter = Rc::clone(&hits);
		let invoker = ListenerInvoker::new(listener_handler(move |_| {
			counter.set(counter.get() + 1);
		}));

		let handlers = Listener::Invoker(invoker).into_handlers();
		assert_eq!(handlers.len(), 1);
		(handlers[0].func())(&HostEvent::new("click"));
		assert_eq!(hits.get(), 1);
	}

	#[rstest]
	fn test_concat_keeps_order() {
		let a = listener_handler(|_| {});
		let b = listener_handler(|_| {});
		let c = listener_handler(|_| {});
		let joined = Listener::concat(
			Some(Listener::from(a.clone())),
			Some(Listener::from(vec![b.clone(), c.clone()])),
		);

		let Some(Listener::Handlers(Handlers::Many(list))) = joined else {
			panic!("expected a handler sequence");
		};
		let ids: Vec<_> = list.iter().map(|h| h.id()).collect();
		assert_eq!(ids, vec![a.id(), b.id(), c.id()]);
	}

	#[rstest]
	fn test_concat_with_none() {
		let a = listener_handler(|_| {});
		let joined = Listener::concat(None, Some(Listener::from(a.clone())));
		assert!(matches!(joined, Some(Listener::Handlers(Handlers::Single(h))) if h.same(&a)));
		assert!(Listener::concat(None, None).is_none());
	}

	#[rstest]
	fn test_host_event_builder() {
		let event = HostEvent::new("input").detail(serde_json::json!({"value": "a"}));
		assert_eq!(event.event_type, "input");
		assert_eq!(event.detail["value"], "a");
		assert!(event.target.is_none());
	}
}
