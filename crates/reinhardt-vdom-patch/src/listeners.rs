//! Listener reconciliation.
//!
//! [`update_listeners`] diffs the listener maps of two descriptor versions.
//! Every live entry of the new map ends up holding a [`ListenerInvoker`]; an
//! event that stays bound keeps its invoker, and only the callbacks inside it
//! are swapped. The host therefore sees an add only for newly bound events
//! and a remove only for events that went away.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use reinhardt_vdom_core::{ComponentRef, Listener, ListenerInvoker, ListenerMap};

use crate::error::{ErrorReporter, PatchError};

/// A listener key with its modifier prefixes parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName {
	/// Name without prefixes.
	pub name: Arc<str>,
	pub once: bool,
	pub capture: bool,
	pub passive: bool,
}

/// Maximum number of raw keys kept by the parse cache.
///
/// Listener keys normally come from a fixed set of compiled templates. Keys
/// seen after the cache is full are parsed on every call instead of stored.
pub const EVENT_NAME_CACHE_LIMIT: usize = 1024;

static EVENT_NAMES: LazyLock<RwLock<HashMap<String, EventName>>> =
	LazyLock::new(|| RwLock::new(HashMap::new()));

/// Parses modifier prefixes off a listener key.
///
/// `&` (passive), `~` (once) and `!` (capture) are stripped in that order,
/// each at most once. Results are cached per raw key, up to
/// [`EVENT_NAME_CACHE_LIMIT`] keys.
pub fn normalize_event(raw: &str) -> EventName {
	if let Some(hit) = EVENT_NAMES.read().get(raw) {
		return hit.clone();
	}
	let parsed = parse_event_name(raw);
	let mut cache = EVENT_NAMES.write();
	if cache.len() < EVENT_NAME_CACHE_LIMIT {
		cache.insert(raw.to_string(), parsed.clone());
	}
	parsed
}

fn parse_event_name(raw: &str) -> EventName {
	let (passive, rest) = strip_prefix(raw, '&');
	let (once, rest) = strip_prefix(rest, '~');
	let (capture, rest) = strip_prefix(rest, '!');
	EventName {
		name: rest.into(),
		once,
		capture,
		passive,
	}
}

fn strip_prefix(name: &str, prefix: char) -> (bool, &str) {
	match name.strip_prefix(prefix) {
		Some(rest) => (true, rest),
		None => (false, name),
	}
}

/// Reconciles `on` against `old_on`.
///
/// `add` is called for events bound in `on` but not in `old_on`, `remove` for
/// events bound in `old_on` but missing (or `None`) in `on`. Events bound in
/// both reuse the old invoker. `old_on` is only read.
///
/// A `None` entry in `on` is reported as an invalid handler and never added.
pub fn update_listeners(
	on: &mut ListenerMap,
	old_on: &ListenerMap,
	mut add: impl FnMut(&EventName, &Rc<ListenerInvoker>),
	mut remove: impl FnMut(&EventName, &Rc<ListenerInvoker>),
	owner: Option<&ComponentRef>,
	reporter: &dyn ErrorReporter,
) {
	for (raw, slot) in on.iter_mut() {
		let event = normalize_event(raw);
		let Some(cur) = slot.take() else {
			reporter.warn(
				&PatchError::InvalidHandler {
					event: event.name.to_string(),
				},
				owner,
			);
			continue;
		};

		let old = old_on
			.get(raw)
			.and_then(Option::as_ref)
			.and_then(Listener::as_invoker);

		let invoker = match old {
			None => {
				let invoker = match cur {
					Listener::Invoker(invoker) => invoker,
					Listener::Handlers(fns) => ListenerInvoker::new(fns),
				};
				tracing::trace!(event = %event.name, once = event.once, "add listener");
				add(&event, &invoker);
				invoker
			}
			Some(old) => {
				match cur {
					Listener::Invoker(ref inv) if Rc::ptr_eq(inv, old) => {}
					Listener::Handlers(ref fns) if fns.same(&old.fns()) => {}
					changed => old.set_fns(changed.into_fns()),
				}
				Rc::clone(old)
			}
		};
		*slot = Some(Listener::Invoker(invoker));
	}

	for (raw, value) in old_on {
		let Some(old) = value.as_ref().and_then(Listener::as_invoker) else {
			continue;
		};
		if matches!(on.get(raw), Some(Some(_))) {
			continue;
		}
		let event = normalize_event(raw);
		tracing::trace!(event = %event.name, "remove listener");
		remove(&event, old);
	}
}
