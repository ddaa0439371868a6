//! Host event listener module.
//!
//! Applies [`update_listeners`] to a node pair and turns its add/remove
//! decisions into host listener registrations.

use core::cell::RefCell;

use reinhardt_vdom_core::{HostResult, Listener, ListenerMap, ListenerRegistration, VNode};

use super::PatchModule;
use crate::conf::HostProfile;
use crate::context::PatchContext;
use crate::error::PatchError;
use crate::listeners::update_listeners;

/// Compiler token for range input model bindings.
pub const RANGE_TOKEN: &str = "__r";

/// Compiler token for checkbox and radio model bindings.
pub const CHECKBOX_RADIO_TOKEN: &str = "__c";

/// Registers `data.on` listeners on the host node.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsModule;

impl PatchModule for EventsModule {
	fn name(&self) -> &'static str {
		"events"
	}

	fn create(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_dom_listeners(old, vnode, cx);
	}

	fn update(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_dom_listeners(old, vnode, cx);
	}

	fn destroy(&self, vnode: &VNode, cx: &mut PatchContext<'_>) {
		let mut empty = VNode::empty();
		update_dom_listeners(vnode, &mut empty, cx);
	}
}

/// Folds the model-binding tokens into real event names.
///
/// Token handlers run before handlers already bound to the target event.
pub fn normalize_events(on: &mut ListenerMap, profile: HostProfile) {
	fold_token(on, RANGE_TOKEN, profile.range_input_event());
	fold_token(on, CHECKBOX_RADIO_TOKEN, "change");
}

fn fold_token(on: &mut ListenerMap, token: &str, event: &str) {
	if !matches!(on.get(token), Some(Some(_))) {
		return;
	}
	let folded = on.shift_remove(token).flatten();
	let existing = on.get_mut(event).and_then(Option::take);
	let merged = Listener::concat(folded, existing).map(|l| Listener::from(l.into_handlers()));
	on.insert(event.to_string(), merged);
}

fn update_dom_listeners(old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
	if old.data.on.is_none() && vnode.data.on.is_none() {
		return;
	}
	let Some(target) = vnode.elm.clone().or_else(|| old.elm.clone()) else {
		return;
	};

	let bound = vnode.data.on.is_some();
	let mut on = vnode.data.on.take().unwrap_or_default();
	let empty = ListenerMap::new();
	let old_on = old.data.on.as_ref().unwrap_or(&empty);
	normalize_events(&mut on, cx.env.settings().host_profile);

	let env = cx.env;
	let owner = vnode.context.as_ref();
	let host = RefCell::new(&mut *cx.host);
	let report = |result: HostResult<()>, info: &str| {
		if let Err(err) = result {
			env.report(PatchError::Host(err), owner, info);
		}
	};

	update_listeners(
		&mut on,
		old_on,
		|event, invoker| {
			let registration = ListenerRegistration {
				name: event.name.clone(),
				invoker: invoker.clone(),
				once: event.once,
				capture: event.capture,
				passive: event.passive,
			};
			let result = host.borrow_mut().add_event_listener(&target, registration);
			report(result, "event listener registration");
		},
		|event, invoker| {
			let result = host.borrow_mut().remove_event_listener(
				&target,
				&event.name,
				invoker,
				event.capture,
			);
			report(result, "event listener removal");
		},
		owner,
		env.reporter(),
	);

	if bound {
		vnode.data.on = Some(on);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::conf::PatchSettings;
	use crate::context::PatchEnv;
	use crate::testing::RecordingReporter;
	use core::cell::Cell;
	use reinhardt_vdom_core::testing::{HostCall, RecordingHost};
	use reinhardt_vdom_core::{HostEvent, HostNode, listener_handler};
	use rstest::{fixture, rstest};
	use std::rc::Rc;

	struct Harness {
		host: RecordingHost,
		env: PatchEnv,
		reporter: Rc<RecordingReporter>,
	}

	impl Harness {
		fn create(&mut self, vnode: &mut VNode) {
			let mut cx = PatchContext::new(&mut self.host, &self.env);
			EventsModule.create(&VNode::empty(), vnode, &mut cx);
		}

		fn update(&mut self, old: &VNode, vnode: &mut VNode) {
			let mut cx = PatchContext::new(&mut self.host, &self.env);
			EventsModule.update(old, vnode, &mut cx);
		}

		fn destroy(&mut self, vnode: &VNode) {
			let mut cx = PatchContext::new(&mut self.host, &self.env);
			EventsModule.destroy(vnode, &mut cx);
		}
	}

	#[fixture]
	fn harness() -> Harness {
		let reporter = Rc::new(RecordingReporter::new());
		Harness {
			host: RecordingHost::new(),
			env: PatchEnv::default().with_reporter(reporter.clone()),
			reporter,
		}
	}

	fn counter(hits: &Rc<Cell<u32>>) -> Option<Listener> {
		let hits = Rc::clone(hits);
		Some(Listener::from_fn(move |_| hits.set(hits.get() + 1)))
	}

	#[rstest]
	fn test_create_registers_with_modifiers(mut harness: Harness) {
		let el = harness.host.create_element("div");
		let hits = Rc::new(Cell::new(0));
		let mut vnode = VNode::element("div")
			.elm(el.clone())
			.on("&~!scroll", counter(&hits));
		harness.create(&mut vnode);

		assert_eq!(
			harness.host.calls(),
			&[HostCall::AddEventListener {
				node: el.id(),
				name: "scroll".into(),
				once: true,
				capture: true,
				passive: true,
			}]
		);
		harness.host.dispatch(&el, &HostEvent::new("scroll"));
		harness.host.dispatch(&el, &HostEvent::new("scroll"));
		assert_eq!(hits.get(), 1);
	}

	#[rstest]
	fn test_update_swaps_handler_without_host_calls(mut harness: Harness) {
		let el = harness.host.create_element("button");
		let first_hits = Rc::new(Cell::new(0));
		let second_hits = Rc::new(Cell::new(0));
		let mut old = VNode::element("button")
			.elm(el.clone())
			.on("click", counter(&first_hits));
		harness.create(&mut old);
		harness.host.take_calls();

		let mut vnode = VNode::element("button").on("click", counter(&second_hits));
		vnode.elm = Some(el.clone());
		harness.update(&old, &mut vnode);

		assert!(harness.host.calls().is_empty());
		harness.host.dispatch(&el, &HostEvent::new("click"));
		assert_eq!((first_hits.get(), second_hits.get()), (0, 1));
	}

	#[rstest]
	fn test_destroy_removes_everything(mut harness: Harness) {
		let el = harness.host.create_element("input");
		let mut vnode = VNode::element("input")
			.elm(el.clone())
			.on("input", Some(Listener::from_fn(|_| {})))
			.on("!focus", Some(Listener::from_fn(|_| {})));
		harness.create(&mut vnode);
		harness.host.take_calls();

		harness.destroy(&vnode);
		assert_eq!(
			harness.host.calls(),
			&[
				HostCall::RemoveEventListener {
					node: el.id(),
					name: "input".into(),
					capture: false,
				},
				HostCall::RemoveEventListener {
					node: el.id(),
					name: "focus".into(),
					capture: true,
				},
			]
		);
		assert_eq!(harness.host.listener_count(&el, "input"), 0);
	}

	#[rstest]
	#[case(HostProfile::Standard, "input")]
	#[case(HostProfile::LegacyIe, "change")]
	fn test_range_token_folded(#[case] profile: HostProfile, #[case] expected: &str) {
		let existing = listener_handler(|_| {});
		let model = listener_handler(|_| {});
		let mut on = ListenerMap::new();
		on.insert(expected.to_string(), Some(Listener::from(existing.clone())));
		on.insert(RANGE_TOKEN.to_string(), Some(Listener::from(model.clone())));

		normalize_events(&mut on, profile);

		assert!(!on.contains_key(RANGE_TOKEN));
		let handlers = on[expected].clone().unwrap().into_handlers();
		let ids: Vec<_> = handlers.iter().map(|h| h.id()).collect();
		assert_eq!(ids, vec![model.id(), existing.id()]);
	}

	#[rstest]
	fn test_checkbox_token_folded_into_change() {
		let model = listener_handler(|_| {});
		let mut on = ListenerMap::new();
		on.insert(CHECKBOX_RADIO_TOKEN.to_string(), Some(Listener::from(model.clone())));

		normalize_events(&mut on, HostProfile::Standard);

		let handlers = on["change"].clone().unwrap().into_handlers();
		assert_eq!(handlers.len(), 1);
		assert!(handlers[0].same(&model));
	}

	#[rstest]
	fn test_undefined_handler_warned(mut harness: Harness) {
		let el = harness.host.create_element("a");
		let mut vnode = VNode::element("a").elm(el.clone()).on("click", None);
		harness.create(&mut vnode);

		assert!(harness.host.calls().is_empty());
		assert_eq!(harness.reporter.warnings().len(), 1);
	}

	#[rstest]
	fn test_unknown_target_reported() {
		let reporter = Rc::new(RecordingReporter::new());
		let env = PatchEnv::new(PatchSettings::default()).with_reporter(reporter.clone());
		let mut host = RecordingHost::new();
		let mut vnode = VNode::element("div")
			.elm(HostNode::new("DIV"))
			.on("click", Some(Listener::from_fn(|_| {})));

		let mut cx = PatchContext::new(&mut host, &env);
		EventsModule.create(&VNode::empty(), &mut vnode, &mut cx);

		let reports = reporter.reports();
		assert_eq!(reports.len(), 1);
		assert_eq!(reports[0].info, "event listener registration");
	}
}
