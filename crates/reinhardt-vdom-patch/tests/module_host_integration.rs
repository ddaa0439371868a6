//! End-to-end tests for the patch modules driven through `ModuleHost`.
//!
//! Every test drives a full create/update/destroy sequence against a
//! `RecordingHost` and inspects the host calls and user callbacks it
//! produced.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;
use reinhardt_vdom_core::prelude::*;
use reinhardt_vdom_core::testing::{HostCall, RecordingHost};
use reinhardt_vdom_patch::prelude::*;
use reinhardt_vdom_patch::spread::{bind_object_attrs, bind_object_listeners};
use reinhardt_vdom_patch::testing::RecordingReporter;
use rstest::{fixture, rstest};
use serde_json::json;

type Log = Rc<RefCell<Vec<String>>>;

struct Env {
	driver: ModuleHost,
	host: RecordingHost,
	reporter: Rc<RecordingReporter>,
}

fn env_with(settings: PatchSettings, registry: DirectiveRegistry) -> Env {
	let reporter = Rc::new(RecordingReporter::new());
	let env = PatchEnv::new(settings)
		.with_reporter(reporter.clone())
		.with_resolver(Rc::new(registry));
	Env {
		driver: ModuleHost::with_default_modules(env),
		host: RecordingHost::new(),
		reporter,
	}
}

#[fixture]
fn env() -> Env {
	env_with(PatchSettings::default(), DirectiveRegistry::new())
}

fn recorder(
	log: &Log,
	name: &'static str,
	hook: &'static str,
) -> impl Fn(&DirectiveHookArgs<'_>) -> anyhow::Result<()> + 'static {
	let log = Rc::clone(log);
	move |args: &DirectiveHookArgs<'_>| {
		let value = args.binding.value.clone().unwrap_or_default();
		let old = args.binding.old_value.clone().unwrap_or_default();
		let suffix = if args.is_destroy { ":destroy" } else { "" };
		log.borrow_mut().push(format!("{name}.{hook}({value},{old}){suffix}"));
		Ok(())
	}
}

fn recording_def(log: &Log, name: &'static str) -> DirectiveDef {
	DirectiveDef::new()
		.bind(recorder(log, name, "bind"))
		.inserted(recorder(log, name, "inserted"))
		.update(recorder(log, name, "update"))
		.component_updated(recorder(log, name, "componentUpdated"))
		.unbind(recorder(log, name, "unbind"))
}

// =============================================================================
// Attributes
// =============================================================================

/// Boolean attributes are removed when falsy and set to their own name when
/// truthy.
///
/// **Category**: Integration
/// **Verifies**: `disabled` false then true yields remove, then set to "disabled"
#[rstest]
fn boolean_attribute_toggle(mut env: Env) {
	let el = env.host.create_element("button");
	let mut first = VNode::element("button")
		.elm(el.clone())
		.attrs(AttrMap::new().with("disabled", false));
	env.driver.create(&mut first, &mut env.host);

	let mut second = VNode::element("button").attrs(AttrMap::new().with("disabled", true));
	env.driver.update(&first, &mut second, &mut env.host);

	assert_eq!(
		env.host.calls(),
		&[
			HostCall::RemoveAttribute {
				node: el.id(),
				name: "disabled".into(),
			},
			HostCall::SetAttribute {
				node: el.id(),
				name: "disabled".into(),
				value: "disabled".into(),
			},
		]
	);
	assert_eq!(env.host.attribute(&el, "disabled"), Some("disabled"));
}

/// The legacy value resync writes a changed `value` a second time.
///
/// **Category**: Integration
/// **Verifies**: `host-profile = "legacy-edge"` loaded from TOML doubles the write
#[rstest]
fn legacy_profile_resyncs_value() {
	let settings = PatchSettings::from_toml_str("host-profile = \"legacy-edge\"").unwrap();
	let mut env = env_with(settings, DirectiveRegistry::new());
	let el = env.host.create_element("input");
	let mut vnode = VNode::element("input")
		.elm(el.clone())
		.attrs(AttrMap::new().with("value", "a"));

	env.driver.create(&mut vnode, &mut env.host);

	let writes = env
		.host
		.calls()
		.iter()
		.filter(|c| matches!(c, HostCall::SetAttribute { name, .. } if name == "value"))
		.count();
	assert_eq!(writes, 2);
}

/// Attributes on a component that opts out of inheritance never reach the
/// host node.
///
/// **Category**: Integration
/// **Verifies**: `inherit_attrs = false` suppresses the attribute diff
#[rstest]
fn inherit_attrs_disabled(mut env: Env) {
	let el = env.host.create_element("div");
	let mut vnode = VNode::element("div")
		.elm(el)
		.component_options(ComponentOptions { inherit_attrs: false })
		.attrs(AttrMap::new().with("id", "x"));

	env.driver.create(&mut vnode, &mut env.host);
	assert!(env.host.calls().is_empty());
}

/// Spread attributes never override explicit ones.
///
/// **Category**: Integration
/// **Verifies**: spread merge followed by create writes the explicit value
#[rstest]
fn spread_attrs_then_create(mut env: Env) {
	let el = env.host.create_element("a");
	let mut vnode = VNode::element("a")
		.elm(el.clone())
		.attrs(AttrMap::new().with("title", "explicit"));
	bind_object_attrs(
		&mut vnode.data,
		&json!({"title": "spread", "href": "/home"}),
		None,
		env.driver.env().reporter(),
	);

	env.driver.create(&mut vnode, &mut env.host);

	assert_eq!(env.host.attribute(&el, "title"), Some("explicit"));
	assert_eq!(env.host.attribute(&el, "href"), Some("/home"));
}

// =============================================================================
// Listeners
// =============================================================================

/// Rebinding an event to a different callback keeps the host registration.
///
/// **Category**: Integration
/// **Verifies**: no add/remove calls for a rebound event, new callback runs
#[rstest]
fn listener_identity_preserved(mut env: Env) {
	let el = env.host.create_element("button");
	let old_hits = Rc::new(Cell::new(0));
	let new_hits = Rc::new(Cell::new(0));

	let seen = Rc::clone(&old_hits);
	let mut first = VNode::element("button")
		.elm(el.clone())
		.on("click", Some(Listener::from_fn(move |_| seen.set(seen.get() + 1))));
	env.driver.create(&mut first, &mut env.host);
	let registered = env.host.listener(&el, "click").unwrap();
	env.host.take_calls();

	let seen = Rc::clone(&new_hits);
	let mut second = VNode::element("button")
		.on("click", Some(Listener::from_fn(move |_| seen.set(seen.get() + 1))));
	env.driver.update(&first, &mut second, &mut env.host);

	assert!(env.host.calls().iter().all(|c| !c.is_listener_call()));
	assert!(Rc::ptr_eq(&registered, &env.host.listener(&el, "click").unwrap()));
	env.host.dispatch(&el, &HostEvent::new("click"));
	assert_eq!((old_hits.get(), new_hits.get()), (0, 1));
}

/// Listener diff across a full update.
///
/// **Category**: Integration
/// **Verifies**: only the dropped event is removed and only the new one added
#[rstest]
fn listener_diff_completeness(mut env: Env) {
	let el = env.host.create_element("input");
	let f1 = listener_handler(|_| {});
	let mut first = VNode::element("input")
		.elm(el.clone())
		.on("click", Some(Listener::from(f1.clone())))
		.on("keyup", Some(Listener::from_fn(|_| {})));
	env.driver.create(&mut first, &mut env.host);
	env.host.take_calls();

	let mut second = VNode::element("input")
		.on("click", Some(Listener::from(f1)))
		.on("mousedown", Some(Listener::from_fn(|_| {})));
	env.driver.update(&first, &mut second, &mut env.host);

	let names: Vec<_> = env
		.host
		.calls()
		.iter()
		.map(|c| match c {
			HostCall::AddEventListener { name, .. } => format!("add:{name}"),
			HostCall::RemoveEventListener { name, .. } => format!("remove:{name}"),
			other => format!("{other:?}"),
		})
		.collect();
	assert_eq!(names, vec!["add:mousedown", "remove:keyup"]);
}

/// Spread listeners run after handlers bound explicitly.
///
/// **Category**: Integration
/// **Verifies**: one registration, both callbacks, explicit first
#[rstest]
fn spread_listeners_run_after_explicit(mut env: Env) {
	let el = env.host.create_element("div");
	let log = Log::default();
	let explicit = Rc::clone(&log);
	let spread = Rc::clone(&log);
	let mut vnode = VNode::element("div").elm(el.clone()).on(
		"click",
		Some(Listener::from_fn(move |_| explicit.borrow_mut().push("explicit".into()))),
	);
	let mut listeners = ListenerMap::new();
	listeners.insert(
		"click".to_string(),
		Some(Listener::from_fn(move |_| spread.borrow_mut().push("spread".into()))),
	);
	bind_object_listeners(&mut vnode.data, listeners);

	env.driver.create(&mut vnode, &mut env.host);
	env.host.dispatch(&el, &HostEvent::new("click"));

	assert_eq!(env.host.listener_count(&el, "click"), 1);
	assert_eq!(*log.borrow(), vec!["explicit", "spread"]);
}

/// Destroying a node removes every listener registered for it.
///
/// **Category**: Integration
/// **Verifies**: destroy leaves no registrations behind
#[rstest]
fn destroy_unregisters_listeners(mut env: Env) {
	let el = env.host.create_element("div");
	let mut vnode = VNode::element("div")
		.elm(el.clone())
		.on("click", Some(Listener::from_fn(|_| {})))
		.on("~!focus", Some(Listener::from_fn(|_| {})));
	env.driver.create(&mut vnode, &mut env.host);

	env.driver.destroy(&vnode, &mut env.host);

	assert_eq!(env.host.listener_count(&el, "click"), 0);
	assert_eq!(env.host.listener_count(&el, "focus"), 0);
}

// =============================================================================
// Directives
// =============================================================================

/// A directive's full lifecycle across create, update and destroy.
///
/// **Category**: Integration
/// **Verifies**: bind before inserted, inserted after attach, update before
/// componentUpdated, componentUpdated only at postpatch, unbind on destroy
#[rstest]
fn directive_lifecycle_ordering() {
	let log = Log::default();
	let mut env = env_with(
		PatchSettings::default(),
		DirectiveRegistry::new().with("tip", recording_def(&log, "tip")),
	);
	let el = env.host.create_element("span");

	let mut first = VNode::element("span")
		.elm(el)
		.directive(DirectiveBinding::new("tip").value(json!(1)));
	let pending_insert = env.driver.create(&mut first, &mut env.host);
	assert!(pending_insert);
	assert_eq!(*log.borrow(), vec!["tip.bind(1,null)"]);
	env.driver.insert(&first);
	env.driver.insert(&first);

	let mut second = VNode::element("span").directive(DirectiveBinding::new("tip").value(json!(2)));
	env.driver.update(&first, &mut second, &mut env.host);
	assert_eq!(log.borrow().last().map(String::as_str), Some("tip.update(2,1)"));
	env.driver.postpatch(&first, &second);

	env.driver.destroy(&second, &mut env.host);

	assert_eq!(
		*log.borrow(),
		vec![
			"tip.bind(1,null)",
			"tip.inserted(1,null)",
			"tip.update(2,1)",
			"tip.componentUpdated(2,1)",
			"tip.unbind(2,null):destroy",
		]
	);
}

/// Bindings that differ only in modifiers are independent.
///
/// **Category**: Integration
/// **Verifies**: swapping modifiers unbinds one key and binds the other
#[rstest]
fn directive_keying_by_modifiers() {
	let log = Log::default();
	let mut env = env_with(
		PatchSettings::default(),
		DirectiveRegistry::new().with("model", recording_def(&log, "model")),
	);
	let el = env.host.create_element("input");
	let mut first = VNode::element("input")
		.elm(el)
		.directive(DirectiveBinding::new("model").modifier("lazy"));
	env.driver.create(&mut first, &mut env.host);
	log.borrow_mut().clear();

	let mut second = VNode::element("input").directive(DirectiveBinding::new("model").modifier("trim"));
	env.driver.update(&first, &mut second, &mut env.host);

	assert_eq!(
		*log.borrow(),
		vec!["model.bind(null,null)", "model.inserted(null,null)", "model.unbind(null,null)"]
	);
}

/// A failing callback neither blocks sibling directives nor escapes the pass.
///
/// **Category**: Integration
/// **Verifies**: sibling bind runs, the failure reaches the reporter with context
#[rstest]
fn directive_failure_isolation() {
	let log = Log::default();
	let registry = DirectiveRegistry::new()
		.with(
			"explode",
			DirectiveDef::new().bind(|_| Err(anyhow::anyhow!("boom"))),
		)
		.with("tip", recording_def(&log, "tip"));
	let mut env = env_with(PatchSettings::default(), registry);
	let el = env.host.create_element("div");
	let mut vnode = VNode::element("div")
		.elm(el.clone())
		.attrs(AttrMap::new().with("id", "root"))
		.directive(DirectiveBinding::new("explode"))
		.directive(DirectiveBinding::new("tip"));

	env.driver.create(&mut vnode, &mut env.host);

	assert_eq!(*log.borrow(), vec!["tip.bind(null,null)"]);
	assert_eq!(env.host.attribute(&el, "id"), Some("root"));
	let reports = env.reporter.reports();
	assert_eq!(reports.len(), 1);
	assert_eq!(reports[0].info, "directive explode bind hook");
	assert!(reports[0].message.contains("boom"));
}

/// An ancestor's `error_captured` hook can swallow a directive failure.
///
/// **Category**: Integration
/// **Verifies**: returning false from the hook keeps the reporter silent
#[rstest]
fn error_captured_stops_propagation() {
	let captured = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&captured);
	let parent = ComponentContext::named("App")
		.on_error_captured(move |err, info| {
			sink.borrow_mut().push(format!("{info}: {err}"));
			false
		})
		.into_ref();
	let owner = ComponentContext::named("Child")
		.parent(parent)
		.directive("explode", DirectiveDef::new().bind(|_| Err(anyhow::anyhow!("boom"))))
		.into_ref();

	let mut env = env_with(PatchSettings::default(), DirectiveRegistry::new());
	let el = env.host.create_element("div");
	let mut vnode = VNode::element("div")
		.elm(el)
		.context(owner)
		.directive(DirectiveBinding::new("explode"));
	env.driver.create(&mut vnode, &mut env.host);

	assert!(env.reporter.reports().is_empty());
	assert_eq!(
		*captured.borrow(),
		vec!["directive explode bind hook: directive explode bind hook failed: boom"]
	);
}

// =============================================================================
// Properties
// =============================================================================

fn attr_map() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
	prop::collection::btree_map(
		prop::sample::select(vec!["id", "title", "role", "data-x", "aria-label"]).prop_map(String::from),
		prop::option::of("[a-z]{0,5}"),
		0..5,
	)
}

fn defined(map: &BTreeMap<String, Option<String>>) -> BTreeMap<String, String> {
	map.iter()
		.filter_map(|(k, v)| v.clone().map(|v| (k.clone(), v)))
		.collect()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	/// Host attributes converge to the new map after any update
	///
	/// **Category**: Property
	/// **Verifies**: create(old) then update(old, new) leaves exactly the defined new attributes
	#[test]
	fn prop_attrs_converge(old in attr_map(), new in attr_map()) {
		let mut env = env_with(PatchSettings::default(), DirectiveRegistry::new());
		let el = env.host.create_element("div");

		let mut first = VNode::element("div")
			.elm(el.clone())
			.attrs(old.clone().into_iter().collect());
		env.driver.create(&mut first, &mut env.host);
		prop_assert_eq!(
			env.host.attributes(&el).into_iter().collect::<BTreeMap<_, _>>(),
			defined(&old)
		);

		let mut second = VNode::element("div").attrs(new.clone().into_iter().collect());
		env.driver.update(&first, &mut second, &mut env.host);
		prop_assert_eq!(
			env.host.attributes(&el).into_iter().collect::<BTreeMap<_, _>>(),
			defined(&new)
		);
	}
}
