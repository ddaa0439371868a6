//! Object spread bindings.
//!
//! Merges an argument-less attribute or listener binding into a descriptor's
//! data before the modules see it. Explicit bindings always win over spread
//! ones.

use std::rc::Rc;

use reinhardt_vdom_core::{AttrMap, AttrValue, ComponentRef, Listener, ListenerMap, VNodeData};
use serde_json::{Map, Value};

use crate::error::{ErrorReporter, PatchError};
use crate::resolver::{camelize, hyphenate};

/// Keys a spread never writes as attributes.
pub const SKIPPED_KEYS: &[&str] = &["class", "style", "key", "ref", "slot", "slot-scope", "is"];

/// Merges an object (or an array of objects, left to right) into
/// `data.attrs`.
///
/// A key already bound under its camelCase or hyphenated spelling is left
/// alone. Falsy values are ignored; any other non-object value is warned
/// about and skipped.
pub fn bind_object_attrs(
	data: &mut VNodeData,
	value: &Value,
	owner: Option<&ComponentRef>,
	reporter: &dyn ErrorReporter,
) {
	if is_falsy(value) {
		return;
	}
	let Some(object) = to_object(value) else {
		reporter.warn(
			&PatchError::ShapeViolation(
				"spread binding expects an object or array value".to_string(),
			),
			owner,
		);
		return;
	};

	let attrs = Rc::make_mut(data.attrs.get_or_insert_with(|| Rc::new(AttrMap::new())));
	for (key, value) in &object {
		if SKIPPED_KEYS.contains(&key.as_str()) {
			continue;
		}
		if attrs.contains(&camelize(key)) || attrs.contains(&hyphenate(key)) {
			continue;
		}
		attrs.insert(key.as_str(), AttrValue::from_json(value));
	}
}

fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()),
		Value::String(s) => s.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

fn to_object(value: &Value) -> Option<Map<String, Value>> {
	match value {
		Value::Object(map) => Some(map.clone()),
		Value::Array(items) => {
			let mut merged = Map::new();
			for item in items {
				if let Value::Object(map) = item {
					merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
				}
			}
			Some(merged)
		}
		_ => None,
	}
}

/// Merges `listeners` into `data.on`. Handlers already bound to an event run
/// before the spread ones.
pub fn bind_object_listeners(data: &mut VNodeData, listeners: ListenerMap) {
	let on = data.on.get_or_insert_with(ListenerMap::new);
	for (name, ours) in listeners {
		let existing = on.get_mut(&name).and_then(Option::take);
		on.insert(name, Listener::concat(existing, ours));
	}
}
