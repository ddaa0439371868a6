//! Host attribute module.
//!
//! Diffs `data.attrs` of a node pair and writes the difference to the host
//! node. Attribute names fall into four categories with their own write
//! rules:
//!
//! | Category   | Falsy value             | Truthy value                      |
//! |------------|-------------------------|-----------------------------------|
//! | boolean    | removed                 | set to its own name               |
//! | enumerated | set to `"false"`        | set to `"true"` (or a legal value)|
//! | xlink      | removed (namespaced)    | set (namespaced)                  |
//! | general    | removed                 | set to the value's text           |
//!
//! Nodes inside a raw block and custom elements skip categorisation and
//! always use the general rule.

use std::rc::Rc;

use reinhardt_vdom_core::{AttrMap, AttrValue, ComponentRef, HostNode, HostResult, VNode};

use super::PatchModule;
use crate::context::PatchContext;
use crate::error::PatchError;

/// Namespace of `xlink:*` attributes.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Attributes whose presence alone means true.
pub const BOOLEAN_ATTRS: &[&str] = &[
	"allowfullscreen",
	"async",
	"autofocus",
	"autoplay",
	"checked",
	"compact",
	"controls",
	"declare",
	"default",
	"defaultchecked",
	"defaultmuted",
	"defaultselected",
	"defer",
	"disabled",
	"enabled",
	"formnovalidate",
	"hidden",
	"indeterminate",
	"inert",
	"ismap",
	"itemscope",
	"loop",
	"multiple",
	"muted",
	"nohref",
	"noresize",
	"noshade",
	"novalidate",
	"nowrap",
	"open",
	"pauseonexit",
	"readonly",
	"required",
	"reversed",
	"scoped",
	"seamless",
	"selected",
	"sortable",
	"truespeed",
	"typemustmatch",
	"visible",
];

/// Attributes with exactly two states spelled `"true"` and `"false"`.
pub const ENUMERATED_ATTRS: &[&str] = &["contenteditable", "draggable", "spellcheck"];

const CONTENTEDITABLE_VALUES: &[&str] = &["events", "caret", "typing", "plaintext-only"];

pub fn is_boolean_attr(name: &str) -> bool {
	BOOLEAN_ATTRS.contains(&name)
}

pub fn is_enumerated_attr(name: &str) -> bool {
	ENUMERATED_ATTRS.contains(&name)
}

/// Returns true for `xlink:`-prefixed names.
pub fn is_xlink(name: &str) -> bool {
	name.starts_with("xlink:")
}

/// Local part of an `xlink:` name; empty for other names.
pub fn xlink_local_name(name: &str) -> &str {
	name.strip_prefix("xlink:").unwrap_or("")
}

/// Coerces a value of an enumerated attribute to a legal state.
pub fn convert_enumerated_value(name: &str, value: &AttrValue) -> String {
	if value.is_falsy() || matches!(value, AttrValue::Text(s) if &**s == "false") {
		return "false".to_string();
	}
	if name == "contenteditable"
		&& let AttrValue::Text(s) = value
		&& CONTENTEDITABLE_VALUES.contains(&&**s)
	{
		return s.to_string();
	}
	"true".to_string()
}

/// Diffs `data.attrs` and writes the difference to the host node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrsModule;

impl PatchModule for AttrsModule {
	fn name(&self) -> &'static str {
		"attrs"
	}

	fn create(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_attrs(old, vnode, cx);
	}

	fn update(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_attrs(old, vnode, cx);
	}
}

fn update_attrs(old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
	if vnode
		.component_options
		.as_ref()
		.is_some_and(|opts| !opts.inherit_attrs)
	{
		return;
	}
	if old.data.attrs.is_none() && vnode.data.attrs.is_none() {
		return;
	}
	let Some(el) = vnode.elm.clone() else {
		return;
	};

	let detached = vnode
		.data
		.attrs
		.as_ref()
		.filter(|attrs| attrs.is_observed())
		.map(|attrs| Rc::new(attrs.detached()));
	if detached.is_some() {
		vnode.data.attrs = detached;
	}

	let empty = AttrMap::new();
	let attrs = vnode.data.attrs.as_deref().unwrap_or(&empty);
	let old_attrs = old.data.attrs.as_deref().unwrap_or(&empty);
	let mut writer = AttrWriter {
		cx,
		el: &el,
		pre: vnode.data.pre,
		owner: vnode.context.as_ref(),
	};

	for (name, cur) in attrs.iter() {
		if old_attrs.get(name) != Some(cur) {
			writer.set(name, cur);
		}
	}

	let value = attrs.get("value");
	if writer.cx.env.settings().host_profile.forces_value_resync()
		&& value != old_attrs.get("value")
	{
		writer.set("value", value.unwrap_or(&AttrValue::Null));
	}

	for (name, _) in old_attrs.iter() {
		if attrs.is_defined(name) {
			continue;
		}
		if is_xlink(name) {
			let result = writer.cx.host.remove_attribute_ns(&el, XLINK_NS, xlink_local_name(name));
			writer.check(result);
		} else if !is_enumerated_attr(name) {
			let result = writer.cx.host.remove_attribute(&el, name);
			writer.check(result);
		}
	}
}

struct AttrWriter<'a, 'b, 'c> {
	cx: &'a mut PatchContext<'b>,
	el: &'c HostNode,
	pre: bool,
	owner: Option<&'c ComponentRef>,
}

impl AttrWriter<'_, '_, '_> {
	fn set(&mut self, name: &str, value: &AttrValue) {
		tracing::trace!(attr = name, node = %self.el.id(), "set attribute");
		let result = if self.pre || self.el.tag().contains('-') {
			self.base_set(name, value)
		} else if is_boolean_attr(name) {
			if value.is_falsy() {
				self.cx.host.remove_attribute(self.el, name)
			} else {
				let text = if name == "allowfullscreen" && self.el.is_tag("embed") {
					"true"
				} else {
					name
				};
				self.cx.host.set_attribute(self.el, name, text)
			}
		} else if is_enumerated_attr(name) {
			let text = convert_enumerated_value(name, value);
			self.cx.host.set_attribute(self.el, name, &text)
		} else if is_xlink(name) {
			if value.is_falsy() {
				self.cx
					.host
					.remove_attribute_ns(self.el, XLINK_NS, xlink_local_name(name))
			} else {
				self.cx
					.host
					.set_attribute_ns(self.el, XLINK_NS, name, &value.to_attr_string())
			}
		} else {
			self.base_set(name, value)
		};
		self.check(result);
	}

	fn base_set(&mut self, name: &str, value: &AttrValue) -> HostResult<()> {
		if value.is_falsy() {
			self.cx.host.remove_attribute(self.el, name)
		} else {
			self.cx.host.set_attribute(self.el, name, &value.to_attr_string())
		}
	}

	fn check(&self, result: HostResult<()>) {
		if let Err(err) = result {
			self.cx
				.env
				.report(PatchError::Host(err), self.owner, "attribute update");
		}
	}
}
