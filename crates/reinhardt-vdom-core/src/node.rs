//! Node descriptors.

use std::rc::Rc;

use crate::component::{ComponentOptions, ComponentRef};
use crate::directive::DirectiveBinding;
use crate::event::{Listener, ListenerMap};
use crate::hook::{HookSlot, HookTable, HookValue};
use crate::host::HostNode;
use crate::value::AttrMap;

/// The parts of a descriptor the patch modules read and write.
#[derive(Debug, Clone, Default)]
pub struct VNodeData {
	pub attrs: Option<Rc<AttrMap>>,
	pub on: Option<ListenerMap>,
	pub directives: Option<Vec<DirectiveBinding>>,
	pub hook: Option<HookTable>,
	/// Inside a raw block whose attributes are written verbatim.
	pub pre: bool,
}

impl VNodeData {
	/// Returns true when nothing is set.
	pub fn is_empty(&self) -> bool {
		self.attrs.is_none()
			&& self.on.is_none()
			&& self.directives.is_none()
			&& self.hook.is_none()
			&& !self.pre
	}
}

/// Immutable-per-version description of one tree position.
///
/// Only `elm` and the hook table are written after construction: `elm` by
/// the driver once a host node exists, the hook table by modules that merge
/// lifecycle callbacks into it.
#[derive(Debug, Clone, Default)]
pub struct VNode {
	pub tag: Option<String>,
	pub key: Option<String>,
	pub data: VNodeData,
	/// Host node this descriptor is bound to.
	pub elm: Option<HostNode>,
	/// Owning component.
	pub context: Option<ComponentRef>,
	/// Options of the component this placeholder instantiates.
	pub component_options: Option<Rc<ComponentOptions>>,
}

impl VNode {
	/// The "nothing" descriptor used as the old side of a create and the new
	/// side of a destroy.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Creates an element descriptor.
	pub fn element(tag: impl Into<String>) -> Self {
		Self {
			tag: Some(tag.into()),
			..Self::default()
		}
	}

	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	pub fn attrs(mut self, attrs: AttrMap) -> Self {
		self.data.attrs = Some(Rc::new(attrs));
		self
	}

	/// Shares an attribute map with other descriptors.
	pub fn shared_attrs(mut self, attrs: Rc<AttrMap>) -> Self {
		self.data.attrs = Some(attrs);
		self
	}

	/// Binds a listener under `name`. `None` models an undefined handler.
	pub fn on(mut self, name: impl Into<String>, listener: Option<Listener>) -> Self {
		self.data
			.on
			.get_or_insert_with(ListenerMap::new)
			.insert(name.into(), listener);
		self
	}

	pub fn directive(mut self, binding: DirectiveBinding) -> Self {
		self.data
			.directives
			.get_or_insert_with(Vec::new)
			.push(binding);
		self
	}

	pub fn hook(mut self, slot: HookSlot, value: HookValue) -> Self {
		self.data
			.hook
			.get_or_insert_with(HookTable::new)
			.insert(slot, value);
		self
	}

	pub fn pre(mut self, pre: bool) -> Self {
		self.data.pre = pre;
		self
	}

	pub fn elm(mut self, elm: HostNode) -> Self {
		self.elm = Some(elm);
		self
	}

	pub fn context(mut self, context: ComponentRef) -> Self {
		self.context = Some(context);
		self
	}

	pub fn component_options(mut self, options: ComponentOptions) -> Self {
		self.component_options = Some(Rc::new(options));
		self
	}

	/// Returns the value stored in `slot`.
	pub fn hook_value(&self, slot: HookSlot) -> Option<&HookValue> {
		self.data.hook.as_ref()?.get(&slot)
	}

	/// Fires `slot` with `(old, self)` when it is set.
	pub fn call_hook(&self, slot: HookSlot, old: &VNode) -> bool {
		match self.hook_value(slot) {
			Some(hook) => {
				hook.call(old, self);
				true
			}
			None => false,
		}
	}

	/// Returns the host tag, if this descriptor is bound to a host node.
	pub fn host_tag(&self) -> Option<&str> {
		self.elm.as_ref().map(|el| el.tag())
	}
}
