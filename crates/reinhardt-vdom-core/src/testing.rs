//! In-memory host for tests.
//!
//! [`RecordingHost`] implements [`HostOps`] over plain maps, records every
//! call it receives, and can dispatch events to the invokers registered on a
//! node.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::event::HostEvent;
use crate::host::{HostError, HostNode, HostNodeId, HostOps, HostResult, ListenerRegistration};
use crate::invoker::ListenerInvoker;

/// A host call as observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
	SetAttribute {
		node: HostNodeId,
		name: String,
		value: String,
	},
	RemoveAttribute {
		node: HostNodeId,
		name: String,
	},
	SetAttributeNs {
		node: HostNodeId,
		namespace: String,
		name: String,
		value: String,
	},
	RemoveAttributeNs {
		node: HostNodeId,
		namespace: String,
		local_name: String,
	},
	AddEventListener {
		node: HostNodeId,
		name: String,
		once: bool,
		capture: bool,
		passive: bool,
	},
	RemoveEventListener {
		node: HostNodeId,
		name: String,
		capture: bool,
	},
}

impl HostCall {
	/// Returns the event name for listener calls.
	pub fn event_name(&self) -> Option<&str> {
		match self {
			HostCall::AddEventListener { name, .. } | HostCall::RemoveEventListener { name, .. } => {
				Some(name)
			}
			_ => None,
		}
	}

	/// Returns true for listener add/remove calls.
	pub fn is_listener_call(&self) -> bool {
		self.event_name().is_some()
	}
}

/// Recording in-memory host.
///
/// # Examples
///
/// ```
/// use reinhardt_vdom_core::host::HostOps;
/// use reinhardt_vdom_core::testing::RecordingHost;
///
/// let mut host = RecordingHost::new();
/// let el = host.create_element("div");
/// host.set_attribute(&el, "id", "app").unwrap();
///
/// assert_eq!(host.attribute(&el, "id"), Some("app"));
/// assert_eq!(host.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingHost {
	nodes: HashSet<HostNodeId>,
	attributes: HashMap<HostNodeId, IndexMap<String, String>>,
	listeners: HashMap<HostNodeId, Vec<ListenerRegistration>>,
	calls: Vec<HostCall>,
	rejected: HashSet<String>,
}

impl RecordingHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a host element. The tag is stored upper-cased, the way HTML
	/// hosts report element tag names.
	pub fn create_element(&mut self, tag: &str) -> HostNode {
		let node = HostNode::new(tag.to_ascii_uppercase());
		self.nodes.insert(node.id());
		node
	}

	/// Makes every later attribute write using `name` fail.
	pub fn reject_attribute(&mut self, name: impl Into<String>) {
		self.rejected.insert(name.into());
	}

	/// Every call received so far, in order.
	pub fn calls(&self) -> &[HostCall] {
		&self.calls
	}

	/// Drains the call log.
	pub fn take_calls(&mut self) -> Vec<HostCall> {
		std::mem::take(&mut self.calls)
	}

	/// Returns the current value of an attribute.
	pub fn attribute(&self, el: &HostNode, name: &str) -> Option<&str> {
		self.attributes
			.get(&el.id())
			.and_then(|attrs| attrs.get(name))
			.map(String::as_str)
	}

	/// Returns every attribute of a node in write order.
	pub fn attributes(&self, el: &HostNode) -> Vec<(String, String)> {
		self.attributes
			.get(&el.id())
			.map(|attrs| attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
			.unwrap_or_default()
	}

	/// Number of registrations for `name` on a node.
	pub fn listener_count(&self, el: &HostNode, name: &str) -> usize {
		self.listeners
			.get(&el.id())
			.map_or(0, |regs| regs.iter().filter(|r| &*r.name == name).count())
	}

	/// Returns the invoker registered for `name`, if exactly one is.
	pub fn listener(&self, el: &HostNode, name: &str) -> Option<Rc<ListenerInvoker>> {
		let regs = self.listeners.get(&el.id())?;
		let mut matching = regs.iter().filter(|r| &*r.name == name);
		let first = matching.next()?;
		matching
			.next()
			.is_none()
			.then(|| Rc::clone(&first.invoker))
	}

	/// Dispatches `event` to the listeners registered for its type on `el`.
	///
	/// Registrations made with `once` are dropped after delivery. Returns the
	/// number of invokers called.
	pub fn dispatch(&mut self, el: &HostNode, event: &HostEvent) -> usize {
		let Some(regs) = self.listeners.get_mut(&el.id()) else {
			return 0;
		};
		let targets: Vec<ListenerRegistration> = regs
			.iter()
			.filter(|r| *r.name == *event.event_type)
			.cloned()
			.collect();
		regs.retain(|r| !(r.once && *r.name == *event.event_type));

		for reg in &targets {
			reg.invoker.call(event);
		}
		targets.len()
	}

	fn check(&self, el: &HostNode) -> HostResult<()> {
		if self.nodes.contains(&el.id()) {
			Ok(())
		} else {
			Err(HostError::UnknownNode(el.id()))
		}
	}

	fn check_name(&self, name: &str) -> HostResult<()> {
		if name.is_empty() || self.rejected.contains(name) {
			Err(HostError::InvalidAttributeName(name.to_string()))
		} else {
			Ok(())
		}
	}
}

impl HostOps for RecordingHost {
	fn set_attribute(&mut self, el: &HostNode, name: &str, value: &str) -> HostResult<()> {
		self.calls.push(HostCall::SetAttribute {
			node: el.id(),
			name: name.to_string(),
			value: value.to_string(),
		});
		self.check(el)?;
		self.check_name(name)?;
		self.attributes
			.entry(el.id())
			.or_default()
			.insert(name.to_string(), value.to_string());
		Ok(())
	}

	fn remove_attribute(&mut self, el: &HostNode, name: &str) -> HostResult<()> {
		self.calls.push(HostCall::RemoveAttribute {
			node: el.id(),
			name: name.to_string(),
		});
		self.check(el)?;
		if let Some(attrs) = self.attributes.get_mut(&el.id()) {
			attrs.shift_remove(name);
		}
		Ok(())
	}

	fn set_attribute_ns(
		&mut self,
		el: &HostNode,
		namespace: &str,
		name: &str,
		value: &str,
	) -> HostResult<()> {
		self.calls.push(HostCall::SetAttributeNs {
			node: el.id(),
			namespace: namespace.to_string(),
			name: name.to_string(),
			value: value.to_string(),
		});
		self.check(el)?;
		self.check_name(name)?;
		self.attributes
			.entry(el.id())
			.or_default()
			.insert(name.to_string(), value.to_string());
		Ok(())
	}

	fn remove_attribute_ns(
		&mut self,
		el: &HostNode,
		namespace: &str,
		local_name: &str,
	) -> HostResult<()> {
		self.calls.push(HostCall::RemoveAttributeNs {
			node: el.id(),
			namespace: namespace.to_string(),
			local_name: local_name.to_string(),
		});
		self.check(el)?;
		if let Some(attrs) = self.attributes.get_mut(&el.id()) {
			attrs.retain(|name, _| {
				let local = name.split_once(':').map_or(name.as_str(), |(_, l)| l);
				local != local_name
			});
		}
		Ok(())
	}

	fn add_event_listener(
		&mut self,
		el: &HostNode,
		registration: ListenerRegistration,
	) -> HostResult<()> {
		self.calls.push(HostCall::AddEventListener {
			node: el.id(),
			name: registration.name.to_string(),
			once: registration.once,
			capture: registration.capture,
			passive: registration.passive,
		});
		self.check(el)?;
		self.listeners.entry(el.id()).or_default().push(registration);
		Ok(())
	}

	fn remove_event_listener(
		&mut self,
		el: &HostNode,
		name: &str,
		invoker: &Rc<ListenerInvoker>,
		capture: bool,
	) -> HostResult<()> {
		self.calls.push(HostCall::RemoveEventListener {
			node: el.id(),
			name: name.to_string(),
			capture,
		});
		self.check(el)?;
		if let Some(regs) = self.listeners.get_mut(&el.id()) {
			regs.retain(|r| {
				!(&*r.name == name && r.capture == capture && Rc::ptr_eq(&r.invoker, invoker))
			});
		}
		Ok(())
	}
}
