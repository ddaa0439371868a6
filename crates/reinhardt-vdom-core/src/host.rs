//! Host capability set.
//!
//! The patch modules never touch a document directly. Every mutation goes
//! through [`HostOps`], which a browser binding, a test double, or any other
//! host tree implements.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

use crate::invoker::ListenerInvoker;

/// Unique identifier of a host node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostNodeId(u64);

impl HostNodeId {
	/// Allocates a fresh identifier.
	pub fn next() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(1);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for HostNodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Opaque handle to a host element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostNode {
	id: HostNodeId,
	tag: Arc<str>,
}

impl HostNode {
	/// Creates a handle with a freshly allocated id.
	pub fn new(tag: impl Into<Arc<str>>) -> Self {
		Self::with_id(HostNodeId::next(), tag)
	}

	pub fn with_id(id: HostNodeId, tag: impl Into<Arc<str>>) -> Self {
		Self {
			id,
			tag: tag.into(),
		}
	}

	pub fn id(&self) -> HostNodeId {
		self.id
	}

	/// Tag name as the host reports it (upper case for HTML elements).
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Returns true when the tag name matches `tag`, ignoring ASCII case.
	pub fn is_tag(&self, tag: &str) -> bool {
		self.tag.eq_ignore_ascii_case(tag)
	}
}

/// Errors raised by host mutations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
	/// The host refused an attribute name.
	#[error("invalid attribute name: {0}")]
	InvalidAttributeName(String),

	/// The node is not (or no longer) part of the host tree.
	#[error("unknown host node: {0}")]
	UnknownNode(HostNodeId),

	/// The host rejected the operation for another reason.
	#[error("{operation} rejected: {reason}")]
	Rejected { operation: String, reason: String },
}

/// Result type for host mutations.
pub type HostResult<T> = Result<T, HostError>;

/// An event listener registration.
#[derive(Debug, Clone)]
pub struct ListenerRegistration {
	/// Event name with modifier prefixes already stripped.
	pub name: Arc<str>,
	pub invoker: Rc<ListenerInvoker>,
	pub once: bool,
	pub capture: bool,
	pub passive: bool,
}

/// Mutations the patch modules may perform on the host tree.
pub trait HostOps {
	fn set_attribute(&mut self, el: &HostNode, name: &str, value: &str) -> HostResult<()>;

	fn remove_attribute(&mut self, el: &HostNode, name: &str) -> HostResult<()>;

	fn set_attribute_ns(
		&mut self,
		el: &HostNode,
		namespace: &str,
		name: &str,
		value: &str,
	) -> HostResult<()>;

	/// `local_name` is the attribute name without its prefix.
	fn remove_attribute_ns(
		&mut self,
		el: &HostNode,
		namespace: &str,
		local_name: &str,
	) -> HostResult<()>;

	fn add_event_listener(
		&mut self,
		el: &HostNode,
		registration: ListenerRegistration,
	) -> HostResult<()>;

	/// Removes the registration identified by `(name, invoker, capture)`.
	fn remove_event_listener(
		&mut self,
		el: &HostNode,
		name: &str,
		invoker: &Rc<ListenerInvoker>,
		capture: bool,
	) -> HostResult<()>;
}
