//! Core data model for the reinhardt-vdom patcher.
//!
//! This crate holds the values that flow through a patch pass and the
//! capability the pass mutates the host tree through. It contains no diffing
//! logic; that lives in `reinhardt-vdom-patch`.
//!
//! # Contents
//!
//! - **Node descriptors**: [`VNode`] and [`VNodeData`] (attributes, listeners,
//!   directive bindings, lifecycle hooks)
//! - **Invokers**: [`Invoker`], an identity-stable wrapper around a replaceable
//!   callback set, and the [`Handler`] identity handles it stores
//! - **Host capabilities**: the [`HostOps`] trait and [`HostNode`] handles
//! - **Testing**: [`testing::RecordingHost`], an in-memory host that records
//!   every call
//!
//! # Threading
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Callbacks carry no
//! `Send` or `Sync` bounds.
//!
//! ```
//! use reinhardt_vdom_core::prelude::*;
//!
//! let node = VNode::element("input")
//! 	.attrs(AttrMap::new().with("disabled", true))
//! 	.on("click", Some(Listener::from_fn(|_| {})));
//!
//! assert!(node.data.attrs.is_some());
//! ```

pub mod component;
pub mod directive;
pub mod event;
pub mod handler;
pub mod hook;
pub mod host;
pub mod invoker;
pub mod node;
pub mod testing;
pub mod value;

pub use component::{ComponentContext, ComponentOptions, ComponentRef, ErrorCapturedFn};
pub use directive::{DirectiveBinding, DirectiveDef, DirectiveHook, DirectiveHookArgs, DirectiveHookFn};
pub use event::{HostEvent, Listener, ListenerHandler, ListenerMap, listener_handler};
pub use handler::{Handler, HandlerId, Handlers};
pub use hook::{HookSlot, HookTable, HookValue, hook_handler};
pub use host::{HostError, HostNode, HostNodeId, HostOps, HostResult, ListenerRegistration};
pub use invoker::{HookFn, HookInvoker, Invoker, ListenerFn, ListenerInvoker};
pub use node::{VNode, VNodeData};
pub use value::{AttrMap, AttrValue};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::component::{ComponentContext, ComponentOptions, ComponentRef};
	pub use crate::directive::{DirectiveBinding, DirectiveDef, DirectiveHook, DirectiveHookArgs};
	pub use crate::event::{HostEvent, Listener, ListenerMap, listener_handler};
	pub use crate::handler::{Handler, Handlers};
	pub use crate::hook::{HookSlot, HookValue, hook_handler};
	pub use crate::host::{HostError, HostNode, HostOps, ListenerRegistration};
	pub use crate::invoker::{HookInvoker, Invoker, ListenerInvoker};
	pub use crate::node::{VNode, VNodeData};
	pub use crate::value::{AttrMap, AttrValue};
}
