//! Side-effect modules for the reinhardt-vdom patcher.
//!
//! An upstream diff decides which host nodes are created, kept or destroyed.
//! For every such transition it hands the old and new descriptor to a
//! [`ModuleHost`], which reconciles the effects the descriptors carry:
//!
//! - [`modules::attrs`]: host attributes, including boolean, enumerated and
//!   `xlink:` namespaced ones
//! - [`modules::events`]: host event listeners, kept stable across passes
//!   through [`Invoker`](reinhardt_vdom_core::Invoker)s
//! - [`modules::directives`]: user directive lifecycle callbacks
//!
//! [`hooks::merge_vnode_hook`] lets any of them attach a one-shot callback to
//! a descriptor lifecycle slot.
//!
//! ## Errors
//!
//! Nothing in a pass aborts it. Host failures and failing user callbacks are
//! routed through [`error::handle_error`] to the owning component's
//! `error_captured` hooks, then to the configured [`ErrorReporter`].
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom_core::prelude::*;
//! use reinhardt_vdom_core::testing::RecordingHost;
//! use reinhardt_vdom_patch::prelude::*;
//!
//! let driver = ModuleHost::default();
//! let mut host = RecordingHost::new();
//! let el = host.create_element("input");
//!
//! let mut vnode = VNode::element("input")
//! 	.elm(el.clone())
//! 	.attrs(AttrMap::new().with("disabled", true));
//! driver.create(&mut vnode, &mut host);
//!
//! assert_eq!(host.attribute(&el, "disabled"), Some("disabled"));
//! ```

pub mod conf;
pub mod context;
pub mod error;
pub mod hooks;
pub mod listeners;
pub mod modules;
pub mod resolver;
pub mod spread;
pub mod testing;

pub use conf::{HostProfile, PatchSettings};
pub use context::{PatchContext, PatchEnv};
pub use error::{ConfigError, ErrorReporter, PatchError, TracingReporter, handle_error};
pub use hooks::{merge_into_vnode, merge_vnode_hook};
pub use listeners::{EventName, normalize_event, update_listeners};
pub use modules::{AttrsModule, DirectivesModule, EventsModule, ModuleHost, ModulePhase, PatchModule};
pub use resolver::{DirectiveRegistry, DirectiveResolver};
pub use spread::{bind_object_attrs, bind_object_listeners};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::conf::{HostProfile, PatchSettings};
	pub use crate::context::{PatchContext, PatchEnv};
	pub use crate::error::{ErrorReporter, PatchError, TracingReporter};
	pub use crate::hooks::merge_vnode_hook;
	pub use crate::modules::{ModuleHost, ModulePhase, PatchModule};
	pub use crate::resolver::{DirectiveRegistry, DirectiveResolver};
}
