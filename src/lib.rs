//! # reinhardt-vdom
//!
//! Side-effect modules for a node-descriptor patcher.
//!
//! An upstream diff pairs the old and new descriptor of every position in the
//! UI tree. This crate applies the effects those descriptors carry to the
//! host node: attributes, event listeners and user directive callbacks. It
//! also provides the hook merger modules use to schedule one-shot callbacks
//! on descriptor lifecycle slots.
//!
//! ## Feature Flags
//!
//! - `minimal` - Data model only: descriptors, invokers, host capabilities
//! - `patch` - Patch modules, module host, hook merger
//! - `full` (default) - Everything
//!
//! ## Crates
//!
//! - [`reinhardt_vdom_core`] (re-exported as [`core`])
//! - `reinhardt_vdom_patch` (re-exported as `patch`)
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "patch")]
//! # {
//! use reinhardt_vdom::prelude::*;
//! use reinhardt_vdom::core::testing::RecordingHost;
//!
//! let driver = ModuleHost::default();
//! let mut host = RecordingHost::new();
//! let el = host.create_element("a");
//!
//! let mut link = VNode::element("a")
//! 	.elm(el.clone())
//! 	.attrs(AttrMap::new().with("href", "/docs"))
//! 	.on("click", Some(Listener::from_fn(|_| {})));
//! driver.create(&mut link, &mut host);
//!
//! assert_eq!(host.attribute(&el, "href"), Some("/docs"));
//! assert_eq!(host.listener_count(&el, "click"), 1);
//! # }
//! ```

pub mod core;
#[cfg(feature = "patch")]
pub mod patch;

/// Re-export commonly used types.
pub mod prelude {
	pub use reinhardt_vdom_core::prelude::*;

	#[cfg(feature = "patch")]
	pub use reinhardt_vdom_patch::prelude::*;
}
