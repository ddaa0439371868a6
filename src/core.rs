//! Node descriptors, invokers and host capabilities.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_vdom::core::{AttrMap, VNode};
//!
//! let node = VNode::element("img").attrs(AttrMap::new().with("alt", "logo"));
//! assert_eq!(node.tag.as_deref(), Some("img"));
//! ```

pub use reinhardt_vdom_core::*;
