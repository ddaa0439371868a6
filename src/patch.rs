//! Patch modules, the module host and hook merging.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "patch")]
//! # {
//! use reinhardt_vdom::patch::ModuleHost;
//!
//! let driver = ModuleHost::default();
//! assert_eq!(driver.module_names(), vec!["attrs", "events", "directives"]);
//! # }
//! ```

#[cfg(feature = "patch")]
pub use reinhardt_vdom_patch::*;
