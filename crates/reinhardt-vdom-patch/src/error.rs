//! Patch error types and error reporting.
//!
//! Nothing in a patch pass is fatal. Failures are turned into [`PatchError`]
//! values and handed to an [`ErrorReporter`], either directly (warnings) or
//! through [`handle_error`], which first offers the error to the owning
//! component's ancestors.

use std::path::PathBuf;

use reinhardt_vdom_core::{ComponentRef, DirectiveHook, HostError};
use thiserror::Error;

/// Errors raised while applying a patch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchError {
	/// A directive lifecycle callback failed.
	#[error("directive {directive} {hook} hook failed: {source}")]
	DirectiveHook {
		/// Directive name.
		directive: String,
		/// Lifecycle callback that failed.
		hook: DirectiveHook,
		/// Error returned by the callback.
		#[source]
		source: anyhow::Error,
	},

	/// An event binding evaluated to no handler.
	#[error("invalid handler for event \"{event}\": got undefined")]
	InvalidHandler {
		/// Event name with modifiers stripped.
		event: String,
	},

	/// No directive definition is registered under a name.
	#[error("failed to resolve directive: {name}")]
	UnresolvedDirective {
		/// Directive name as bound.
		name: String,
	},

	/// A value did not have the shape its binding syntax expects.
	#[error("{0}")]
	ShapeViolation(String),

	/// A host mutation failed.
	#[error("host operation failed: {0}")]
	Host(#[from] HostError),
}

/// Errors raised while loading [`PatchSettings`](crate::conf::PatchSettings).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The settings file could not be read.
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The settings text is not valid.
	#[error("failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Receives diagnostics produced during a patch pass.
///
/// Implementations must not panic.
pub trait ErrorReporter {
	/// Reports an error that no component captured. `info` describes where it
	/// happened (e.g. `directive focus bind hook`).
	fn report(&self, error: &PatchError, owner: Option<&ComponentRef>, info: &str);

	/// Reports a non-fatal diagnostic.
	fn warn(&self, warning: &PatchError, owner: Option<&ComponentRef>);
}

/// Reporter that logs through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingReporter {
	silent: bool,
}

impl TracingReporter {
	pub fn new(silent: bool) -> Self {
		Self { silent }
	}

	pub fn is_silent(&self) -> bool {
		self.silent
	}
}

fn component_name(owner: Option<&ComponentRef>) -> &str {
	owner.map_or("<Root>", |c| c.display_name())
}

impl ErrorReporter for TracingReporter {
	fn report(&self, error: &PatchError, owner: Option<&ComponentRef>, info: &str) {
		if self.silent {
			return;
		}
		tracing::error!(
			component = %component_name(owner),
			info = %info,
			"Error in {}: \"{}\"",
			info,
			error
		);
	}

	fn warn(&self, warning: &PatchError, owner: Option<&ComponentRef>) {
		if self.silent {
			return;
		}
		tracing::warn!(component = %component_name(owner), "{}", warning);
	}
}

/// Routes an error through the owner's ancestors, then to `reporter`.
///
/// Each ancestor's `error_captured` hooks run nearest first. A hook that
/// returns `false` stops propagation and the reporter never sees the error.
pub fn handle_error(
	error: PatchError,
	owner: Option<&ComponentRef>,
	info: &str,
	reporter: &dyn ErrorReporter,
) {
	if let Some(vm) = owner {
		let err: &(dyn std::error::Error + 'static) = &error;
		for ancestor in vm.ancestors() {
			for hook in &ancestor.error_captured {
				if !(**hook)(err, info) {
					tracing::trace!(component = %ancestor.display_name(), "error captured");
					return;
				}
			}
		}
	}
	reporter.report(&error, owner, info);
}
