//! Shared state handed to every patch module.

use std::rc::Rc;

use reinhardt_vdom_core::{ComponentRef, HostOps};

use crate::conf::PatchSettings;
use crate::error::{ErrorReporter, PatchError, TracingReporter, handle_error};
use crate::resolver::{DirectiveRegistry, DirectiveResolver};

/// Settings and collaborators that outlive a single patch pass.
#[derive(Clone)]
pub struct PatchEnv {
	settings: PatchSettings,
	reporter: Rc<dyn ErrorReporter>,
	resolver: Rc<dyn DirectiveResolver>,
}

impl PatchEnv {
	/// Wires a [`TracingReporter`] and an empty [`DirectiveRegistry`].
	pub fn new(settings: PatchSettings) -> Self {
		let reporter = Rc::new(TracingReporter::new(settings.silent));
		Self {
			settings,
			reporter,
			resolver: Rc::new(DirectiveRegistry::new()),
		}
	}

	pub fn with_reporter(mut self, reporter: Rc<dyn ErrorReporter>) -> Self {
		self.reporter = reporter;
		self
	}

	pub fn with_resolver(mut self, resolver: Rc<dyn DirectiveResolver>) -> Self {
		self.resolver = resolver;
		self
	}

	pub fn settings(&self) -> &PatchSettings {
		&self.settings
	}

	pub fn reporter(&self) -> &dyn ErrorReporter {
		&*self.reporter
	}

	/// Shared handle to the reporter, for callbacks that run after the pass.
	pub fn reporter_handle(&self) -> Rc<dyn ErrorReporter> {
		Rc::clone(&self.reporter)
	}

	pub fn resolver(&self) -> &dyn DirectiveResolver {
		&*self.resolver
	}

	/// Routes `error` through [`handle_error`].
	pub fn report(&self, error: PatchError, owner: Option<&ComponentRef>, info: &str) {
		handle_error(error, owner, info, &*self.reporter);
	}

	pub fn warn(&self, warning: PatchError, owner: Option<&ComponentRef>) {
		self.reporter.warn(&warning, owner);
	}
}

impl Default for PatchEnv {
	fn default() -> Self {
		Self::new(PatchSettings::default())
	}
}

impl std::fmt::Debug for PatchEnv {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PatchEnv")
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}

/// What a module sees during one transition.
pub struct PatchContext<'a> {
	pub host: &'a mut dyn HostOps,
	pub env: &'a PatchEnv,
}

impl<'a> PatchContext<'a> {
	pub fn new(host: &'a mut dyn HostOps, env: &'a PatchEnv) -> Self {
		Self { host, env }
	}
}
