//! Side-effect modules and the driver that runs them.
//!
//! A module observes the create, update and destroy transitions of every
//! node pair the upstream diff compares, and applies or removes one kind of
//! effect on the host node. [`ModuleHost`] runs the registered modules in a
//! fixed order, host-level modules first and directive modules last, and
//! fires the descriptor's own lifecycle hooks around them.

pub mod attrs;
pub mod directives;
pub mod events;

use reinhardt_vdom_core::{HookSlot, HostOps, VNode};

use crate::context::{PatchContext, PatchEnv};

pub use attrs::AttrsModule;
pub use directives::DirectivesModule;
pub use events::EventsModule;

/// When a module runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModulePhase {
	/// Applies effects to the host node (attributes, listeners, ...).
	Host,
	/// Runs user lifecycle callbacks. Always after every `Host` module.
	Directives,
}

/// The create/update/destroy hook protocol.
///
/// `create` and `update` receive the old descriptor (the empty descriptor
/// on create) and the new one. `destroy` receives the descriptor being torn
/// down. Every hook defaults to doing nothing.
pub trait PatchModule {
	/// Name used in logs.
	fn name(&self) -> &'static str;

	fn phase(&self) -> ModulePhase {
		ModulePhase::Host
	}

	fn create(&self, _old: &VNode, _vnode: &mut VNode, _cx: &mut PatchContext<'_>) {}

	fn update(&self, _old: &VNode, _vnode: &mut VNode, _cx: &mut PatchContext<'_>) {}

	fn destroy(&self, _vnode: &VNode, _cx: &mut PatchContext<'_>) {}
}

/// Runs the registered modules for each transition.
pub struct ModuleHost {
	modules: Vec<Box<dyn PatchModule>>,
	env: PatchEnv,
}

impl ModuleHost {
	/// Creates a driver without modules.
	pub fn new(env: PatchEnv) -> Self {
		Self {
			modules: Vec::new(),
			env,
		}
	}

	/// Creates a driver with the attribute, event and directive modules.
	pub fn with_default_modules(env: PatchEnv) -> Self {
		Self::new(env)
			.with_module(AttrsModule)
			.with_module(EventsModule)
			.with_module(DirectivesModule)
	}

	/// Registers a module. Modules keep registration order within a phase.
	pub fn register(&mut self, module: impl PatchModule + 'static) {
		self.modules.push(Box::new(module));
		self.modules.sort_by_key(|m| m.phase());
	}

	pub fn with_module(mut self, module: impl PatchModule + 'static) -> Self {
		self.register(module);
		self
	}

	/// Module names in run order.
	pub fn module_names(&self) -> Vec<&'static str> {
		self.modules.iter().map(|m| m.name()).collect()
	}

	pub fn env(&self) -> &PatchEnv {
		&self.env
	}

	/// Runs the create transition for a freshly created host node.
	///
	/// Returns true when the descriptor has an `insert` hook, i.e. the caller
	/// has to queue it for [`insert`](Self::insert) once the node is attached.
	pub fn create(&self, vnode: &mut VNode, host: &mut dyn HostOps) -> bool {
		let empty = VNode::empty();
		let mut cx = PatchContext::new(host, &self.env);
		for module in &self.modules {
			tracing::trace!(module = module.name(), "create");
			module.create(&empty, vnode, &mut cx);
		}
		vnode.call_hook(HookSlot::Create, &empty);
		vnode.hook_value(HookSlot::Insert).is_some()
	}

	/// Runs the update transition for a node pair the diff matched.
	///
	/// The descriptor's `postpatch` slot is not fired here; the caller fires
	/// it through [`postpatch`](Self::postpatch) once children are patched.
	pub fn update(&self, old: &VNode, vnode: &mut VNode, host: &mut dyn HostOps) {
		if vnode.elm.is_none() {
			vnode.elm = old.elm.clone();
		}
		vnode.call_hook(HookSlot::Prepatch, old);
		let mut cx = PatchContext::new(host, &self.env);
		for module in &self.modules {
			tracing::trace!(module = module.name(), "update");
			module.update(old, vnode, &mut cx);
		}
		vnode.call_hook(HookSlot::Update, old);
	}

	/// Fires the `insert` slot once the host node is attached.
	pub fn insert(&self, vnode: &VNode) {
		vnode.call_hook(HookSlot::Insert, &VNode::empty());
	}

	/// Fires the `postpatch` slot after the whole pair has been patched.
	pub fn postpatch(&self, old: &VNode, vnode: &VNode) {
		vnode.call_hook(HookSlot::Postpatch, old);
	}

	/// Runs the destroy transition for a descriptor whose host node goes away.
	pub fn destroy(&self, vnode: &VNode, host: &mut dyn HostOps) {
		vnode.call_hook(HookSlot::Destroy, &VNode::empty());
		let mut cx = PatchContext::new(host, &self.env);
		for module in &self.modules {
			tracing::trace!(module = module.name(), "destroy");
			module.destroy(vnode, &mut cx);
		}
	}
}

impl Default for ModuleHost {
	fn default() -> Self {
		Self::with_default_modules(PatchEnv::default())
	}
}

impl std::fmt::Debug for ModuleHost {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModuleHost")
			.field("modules", &self.module_names())
			.field("env", &self.env)
			.finish()
	}
}
