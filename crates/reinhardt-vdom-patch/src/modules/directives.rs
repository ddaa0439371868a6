//! Directive lifecycle module.
//!
//! Pairs the directive bindings of two descriptor versions by key and runs
//! the matching lifecycle callbacks:
//!
//! - key only in the new version: `bind`, then `inserted` once the host node
//!   is attached (merged into the `insert` slot on create, run right away
//!   otherwise)
//! - key in both versions: `update`, then `componentUpdated` from the
//!   `postpatch` slot
//! - key only in the old version: `unbind`
//!
//! Callbacks are isolated from each other: a failing callback is routed
//! through [`handle_error`] and the pass goes on.

use std::rc::Rc;

use indexmap::IndexMap;
use reinhardt_vdom_core::{
	ComponentRef, DirectiveBinding, DirectiveHook, DirectiveHookArgs, Handler, HookFn, HookSlot,
	VNode, hook_handler,
};

use super::{ModulePhase, PatchModule};
use crate::context::{PatchContext, PatchEnv};
use crate::error::{ErrorReporter, PatchError, handle_error};
use crate::hooks::merge_into_vnode;

/// Runs directive lifecycle callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectivesModule;

impl PatchModule for DirectivesModule {
	fn name(&self) -> &'static str {
		"directives"
	}

	fn phase(&self) -> ModulePhase {
		ModulePhase::Directives
	}

	fn create(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_directives(old, vnode, Transition::Create, cx.env);
	}

	fn update(&self, old: &VNode, vnode: &mut VNode, cx: &mut PatchContext<'_>) {
		update_directives(old, vnode, Transition::Update, cx.env);
	}

	fn destroy(&self, vnode: &VNode, cx: &mut PatchContext<'_>) {
		let mut empty = VNode::empty();
		update_directives(vnode, &mut empty, Transition::Destroy, cx.env);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
	Create,
	Update,
	Destroy,
}

/// Bindings keyed by [`DirectiveBinding::key`]. The last binding for a key
/// wins.
pub type DirectiveMap = IndexMap<String, DirectiveBinding>;

/// Builds the keyed binding map of a descriptor.
///
/// Bindings are cloned, so the descriptor itself is left untouched. Missing
/// modifiers default to the empty set and every binding's definition is
/// resolved through the environment's resolver.
pub fn normalize_directives(
	dirs: Option<&[DirectiveBinding]>,
	owner: Option<&ComponentRef>,
	env: &PatchEnv,
) -> DirectiveMap {
	let mut res = DirectiveMap::new();
	for dir in dirs.into_iter().flatten() {
		let mut dir = dir.clone();
		dir.modifiers.get_or_insert_with(Default::default);
		dir.def = env.resolver().resolve(owner, &dir.name);
		if dir.def.is_none() && env.settings().warn_unresolved_directives {
			env.warn(
				PatchError::UnresolvedDirective {
					name: dir.name.clone(),
				},
				owner,
			);
		}
		res.insert(dir.key(), dir);
	}
	res
}

fn update_directives(old: &VNode, vnode: &mut VNode, transition: Transition, env: &PatchEnv) {
	if old.data.directives.is_none() && vnode.data.directives.is_none() {
		return;
	}

	let is_create = transition == Transition::Create;
	let is_destroy = transition == Transition::Destroy;
	let old_dirs = normalize_directives(old.data.directives.as_deref(), old.context.as_ref(), env);
	let mut new_dirs =
		normalize_directives(vnode.data.directives.as_deref(), vnode.context.as_ref(), env);
	let reporter = env.reporter();

	let mut with_insert = Vec::new();
	let mut with_postpatch = Vec::new();

	for (key, dir) in new_dirs.iter_mut() {
		match old_dirs.get(key) {
			None => {
				call_hook(dir, DirectiveHook::Bind, vnode, old, false, reporter);
				if dir.def.as_ref().is_some_and(|d| d.inserted.is_some()) {
					with_insert.push(dir.clone());
				}
			}
			Some(old_dir) => {
				dir.old_value = old_dir.value.clone();
				dir.old_arg = old_dir.arg.clone();
				call_hook(dir, DirectiveHook::Update, vnode, old, false, reporter);
				if dir.def.as_ref().is_some_and(|d| d.component_updated.is_some()) {
					with_postpatch.push(dir.clone());
				}
			}
		}
	}

	if !with_insert.is_empty() {
		if is_create {
			let hook = deferred(with_insert, DirectiveHook::Inserted, env.reporter_handle());
			merge_into_vnode(vnode, HookSlot::Insert, hook);
		} else {
			for dir in &with_insert {
				call_hook(dir, DirectiveHook::Inserted, vnode, old, false, reporter);
			}
		}
	}

	if !with_postpatch.is_empty() {
		let hook = deferred(
			with_postpatch,
			DirectiveHook::ComponentUpdated,
			env.reporter_handle(),
		);
		merge_into_vnode(vnode, HookSlot::Postpatch, hook);
	}

	if !is_create {
		for (key, old_dir) in &old_dirs {
			if !new_dirs.contains_key(key) {
				call_hook(old_dir, DirectiveHook::Unbind, old, old, is_destroy, reporter);
			}
		}
	}
}

/// A slot callback that runs `hook` for each binding with the `(old, vnode)`
/// pair the slot fires with.
fn deferred(
	dirs: Vec<DirectiveBinding>,
	hook: DirectiveHook,
	reporter: Rc<dyn ErrorReporter>,
) -> Handler<HookFn> {
	hook_handler(move |old, vnode| {
		for dir in &dirs {
			call_hook(dir, hook, vnode, old, false, &*reporter);
		}
	})
}

fn call_hook(
	dir: &DirectiveBinding,
	hook: DirectiveHook,
	vnode: &VNode,
	old_vnode: &VNode,
	is_destroy: bool,
	reporter: &dyn ErrorReporter,
) {
	let Some(f) = dir.def.as_ref().and_then(|def| def.get(hook)) else {
		return;
	};
	tracing::trace!(directive = %dir.name, hook = %hook, "directive hook");
	let args = DirectiveHookArgs {
		el: vnode.elm.as_ref(),
		binding: dir,
		vnode,
		old_vnode,
		is_destroy,
	};
	if let Err(source) = (**f)(&args) {
		let info = format!("directive {} {} hook", dir.name, hook);
		handle_error(
			PatchError::DirectiveHook {
				directive: dir.name.clone(),
				hook,
				source,
			},
			vnode.context.as_ref(),
			&info,
			reporter,
		);
	}
}
