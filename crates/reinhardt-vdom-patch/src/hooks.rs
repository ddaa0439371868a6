//! Hook merging.
//!
//! Several unrelated contributors (directives, transitions, component roots)
//! may want a callback to run when a descriptor reaches a lifecycle slot.
//! [`merge_vnode_hook`] folds them into one merged [`HookInvoker`] per slot.
//! Each merged callback removes itself from the invoker after it runs, so it
//! fires at most once even when the slot is triggered again later.

use std::rc::Rc;

use reinhardt_vdom_core::{
	Handler, HandlerId, HookFn, HookInvoker, HookSlot, HookTable, HookValue, VNode, hook_handler,
};

/// Merges `hook` into `table[slot]`.
///
/// - empty slot: a new merged invoker holding only `hook`
/// - merged invoker: `hook` is appended, keeping the invoker's identity
/// - anything else: a new merged invoker running the existing value first
pub fn merge_vnode_hook(table: &mut HookTable, slot: HookSlot, hook: Handler<HookFn>) {
	let invoker = match table.get(&slot) {
		None => HookInvoker::new(Vec::<Handler<HookFn>>::new()),
		Some(HookValue::Invoker(existing)) if existing.is_merged() => Rc::clone(existing),
		Some(HookValue::Plain(plain)) => HookInvoker::new(vec![plain.clone()]),
		Some(HookValue::Invoker(existing)) => {
			let existing = Rc::clone(existing);
			HookInvoker::new(vec![hook_handler(move |old, vnode| existing.call(old, vnode))])
		}
	};

	let id = HandlerId::next();
	let weak = Rc::downgrade(&invoker);
	let func: Rc<HookFn> = Rc::new(move |old: &VNode, vnode: &VNode| {
		(hook.func())(old, vnode);
		if let Some(invoker) = weak.upgrade() {
			invoker.remove(id);
		}
	});
	invoker.push(Handler::with_id(id, func));
	invoker.mark_merged();

	tracing::trace!(slot = %slot, callbacks = invoker.len(), "merged hook");
	table.insert(slot, HookValue::Invoker(invoker));
}

/// [`merge_vnode_hook`] on a descriptor's own hook table, creating it when
/// missing.
pub fn merge_into_vnode(vnode: &mut VNode, slot: HookSlot, hook: Handler<HookFn>) {
	let table = vnode.data.hook.get_or_insert_with(HookTable::new);
	merge_vnode_hook(table, slot, hook);
}
