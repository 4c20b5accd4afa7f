//! Peephole pass over the Validation-Expression tree.
//!
//! Post-order: children are simplified first, then a `union`/`intersection`
//! with exactly one arm is replaced in its parent's slot by that arm. `not` is
//! walked but never rewritten. Every rewrite hands ownership of a descendant to
//! the parent slot, so no node ever ends up shared.

use crate::expr::{array, Arg, Call, Define, Item, Root};

pub fn optimize(root: Root) -> Root {
    let before: usize = root.defines.iter().map(|d| d.body.size()).sum();
    let defines: Vec<Define> = root
        .defines
        .into_iter()
        .map(|Define { name, body }| Define { name, body: optimize_body(body) })
        .collect();
    let after: usize = defines.iter().map(|d| d.body.size()).sum();
    tracing::debug!(before, after, "optimized expression tree");
    Root { defines }
}

/// A definition body must stay a call: a combinator whose lone arm turned
/// out to be a constant keeps its wrapper.
fn optimize_body(body: Call) -> Call {
    let func = body.func;
    match optimize_call(body) {
        Item::Call(call) => call,
        Item::Constant(constant) => Call::new(func, vec![array([constant]).into()]),
    }
}

fn optimize_call(call: Call) -> Item {
    let Call { func, args } = call;
    let mut call = Call::new(func, args.into_iter().map(optimize_arg).collect());

    if call.single_arm().is_some() {
        if let [Arg::Array(arr)] = call.args.as_mut_slice() {
            if let Some(arm) = arr.items.pop() {
                tracing::trace!(func = func.name(), "collapsed single-arm combinator");
                return arm;
            }
        }
    }
    Item::Call(call)
}

fn optimize_arg(arg: Arg) -> Arg {
    match arg {
        Arg::Call(call) => optimize_call(call).into(),
        Arg::Constant(constant) => Arg::Constant(constant),
        Arg::Record(mut record) => {
            record.entries = record.entries.into_iter().map(|(k, v)| (k, optimize_item(v))).collect();
            Arg::Record(record)
        }
        Arg::Array(mut arr) => {
            arr.items = arr.items.into_iter().map(optimize_item).collect();
            Arg::Array(arr)
        }
    }
}

fn optimize_item(item: Item) -> Item {
    match item {
        Item::Call(call) => optimize_call(call),
        constant => constant,
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
