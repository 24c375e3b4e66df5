//! Hook composition: one composed callable per distinct hook name.
//!
//! Discovery walks every manifest in plugin order and enters each new name
//! into the table under the kind the registry answers for it. The merge
//! itself then considers *every* plugin implementing that name, not just
//! the first to expose it. The set of names composed in a cycle depends
//! only on the manifests of that cycle — no state carries over.

mod event;
mod function;
mod table;

pub use event::ComposedEventHook;
pub use function::ComposedFnHook;
pub use table::Composition;

use plait_core::{DocumentState, HookArgs, HookKind, HookRegistry, PluginManifest};
use std::collections::{BTreeMap, BTreeSet};

/// Build the composed hook maps for one cycle.
///
/// Reserved names never enter the table, and passthrough names are ignored.
/// A plugin that declared a name in the wrong bucket (e.g. an event
/// implementation for a name the registry composes as a function hook) is
/// simply absent from that hook's chain; shape mismatches are plugin
/// authoring defects the engine does not validate.
pub(crate) fn build_table<E: HookArgs, S: DocumentState>(
    registry: &HookRegistry,
    manifests: &[PluginManifest<E, S>],
) -> (
    BTreeMap<String, ComposedEventHook<E, S>>,
    BTreeMap<String, ComposedFnHook<E, S>>,
) {
    let mut events = BTreeMap::new();
    let mut functions = BTreeMap::new();
    let mut seen = BTreeSet::new();

    for manifest in manifests {
        for name in manifest.hook_names() {
            if registry.is_reserved(name) || !seen.insert(name.to_string()) {
                continue;
            }
            match registry.kind(name) {
                HookKind::Event => {
                    let chain = manifests
                        .iter()
                        .filter_map(|m| m.event_hook(name).cloned())
                        .collect();
                    events.insert(name.to_string(), ComposedEventHook::new(name, chain));
                }
                HookKind::Function => {
                    let chain = manifests
                        .iter()
                        .filter_map(|m| m.fn_hook(name).cloned())
                        .collect();
                    functions.insert(
                        name.to_string(),
                        ComposedFnHook::new(name, registry.policy(name), chain),
                    );
                }
                HookKind::Passthrough => {}
            }
        }
    }

    (events, functions)
}
