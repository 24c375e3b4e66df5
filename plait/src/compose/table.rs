//! The published composition: one cycle's hook table plus derived values.

use crate::compose::event::ComposedEventHook;
use crate::compose::function::ComposedFnHook;
use plait_core::{
    AccessibilityProps, Decorator, DocumentState, HookArgs, HookError, HookKind, HookOutcome,
    HookTable, HostContext, PlaitError, StyleMap,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// The owner-facing result of one composition cycle.
///
/// Immutable once built: the composition root publishes it as a single
/// `Arc` swap, so consumers observe either the previous cycle or this one,
/// never a partially built table. Lookups for names the table doesn't have,
/// or of the wrong kind, fail with typed [`HookError`]s — whereas a present
/// hook whose plugins all decline reports `NotHandled` / no value, which is
/// an expected outcome, not an error.
pub struct Composition<E: HookArgs, S: DocumentState> {
    pub(crate) events: BTreeMap<String, ComposedEventHook<E, S>>,
    pub(crate) functions: BTreeMap<String, ComposedFnHook<E, S>>,
    pub(crate) decorators: Vec<Decorator>,
    pub(crate) style_map: StyleMap,
    pub(crate) accessibility: AccessibilityProps,
}

impl<E: HookArgs, S: DocumentState> Composition<E, S> {
    /// All composed hook names, event hooks first.
    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.events
            .keys()
            .chain(self.functions.keys())
            .map(String::as_str)
    }

    /// The composed event hook for `name`, if any.
    pub fn event_hook(&self, name: &str) -> Option<&ComposedEventHook<E, S>> {
        self.events.get(name)
    }

    /// The composed function hook for `name`, if any.
    pub fn fn_hook(&self, name: &str) -> Option<&ComposedFnHook<E, S>> {
        self.functions.get(name)
    }

    /// The resolved decorator list: explicit entries first, then plugin
    /// contributions in plugin order.
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// The resolved style map, later sources overriding earlier.
    pub fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    /// The merged accessibility descriptor.
    pub fn accessibility_props(&self) -> &AccessibilityProps {
        &self.accessibility
    }
}

impl<E: HookArgs, S: DocumentState> HookTable<E, S> for Composition<E, S> {
    fn kind_of(&self, name: &str) -> Option<HookKind> {
        if self.events.contains_key(name) {
            Some(HookKind::Event)
        } else if self.functions.contains_key(name) {
            Some(HookKind::Function)
        } else {
            None
        }
    }

    fn handle_event(
        &self,
        name: &str,
        event: &E,
        ctx: &HostContext<E, S>,
    ) -> Result<HookOutcome, PlaitError> {
        match self.events.get(name) {
            Some(hook) => hook
                .invoke(event, ctx)
                .map_err(|e| PlaitError::Hook(HookError::Custom(e))),
            None if self.functions.contains_key(name) => {
                Err(PlaitError::Hook(HookError::KindMismatch {
                    name: name.to_string(),
                    expected: HookKind::Event,
                    actual: HookKind::Function,
                }))
            }
            None => Err(PlaitError::Hook(HookError::UnknownHook(name.to_string()))),
        }
    }

    fn run_fn(
        &self,
        name: &str,
        event: &E,
        ctx: &HostContext<E, S>,
    ) -> Result<Option<Value>, PlaitError> {
        match self.functions.get(name) {
            Some(hook) => hook
                .invoke(event, ctx)
                .map_err(|e| PlaitError::Hook(HookError::Custom(e))),
            None if self.events.contains_key(name) => {
                Err(PlaitError::Hook(HookError::KindMismatch {
                    name: name.to_string(),
                    expected: HookKind::Function,
                    actual: HookKind::Event,
                }))
            }
            None => Err(PlaitError::Hook(HookError::UnknownHook(name.to_string()))),
        }
    }
}
