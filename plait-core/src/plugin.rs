//! The plugin trait and the capability manifest.
//!
//! A plugin declares what it implements — nothing more. The manifest is the
//! capability descriptor the engine composes from: per-name event and
//! function hooks, an optional state-change filter, and the static
//! contributions (decorators, styles, accessibility). A plugin that omits a
//! hook simply never appears in that hook's chain.

use crate::context::HostContext;
use crate::error::BoxError;
use crate::hook::{HookArgs, HookOutcome, IntoHookOutcome, IntoHookValue};
use crate::props::{AccessibilityProps, Decorator, StyleMap};
use crate::state::DocumentState;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An event-hook implementation: original arguments plus the shared context
/// as the trailing argument, deciding whether the chain short-circuits.
pub type EventHookFn<E, S> =
    dyn Fn(&E, &HostContext<E, S>) -> Result<HookOutcome, BoxError> + Send + Sync;

/// A function-hook implementation: same calling convention, producing an
/// optional value for the hook's merge policy. `None` declines.
pub type FnHookFn<E, S> =
    dyn Fn(&E, &HostContext<E, S>) -> Result<Option<Value>, BoxError> + Send + Sync;

/// A state-change filter: transforms a replacement document state before it
/// is stored. Filters run in plugin order.
pub type ChangeFn<E, S> = dyn Fn(S, &HostContext<E, S>) -> S + Send + Sync;

/// An independently authored extension of the host.
///
/// Plugins are supplied as an ordered sequence; order is significant and
/// stable for the lifetime of a composition cycle. The engine re-reads the
/// manifest every cycle, so a plugin whose exposed capabilities change is
/// picked up on the next refresh without stale closures.
pub trait Plugin<E: HookArgs, S: DocumentState>: Send + Sync + 'static {
    /// A human-readable name, used in error reporting.
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Declare the hooks and static values this plugin implements.
    fn manifest(&self) -> PluginManifest<E, S>;

    /// One-time setup, invoked exactly once when the plugin first joins the
    /// active set (tracked by identity, never re-invoked). An error aborts
    /// the composition cycle.
    fn initialize(&self, host: &HostContext<E, S>) -> Result<(), BoxError> {
        let _ = host;
        Ok(())
    }
}

/// The capability descriptor a plugin declares.
///
/// Built with consuming setters:
///
/// ```rust,ignore
/// PluginManifest::new()
///     .on(names::ON_TAB, |event, ctx| { ... true })
///     .produce(names::BLOCK_STYLE_FN, |block, _ctx| Some("code".into()))
///     .decorator(Decorator::new("link"))
/// ```
///
/// A manifest is itself a [`Plugin`] (it declares exactly itself), which is
/// convenient for hosts assembling plugins inline and for the host's own
/// props — the highest-priority entry in the plugin sequence.
pub struct PluginManifest<E: HookArgs, S: DocumentState> {
    event_hooks: BTreeMap<String, Arc<EventHookFn<E, S>>>,
    fn_hooks: BTreeMap<String, Arc<FnHookFn<E, S>>>,
    change_filter: Option<Arc<ChangeFn<E, S>>>,
    decorators: Vec<Decorator>,
    style_map: StyleMap,
    accessibility: Option<AccessibilityProps>,
}

impl<E: HookArgs, S: DocumentState> PluginManifest<E, S> {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self {
            event_hooks: BTreeMap::new(),
            fn_hooks: BTreeMap::new(),
            change_filter: None,
            decorators: Vec::new(),
            style_map: StyleMap::new(),
            accessibility: None,
        }
    }

    /// Declare an event hook.
    ///
    /// The implementation may return anything convertible to a
    /// [`HookOutcome`]: `bool`, `HookOutcome`, `Option<..>`, or a `Result`
    /// of those. Note the reserved change-pipeline name never enters the
    /// composed table; use [`on_change`](Self::on_change) for that.
    pub fn on<F, R>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&E, &HostContext<E, S>) -> R + Send + Sync + 'static,
        R: IntoHookOutcome,
    {
        self.event_hooks.insert(
            name.into(),
            Arc::new(move |event, ctx| hook(event, ctx).into_hook_outcome()),
        );
        self
    }

    /// Declare a function hook.
    ///
    /// The implementation may return anything convertible to an optional
    /// merge value: `Option<Value>`, `Value`, `String`, a
    /// [`BlockDescriptor`](crate::BlockDescriptor), `()` (always declines),
    /// or a `Result` of those.
    pub fn produce<F, R>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&E, &HostContext<E, S>) -> R + Send + Sync + 'static,
        R: IntoHookValue,
    {
        self.fn_hooks.insert(
            name.into(),
            Arc::new(move |event, ctx| hook(event, ctx).into_hook_value()),
        );
        self
    }

    /// Declare a state-change filter.
    pub fn on_change<F>(mut self, filter: F) -> Self
    where
        F: Fn(S, &HostContext<E, S>) -> S + Send + Sync + 'static,
    {
        self.change_filter = Some(Arc::new(filter));
        self
    }

    /// Contribute a decorator.
    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Contribute a named style.
    pub fn style(mut self, name: impl Into<String>, style: Value) -> Self {
        self.style_map.set(name, style);
        self
    }

    /// Contribute a whole style map.
    pub fn styles(mut self, styles: StyleMap) -> Self {
        self.style_map.merge_from(&styles);
        self
    }

    /// Contribute an accessibility descriptor.
    pub fn aria(mut self, props: AccessibilityProps) -> Self {
        self.accessibility = Some(props);
        self
    }

    /// All hook names this manifest declares, event hooks first.
    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.event_hooks
            .keys()
            .chain(self.fn_hooks.keys())
            .map(String::as_str)
    }

    /// The event-hook implementation for `name`, if declared.
    pub fn event_hook(&self, name: &str) -> Option<&Arc<EventHookFn<E, S>>> {
        self.event_hooks.get(name)
    }

    /// The function-hook implementation for `name`, if declared.
    pub fn fn_hook(&self, name: &str) -> Option<&Arc<FnHookFn<E, S>>> {
        self.fn_hooks.get(name)
    }

    /// The state-change filter, if declared.
    pub fn change_filter(&self) -> Option<&Arc<ChangeFn<E, S>>> {
        self.change_filter.as_ref()
    }

    /// The decorator contributions, in declaration order.
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// The style-map contribution.
    pub fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    /// The accessibility contribution, if declared.
    pub fn accessibility(&self) -> Option<&AccessibilityProps> {
        self.accessibility.as_ref()
    }
}

impl<E: HookArgs, S: DocumentState> Default for PluginManifest<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HookArgs, S: DocumentState> Clone for PluginManifest<E, S> {
    fn clone(&self) -> Self {
        Self {
            event_hooks: self.event_hooks.clone(),
            fn_hooks: self.fn_hooks.clone(),
            change_filter: self.change_filter.clone(),
            decorators: self.decorators.clone(),
            style_map: self.style_map.clone(),
            accessibility: self.accessibility.clone(),
        }
    }
}

// A bare manifest can stand in as a plugin.
impl<E: HookArgs, S: DocumentState> Plugin<E, S> for PluginManifest<E, S> {
    fn name(&self) -> &str {
        "manifest"
    }

    fn manifest(&self) -> PluginManifest<E, S> {
        self.clone()
    }
}
