//! The composition root.
//!
//! [`PluginHost`] owns the plugin sequence, the hook registry, and the
//! shared [`HostContext`], and re-derives the full [`Composition`] whenever
//! its inputs change. One cycle:
//!
//! 1. resolve the active plugin sequence (host props first, then plugins in
//!    order);
//! 2. run one-time `initialize` for plugins that haven't joined before
//!    (identity-tracked);
//! 3. classify the union of hook names via the registry;
//! 4. build the composed event/function hooks;
//! 5. resolve decorators, style map, accessibility props;
//! 6. publish the composition atomically.
//!
//! Recomposition is idempotent and side-effect-free apart from step 2.

use crate::compose;
use crate::compose::Composition;
use crate::resolve;
use plait_core::{
    ChangeFn, ComposeError, Decorator, DocumentState, HookArgs, HookRegistry, HookTable,
    HostContext, Plugin, PluginManifest, StyleMap,
};
use serde_json::Value;
use std::sync::{Arc, Weak};

/// The host runtime: owns the plugin sequence and republishes the composed
/// hook table once per evaluation cycle.
pub struct PluginHost<E: HookArgs, S: DocumentState> {
    context: HostContext<E, S>,
    registry: HookRegistry,
    props: Option<PluginManifest<E, S>>,
    plugins: Vec<Arc<dyn Plugin<E, S>>>,
    decorators: Vec<Decorator>,
    style_map: StyleMap,
    initialized: Vec<Weak<dyn Plugin<E, S>>>,
    composition: Arc<Composition<E, S>>,
    composed_at: u64,
    dirty: bool,
}

impl<E: HookArgs, S: DocumentState> PluginHost<E, S> {
    /// Start building a host around the given initial document state.
    pub fn builder(initial: S) -> PluginHostBuilder<E, S> {
        PluginHostBuilder {
            initial,
            registry: HookRegistry::standard(),
            props: None,
            plugins: Vec::new(),
            decorators: Vec::new(),
            style_map: StyleMap::new(),
        }
    }

    /// The shared context handed to every hook invocation.
    pub fn context(&self) -> &HostContext<E, S> {
        &self.context
    }

    /// The most recently published composition.
    pub fn composition(&self) -> Arc<Composition<E, S>> {
        Arc::clone(&self.composition)
    }

    /// Read the current document state.
    pub fn state(&self) -> S {
        self.context.state()
    }

    /// Replace the document state through the change-filter chain.
    pub fn set_state(&self, next: S) {
        self.context.set_state(next);
    }

    /// Append a plugin to the sequence; takes effect on the next
    /// [`refresh`](Self::refresh).
    pub fn push_plugin<P: Plugin<E, S>>(&mut self, plugin: P) {
        self.plugins.push(Arc::new(plugin));
        self.dirty = true;
    }

    /// Replace the plugin sequence; takes effect on the next
    /// [`refresh`](Self::refresh). Plugins already initialized (by
    /// identity) are not re-initialized if they reappear.
    pub fn set_plugins(&mut self, plugins: Vec<Arc<dyn Plugin<E, S>>>) {
        self.plugins = plugins;
        self.dirty = true;
    }

    /// Whether the published composition no longer reflects the host's
    /// inputs (plugin set changed, state replaced, read-only toggled).
    pub fn is_stale(&self) -> bool {
        self.dirty || self.context.generation() != self.composed_at
    }

    /// Re-run the composition cycle if anything changed since the last one.
    ///
    /// Returns whether a recomposition actually ran. On error the cycle is
    /// aborted and the previously published composition stays in effect.
    pub fn refresh(&mut self) -> Result<bool, ComposeError> {
        if !self.is_stale() {
            return Ok(false);
        }
        self.compose()?;
        Ok(true)
    }

    fn compose(&mut self) -> Result<(), ComposeError> {
        // Step 2 runs before manifests are read: initialize may replace
        // state or register side effects the manifests depend on.
        //
        // Identity is tracked through live handles: a dropped plugin's
        // entry is pruned, so a fresh plugin reusing the same allocation
        // address still gets its one initialize.
        self.initialized.retain(|seen| seen.strong_count() > 0);
        for plugin in &self.plugins {
            let joined = self
                .initialized
                .iter()
                .any(|seen| seen.upgrade().is_some_and(|seen| Arc::ptr_eq(&seen, plugin)));
            if joined {
                continue;
            }
            plugin
                .initialize(&self.context)
                .map_err(|source| ComposeError::Initialize {
                    plugin: plugin.name().to_string(),
                    source,
                })?;
            self.initialized.push(Arc::downgrade(plugin));
        }

        // Host props behave as the highest-priority plugin: first in
        // iteration order everywhere.
        let mut manifests = Vec::with_capacity(self.plugins.len() + 1);
        if let Some(props) = &self.props {
            manifests.push(props.clone());
        }
        manifests.extend(self.plugins.iter().map(|p| p.manifest()));

        let (events, functions) = compose::build_table(&self.registry, &manifests);

        let filters: Vec<Arc<ChangeFn<E, S>>> = manifests
            .iter()
            .filter_map(|m| m.change_filter().cloned())
            .collect();

        let composition = Arc::new(Composition {
            events,
            functions,
            decorators: resolve::decorators(&self.decorators, &manifests),
            style_map: resolve::style_map(&manifests, &self.style_map),
            accessibility: resolve::accessibility(&manifests),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            plugins = manifests.len(),
            event_hooks = composition.events.len(),
            fn_hooks = composition.functions.len(),
            "composed plugin hook table"
        );

        self.context.install_filters(filters);
        let table: Arc<dyn HookTable<E, S>> = composition.clone();
        self.context.publish(table);
        self.composition = composition;
        self.composed_at = self.context.generation();
        self.dirty = false;
        Ok(())
    }
}

/// Builder for a [`PluginHost`]. `build` runs the first composition cycle.
pub struct PluginHostBuilder<E: HookArgs, S: DocumentState> {
    initial: S,
    registry: HookRegistry,
    props: Option<PluginManifest<E, S>>,
    plugins: Vec<Arc<dyn Plugin<E, S>>>,
    decorators: Vec<Decorator>,
    style_map: StyleMap,
}

impl<E: HookArgs, S: DocumentState> PluginHostBuilder<E, S> {
    /// Append a plugin to the sequence. Order is significant: earlier
    /// plugins see events first and win first-non-empty merges.
    pub fn plugin<P: Plugin<E, S>>(mut self, plugin: P) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Append an already shared plugin.
    pub fn plugin_arc(mut self, plugin: Arc<dyn Plugin<E, S>>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// The host's own hooks and contributions — composed ahead of every
    /// plugin.
    pub fn props(mut self, props: PluginManifest<E, S>) -> Self {
        self.props = Some(props);
        self
    }

    /// Append an explicit top-level decorator; these precede all plugin
    /// contributions.
    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Set an explicit style; the explicit map overrides every plugin
    /// contribution key-by-key.
    pub fn style(mut self, name: impl Into<String>, style: Value) -> Self {
        self.style_map.set(name, style);
        self
    }

    /// Replace the explicit style map.
    pub fn style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }

    /// Replace the hook registry (defaults to
    /// [`HookRegistry::standard`]).
    pub fn registry(mut self, registry: HookRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the host and run the first composition cycle.
    pub fn build(self) -> Result<PluginHost<E, S>, ComposeError> {
        let mut host = PluginHost {
            context: HostContext::new(self.initial),
            registry: self.registry,
            props: self.props,
            plugins: self.plugins,
            decorators: self.decorators,
            style_map: self.style_map,
            initialized: Vec::new(),
            composition: Arc::new(Composition {
                events: Default::default(),
                functions: Default::default(),
                decorators: Vec::new(),
                style_map: StyleMap::new(),
                accessibility: Default::default(),
            }),
            composed_at: 0,
            dirty: true,
        };
        host.compose()?;
        Ok(host)
    }
}
