//! Default key bindings as an explicit plugin.
//!
//! Historically hosts appended a fallback key-binding table behind the
//! owner's back. Here it is an ordinary, named entry in the plugin
//! sequence: the owner adds it (usually last, so earlier plugins can
//! shadow its bindings) or leaves it out entirely, and composition stays a
//! pure function of the declared plugin list.

use plait_core::{DocumentState, HookArgs, Plugin, PluginManifest, names};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A plugin implementing the `keyBindingFn` function hook from a plain
/// binding function.
///
/// The binding function maps a raw input event to a command value, or
/// `None` when the event is unbound — in which case composition falls
/// through to whatever the owner does by default.
///
/// # Example
///
/// ```rust,ignore
/// let bindings = KeyBindingsPlugin::new(|key: &Key| match key.code.as_str() {
///     "Ctrl+B" => Some("bold".into()),
///     "Ctrl+I" => Some("italic".into()),
///     _ => None,
/// });
/// let host = PluginHost::builder(state).plugin(toolbar).plugin(bindings).build()?;
/// ```
pub struct KeyBindingsPlugin<E, S> {
    bind: Arc<dyn Fn(&E) -> Option<Value> + Send + Sync>,
    _marker: PhantomData<fn(&E, &S)>,
}

impl<E, S> KeyBindingsPlugin<E, S> {
    /// Wrap a binding function as a plugin.
    pub fn new<F>(bind: F) -> Self
    where
        F: Fn(&E) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            bind: Arc::new(bind),
            _marker: PhantomData,
        }
    }
}

impl<E: HookArgs, S: DocumentState> Plugin<E, S> for KeyBindingsPlugin<E, S> {
    fn name(&self) -> &str {
        "key-bindings"
    }

    fn manifest(&self) -> PluginManifest<E, S> {
        let bind = Arc::clone(&self.bind);
        PluginManifest::new().produce(names::KEY_BINDING_FN, move |event: &E, _ctx| bind(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manifest_declares_the_binding_hook_only() {
        let plugin: KeyBindingsPlugin<String, ()> =
            KeyBindingsPlugin::new(|key: &String| (key == "Tab").then(|| json!("indent")));
        let manifest = plugin.manifest();
        let declared: Vec<_> = manifest.hook_names().collect();
        assert_eq!(declared, vec![names::KEY_BINDING_FN]);
    }
}
