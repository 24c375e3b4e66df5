//! Static plugin contributions: decorators, style maps, accessibility
//! descriptors, and the block-descriptor convenience type.
//!
//! These are the passthrough attributes of a plugin — values, not
//! callables. Each carries its own merge rule, applied by the engine's
//! resolvers in plugin order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field under which a block descriptor names its component.
pub const COMPONENT_FIELD: &str = "component";
/// Field under which a block descriptor carries its property bag.
pub const PROPS_FIELD: &str = "props";

/// The escalated value of the sticky accessibility flags.
pub const ARIA_TRUE: &str = "true";

/// An opaque decorator descriptor.
///
/// The engine only guarantees deterministic ordering of the resolved list;
/// interpretation (and conflict resolution between decorators matching the
/// same content) belongs to the external decoration subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decorator {
    /// Identifies the decoration strategy.
    pub name: String,
    /// Strategy-specific configuration, opaque to the engine.
    #[serde(default)]
    pub config: Value,
}

impl Decorator {
    /// Create a decorator with no configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Value::Null,
        }
    }

    /// Attach configuration.
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }
}

/// A style map: named styles to opaque style definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, Value>);

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a style definition.
    pub fn set(&mut self, name: impl Into<String>, style: Value) {
        self.0.insert(name.into(), style);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, style: Value) -> Self {
        self.set(name, style);
        self
    }

    /// Look up a style definition.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no styles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge a later source into this map; its entries override ours
    /// key-by-key.
    pub fn merge_from(&mut self, later: &StyleMap) {
        for (name, style) in &later.0 {
            self.0.insert(name.clone(), style.clone());
        }
    }
}

impl FromIterator<(String, Value)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A small fixed-shape accessibility descriptor.
///
/// The two popup-related flags are tri-state (unset / `"true"` / other) and
/// merge with a sticky escalation rule; everything else is a plain
/// later-overrides-earlier bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityProps {
    /// Whether the host popup claim is set (`"true"` once any plugin
    /// escalates it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_has_popup: Option<String>,
    /// Whether the host is claimed expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_expanded: Option<String>,
    /// Generic fields, later plugin overrides earlier.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AccessibilityProps {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style popup flag.
    pub fn has_popup(mut self, value: impl Into<String>) -> Self {
        self.aria_has_popup = Some(value.into());
        self
    }

    /// Builder-style expanded flag.
    pub fn expanded(mut self, value: impl Into<String>) -> Self {
        self.aria_expanded = Some(value.into());
        self
    }

    /// Builder-style generic field.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Merge a later plugin's descriptor into this one.
    ///
    /// Generic fields: later overrides earlier. The two popup flags: once
    /// an earlier plugin has set the flag, a later plugin can only escalate
    /// it to `"true"`, never erase or downgrade it. Omission leaves the
    /// earlier value in place; re-setting `"true"` is idempotent.
    pub fn merge_from(&mut self, later: &AccessibilityProps) {
        for (name, value) in &later.extra {
            self.extra.insert(name.clone(), value.clone());
        }
        Self::escalate(&mut self.aria_has_popup, &later.aria_has_popup);
        Self::escalate(&mut self.aria_expanded, &later.aria_expanded);
    }

    fn escalate(current: &mut Option<String>, later: &Option<String>) {
        match current {
            None => *current = later.clone(),
            Some(_) => {
                if later.as_deref() == Some(ARIA_TRUE) {
                    *current = Some(ARIA_TRUE.to_string());
                }
            }
        }
    }
}

/// A structural block descriptor: a component identity plus a property bag.
///
/// Convenience shape for the `blockRendererFn` hook so plugin authors don't
/// hand-build JSON objects. A descriptor without a component is a valid
/// contribution — it donates props to whichever plugin does name the
/// component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// The component identity, if this plugin claims the render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Properties handed to the component, merged key-by-key across
    /// plugins.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    /// Any other top-level fields.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl BlockDescriptor {
    /// Create a descriptor claiming a component.
    pub fn component(name: impl Into<String>) -> Self {
        Self {
            component: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a descriptor contributing props only.
    pub fn props_only() -> Self {
        Self::default()
    }

    /// Builder-style property.
    pub fn prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    /// Builder-style top-level field.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.rest.insert(name.into(), value);
        self
    }
}

impl crate::hook::IntoHookValue for BlockDescriptor {
    fn into_hook_value(self) -> Result<Option<Value>, crate::error::BoxError> {
        Ok(Some(serde_json::to_value(self)?))
    }
}
