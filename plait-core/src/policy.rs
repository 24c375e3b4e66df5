//! Merge policies and the hook registry.
//!
//! The registry is the explicit policy table consulted during composition:
//! it maps known hook names to a [`HookSpec`] (kind + merge policy). Adding
//! a new specially-merged hook is a data change here, not a code branch in
//! the composer. Names the registry has never seen fall back to the lexical
//! rules of [`HookKind::classify`] with the default merge policy.

use crate::hook::{HookKind, names};
use std::collections::{BTreeMap, BTreeSet};

/// How a function hook's per-plugin results combine into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Return the first non-empty result, in plugin order. If every plugin
    /// declines, the composed call reports no value and the caller decides
    /// a default.
    #[default]
    FirstNonEmpty,
    /// Accumulate object results across all plugins in order: the
    /// `component` field — later non-empty overwrites earlier; the `props`
    /// bag is merged key-by-key with later plugins overriding; other
    /// top-level fields merge the same way. The accumulated descriptor is
    /// only returned if some plugin supplied a `component`.
    MergeByField,
    /// Append each non-empty string result to a single space-separated
    /// accumulator, in plugin order.
    ConcatSpaced,
}

/// Kind and merge policy for one hook name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookSpec {
    /// The kind the name is composed as.
    pub kind: HookKind,
    /// The merge policy, meaningful for [`HookKind::Function`] only.
    pub policy: MergePolicy,
}

impl HookSpec {
    /// Spec for an event hook.
    pub fn event() -> Self {
        Self {
            kind: HookKind::Event,
            policy: MergePolicy::FirstNonEmpty,
        }
    }

    /// Spec for a function hook with the given merge policy.
    pub fn function(policy: MergePolicy) -> Self {
        Self {
            kind: HookKind::Function,
            policy,
        }
    }
}

/// The per-hook-name policy table supplied at composition-root
/// construction.
///
/// Classification is exclusive per name: whatever the registry answers for
/// a name is the one kind that name is composed as for the whole cycle,
/// regardless of which bucket individual plugins declared it in.
#[derive(Debug, Clone)]
pub struct HookRegistry {
    entries: BTreeMap<String, HookSpec>,
    reserved: BTreeSet<String>,
}

impl HookRegistry {
    /// Create an empty registry. Only the host's change pipeline name is
    /// reserved; every other name is classified lexically.
    pub fn new() -> Self {
        let mut reserved = BTreeSet::new();
        reserved.insert(names::ON_CHANGE.to_string());
        Self {
            entries: BTreeMap::new(),
            reserved,
        }
    }

    /// Create a registry seeded with the standard editor hook vocabulary.
    ///
    /// `blockRendererFn` merges by field, `blockStyleFn` concatenates, and
    /// every other known function hook takes the first non-empty result.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for name in [
            names::ON_FOCUS,
            names::ON_BLUR,
            names::ON_UP_ARROW,
            names::ON_DOWN_ARROW,
            names::ON_TAB,
            names::ON_ESCAPE,
            names::HANDLE_KEY_COMMAND,
            names::HANDLE_BEFORE_INPUT,
            names::HANDLE_PASTED_TEXT,
            names::HANDLE_RETURN,
            names::HANDLE_DROP,
        ] {
            registry.register(name, HookSpec::event());
        }
        registry.register(
            names::BLOCK_RENDERER_FN,
            HookSpec::function(MergePolicy::MergeByField),
        );
        registry.register(
            names::BLOCK_STYLE_FN,
            HookSpec::function(MergePolicy::ConcatSpaced),
        );
        registry.register(
            names::KEY_BINDING_FN,
            HookSpec::function(MergePolicy::FirstNonEmpty),
        );
        registry
    }

    /// Register (or overwrite) the spec for a hook name.
    pub fn register(&mut self, name: impl Into<String>, spec: HookSpec) {
        self.entries.insert(name.into(), spec);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, spec: HookSpec) -> Self {
        self.register(name, spec);
        self
    }

    /// Reserve a name so it never enters the composed table.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Whether a name is reserved.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// The spec for a name: the registered entry, or the lexical
    /// classification with the default merge policy.
    pub fn spec(&self, name: &str) -> HookSpec {
        self.entries.get(name).copied().unwrap_or(HookSpec {
            kind: HookKind::classify(name),
            policy: MergePolicy::default(),
        })
    }

    /// The kind a name is composed as.
    pub fn kind(&self, name: &str) -> HookKind {
        self.spec(name).kind
    }

    /// The merge policy for a function hook name.
    pub fn policy(&self, name: &str) -> MergePolicy {
        self.spec(name).policy
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
