//! Function-hook composition: policy-driven value merging.

use plait_core::{
    BoxError, COMPONENT_FIELD, DocumentState, FnHookFn, HookArgs, HostContext, MergePolicy,
    PROPS_FIELD,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// One composed function hook: every contributing plugin's implementation,
/// in plugin order, merged under the hook's policy.
pub struct ComposedFnHook<E: HookArgs, S: DocumentState> {
    name: String,
    policy: MergePolicy,
    chain: Vec<Arc<FnHookFn<E, S>>>,
}

impl<E: HookArgs, S: DocumentState> ComposedFnHook<E, S> {
    pub(crate) fn new(
        name: impl Into<String>,
        policy: MergePolicy,
        chain: Vec<Arc<FnHookFn<E, S>>>,
    ) -> Self {
        Self {
            name: name.into(),
            policy,
            chain,
        }
    }

    /// The hook name this chain is composed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The merge policy in effect.
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Number of contributing plugins.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether no plugin contributes.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Invoke the chain and merge results under the policy.
    ///
    /// `Ok(None)` means no plugin produced a value; the caller decides a
    /// default. Errors propagate from the point of invocation.
    pub fn invoke(&self, event: &E, ctx: &HostContext<E, S>) -> Result<Option<Value>, BoxError> {
        match self.policy {
            MergePolicy::FirstNonEmpty => self.first_non_empty(event, ctx),
            MergePolicy::MergeByField => self.merge_by_field(event, ctx),
            MergePolicy::ConcatSpaced => self.concat_spaced(event, ctx),
        }
    }

    fn first_non_empty(&self, event: &E, ctx: &HostContext<E, S>) -> Result<Option<Value>, BoxError> {
        for hook in &self.chain {
            if let Some(value) = hook(event, ctx)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Accumulates object results field-by-field: later plugins override on
    /// top-level collisions, except the property bag, which merges
    /// key-by-key one level deep. A result only counts once some plugin has
    /// named the component. Non-object results are skipped (authoring
    /// defect: the policy is defined over descriptors).
    fn merge_by_field(&self, event: &E, ctx: &HostContext<E, S>) -> Result<Option<Value>, BoxError> {
        let mut acc: Map<String, Value> = Map::new();
        let mut props: Map<String, Value> = Map::new();
        for hook in &self.chain {
            let Some(value) = hook(event, ctx)? else {
                continue;
            };
            let Value::Object(fields) = value else {
                continue;
            };
            for (name, value) in fields {
                if name == PROPS_FIELD {
                    if let Value::Object(bag) = value {
                        props.extend(bag);
                    }
                } else if name == COMPONENT_FIELD && value.is_null() {
                    // Only a non-empty identity overwrites an earlier one.
                } else {
                    acc.insert(name, value);
                }
            }
        }
        if !acc.contains_key(COMPONENT_FIELD) {
            return Ok(None);
        }
        acc.insert(PROPS_FIELD.to_string(), Value::Object(props));
        Ok(Some(Value::Object(acc)))
    }

    /// Appends each non-empty string result to a space-separated
    /// accumulator. Non-string and empty-string results are skipped.
    fn concat_spaced(&self, event: &E, ctx: &HostContext<E, S>) -> Result<Option<Value>, BoxError> {
        let mut acc: Option<String> = None;
        for hook in &self.chain {
            let Some(value) = hook(event, ctx)? else {
                continue;
            };
            let Value::String(part) = value else {
                continue;
            };
            if part.is_empty() {
                continue;
            }
            acc = Some(match acc {
                Some(joined) => joined + " " + &part,
                None => part,
            });
        }
        Ok(acc.map(Value::String))
    }
}
