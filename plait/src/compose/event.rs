//! Event-hook composition: the short-circuiting chain.

use plait_core::{BoxError, DocumentState, EventHookFn, HookArgs, HookOutcome, HostContext};
use std::sync::Arc;

/// One composed event hook: every contributing plugin's implementation, in
/// plugin order.
///
/// This realizes a priority chain — earlier plugins may consume an event
/// before later ones see it. Short-circuiting applies per call only; the
/// next call starts the chain fresh.
pub struct ComposedEventHook<E: HookArgs, S: DocumentState> {
    name: String,
    chain: Vec<Arc<EventHookFn<E, S>>>,
}

impl<E: HookArgs, S: DocumentState> ComposedEventHook<E, S> {
    pub(crate) fn new(name: impl Into<String>, chain: Vec<Arc<EventHookFn<E, S>>>) -> Self {
        Self {
            name: name.into(),
            chain,
        }
    }

    /// The hook name this chain is composed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of contributing plugins.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether no plugin contributes.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Dispatch one event through the chain.
    ///
    /// Invokes implementations in plugin order with the shared context as
    /// the trailing argument. The first `Handled` stops iteration and the
    /// composed call reports `Handled`; otherwise `NotHandled` after all
    /// have run. Errors propagate immediately. Side effects performed
    /// through the context before a `NotHandled` return are kept — later
    /// plugins in the same chain observe them (the context reads live
    /// state, not a snapshot).
    pub fn invoke(&self, event: &E, ctx: &HostContext<E, S>) -> Result<HookOutcome, BoxError> {
        for hook in &self.chain {
            match hook(event, ctx)? {
                HookOutcome::Handled => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(hook = %self.name, "event handled, chain short-circuited");
                    return Ok(HookOutcome::Handled);
                }
                HookOutcome::NotHandled => continue,
            }
        }
        Ok(HookOutcome::NotHandled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Ctx = HostContext<(), String>;

    fn recording(
        order: &Arc<Mutex<Vec<usize>>>,
        id: usize,
        outcome: HookOutcome,
    ) -> Arc<EventHookFn<(), String>> {
        let order = Arc::clone(order);
        Arc::new(move |_, _| {
            order.lock().unwrap().push(id);
            Ok(outcome)
        })
    }

    #[test]
    fn first_handled_short_circuits() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let hook = ComposedEventHook::new(
            "onTab",
            vec![
                recording(&order, 1, HookOutcome::NotHandled),
                recording(&order, 2, HookOutcome::Handled),
                recording(&order, 3, HookOutcome::Handled),
            ],
        );
        let outcome = hook.invoke(&(), &Ctx::new(String::new())).unwrap();
        assert_eq!(outcome, HookOutcome::Handled);
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn empty_chain_reports_not_handled() {
        let hook = ComposedEventHook::<(), String>::new("onTab", Vec::new());
        let outcome = hook.invoke(&(), &Ctx::new(String::new())).unwrap();
        assert_eq!(outcome, HookOutcome::NotHandled);
    }

    #[test]
    fn chain_restarts_per_call() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let hook = ComposedEventHook::new(
            "onTab",
            vec![
                recording(&order, 1, HookOutcome::NotHandled),
                recording(&order, 2, HookOutcome::NotHandled),
            ],
        );
        let ctx = Ctx::new(String::new());
        hook.invoke(&(), &ctx).unwrap();
        hook.invoke(&(), &ctx).unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn errors_propagate_mid_chain() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let failing: Arc<EventHookFn<(), String>> = Arc::new(|_, _| Err("boom".into()));
        let hook = ComposedEventHook::new(
            "onTab",
            vec![failing, recording(&order, 2, HookOutcome::Handled)],
        );
        assert!(hook.invoke(&(), &Ctx::new(String::new())).is_err());
        assert!(order.lock().unwrap().is_empty());
    }
}
