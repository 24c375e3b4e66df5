//! The composed hook table seam.
//!
//! The engine crate builds the concrete table; this trait is what a plugin
//! sees when it calls back into composed hooks through the
//! [`HostContext`](crate::HostContext). Keeping the trait here lets plugin
//! authors depend on `plait-core` alone.

use crate::context::HostContext;
use crate::error::PlaitError;
use crate::hook::{HookArgs, HookKind, HookOutcome};
use crate::state::DocumentState;
use serde_json::Value;

/// One cycle's composed hook table: a read-only mapping from hook name to
/// one composed callable per name. Rebuilt every cycle, never mutated in
/// place.
pub trait HookTable<E: HookArgs, S: DocumentState>: Send + Sync {
    /// The kind a name is composed as, or `None` if the table has no such
    /// hook.
    fn kind_of(&self, name: &str) -> Option<HookKind>;

    /// Dispatch an event through the composed chain for `name`.
    ///
    /// Iterates contributing plugins in plugin order; the first to report
    /// [`HookOutcome::Handled`] short-circuits the chain for this call.
    fn handle_event(
        &self,
        name: &str,
        event: &E,
        ctx: &HostContext<E, S>,
    ) -> Result<HookOutcome, PlaitError>;

    /// Invoke the composed function hook for `name` under its merge policy.
    ///
    /// `Ok(None)` means no plugin produced a value — a first-class outcome
    /// the caller handles, typically by falling back to built-in behavior.
    fn run_fn(
        &self,
        name: &str,
        event: &E,
        ctx: &HostContext<E, S>,
    ) -> Result<Option<Value>, PlaitError>;
}
