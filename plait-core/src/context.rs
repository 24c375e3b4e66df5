//! The shared host context handed to every hook invocation.
//!
//! One context exists per host. It is the only mutable shared resource
//! during a cycle: a cheaply cloneable handle over the current document
//! state, the read-only flag, and the most recently published composed
//! hook table. Plugins may read or mutate host-visible state through it at
//! any point in a chain; invocation is strictly sequential so no locking
//! discipline is imposed on plugins.
//!
//! Reads go through the shared cell at access time (live re-read): a later
//! plugin in the same dispatch observes state mutated by an earlier one.

use crate::hook::HookArgs;
use crate::plugin::ChangeFn;
use crate::state::DocumentState;
use crate::table::HookTable;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// The mutable facade plugins use to read and mutate shared host state.
///
/// Cloning yields another handle to the same shared interior; the context
/// itself is never copied per invocation.
pub struct HostContext<E: HookArgs, S: DocumentState> {
    inner: Arc<ContextInner<E, S>>,
}

struct ContextInner<E: HookArgs, S: DocumentState> {
    cell: RwLock<StateCell<S>>,
    filters: RwLock<Vec<Arc<ChangeFn<E, S>>>>,
    table: RwLock<Option<Arc<dyn HookTable<E, S>>>>,
    generation: AtomicU64,
}

struct StateCell<S> {
    state: S,
    read_only: bool,
}

impl<E: HookArgs, S: DocumentState> HostContext<E, S> {
    /// Create a context owning the given initial state.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cell: RwLock::new(StateCell {
                    state: initial,
                    read_only: false,
                }),
                filters: RwLock::new(Vec::new()),
                table: RwLock::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Read the current document state.
    pub fn state(&self) -> S {
        self.inner
            .cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Replace the document state.
    ///
    /// The replacement is threaded through every plugin's change filter in
    /// plugin order before it is stored. Ignored while the host is
    /// read-only. Marks the current composition stale.
    pub fn set_state(&self, next: S) {
        if self.is_read_only() {
            return;
        }
        // Filters run without the cell lock held so they can read state.
        let filters: Vec<Arc<ChangeFn<E, S>>> = self
            .inner
            .filters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut state = next;
        for filter in &filters {
            state = filter(state, self);
        }
        self.inner
            .cell
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .state = state;
        self.bump();
    }

    /// Whether the host is currently read-only.
    pub fn is_read_only(&self) -> bool {
        self.inner
            .cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .read_only
    }

    /// Toggle the read-only flag. A no-op if the flag already has the given
    /// value.
    pub fn set_read_only(&self, read_only: bool) {
        let mut cell = self
            .inner
            .cell
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if cell.read_only != read_only {
            cell.read_only = read_only;
            drop(cell);
            self.bump();
        }
    }

    /// The most recently published composed hook table, if a cycle has run.
    ///
    /// This is how a plugin calls back into composed hooks.
    pub fn hooks(&self) -> Option<Arc<dyn HookTable<E, S>>> {
        self.inner
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Monotonic change counter; bumped by every state replacement and
    /// read-only toggle. The composition root compares this against the
    /// generation it last composed at to detect staleness.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Install the change-filter chain for the current cycle.
    ///
    /// Called by the composition root; filters run in the order given.
    pub fn install_filters(&self, filters: Vec<Arc<ChangeFn<E, S>>>) {
        *self
            .inner
            .filters
            .write()
            .unwrap_or_else(PoisonError::into_inner) = filters;
    }

    /// Atomically publish a freshly composed hook table.
    ///
    /// Called by the composition root at the end of a cycle; the swap is a
    /// single store, so a consumer observes either the old table or the new
    /// one, never a partial composition.
    pub fn publish(&self, table: Arc<dyn HookTable<E, S>>) {
        *self
            .inner
            .table
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(table);
    }

    fn bump(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl<E: HookArgs, S: DocumentState> Clone for HostContext<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ctx = HostContext<(), String>;

    #[test]
    fn set_state_replaces_and_bumps_generation() {
        let ctx = Ctx::new("a".to_string());
        let before = ctx.generation();
        ctx.set_state("b".to_string());
        assert_eq!(ctx.state(), "b");
        assert!(ctx.generation() > before);
    }

    #[test]
    fn set_state_is_ignored_while_read_only() {
        let ctx = Ctx::new("a".to_string());
        ctx.set_read_only(true);
        let generation = ctx.generation();
        ctx.set_state("b".to_string());
        assert_eq!(ctx.state(), "a");
        assert_eq!(ctx.generation(), generation);
    }

    #[test]
    fn redundant_read_only_toggle_does_not_bump() {
        let ctx = Ctx::new("a".to_string());
        ctx.set_read_only(true);
        let generation = ctx.generation();
        ctx.set_read_only(true);
        assert_eq!(ctx.generation(), generation);
    }

    #[test]
    fn filters_run_in_install_order() {
        let ctx = Ctx::new(String::new());
        let first: Arc<ChangeFn<(), String>> = Arc::new(|s: String, _: &Ctx| s + "|first");
        let second: Arc<ChangeFn<(), String>> = Arc::new(|s: String, _: &Ctx| s + "|second");
        ctx.install_filters(vec![first, second]);
        ctx.set_state("base".to_string());
        assert_eq!(ctx.state(), "base|first|second");
    }

    #[test]
    fn clones_share_the_interior() {
        let ctx = Ctx::new("a".to_string());
        let other = ctx.clone();
        other.set_state("b".to_string());
        assert_eq!(ctx.state(), "b");
    }
}
