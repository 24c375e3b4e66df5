//! Testing utilities for Plait.
//!
//! - [`CallLog`]: a shared, ordered record of hook invocations
//! - [`RecordingPlugin`]: a plugin that logs every invocation and returns a
//!   fixed outcome, for verifying chain order and short-circuiting
//! - [`InitCounter`]: counts `initialize` calls, for verifying the
//!   once-per-identity contract

use plait_core::{
    BoxError, DocumentState, HookArgs, HookOutcome, HostContext, Plugin, PluginManifest,
};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A shared, ordered log of `plugin:hook` invocation entries.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let p1 = RecordingPlugin::new("p1", log.clone()).handles(names::ON_TAB);
/// // ... dispatch ...
/// assert_eq!(log.entries(), vec!["p1:onTab"]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// Snapshot the entries in invocation order.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded invocations.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A plugin that records every event-hook invocation as `label:hook` and
/// returns a fixed outcome.
pub struct RecordingPlugin<E: HookArgs, S: DocumentState> {
    label: String,
    log: CallLog,
    outcome: HookOutcome,
    hooks: Vec<String>,
    _marker: PhantomData<fn(&E, &S)>,
}

impl<E: HookArgs, S: DocumentState> RecordingPlugin<E, S> {
    /// Create a recording plugin that declines every event.
    pub fn new(label: impl Into<String>, log: CallLog) -> Self {
        Self {
            label: label.into(),
            log,
            outcome: HookOutcome::NotHandled,
            hooks: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Declare an event hook this plugin implements. May be called multiple
    /// times.
    pub fn handles(mut self, hook: impl Into<String>) -> Self {
        self.hooks.push(hook.into());
        self
    }

    /// Fix the outcome every hook returns (default: `NotHandled`).
    pub fn with_outcome(mut self, outcome: HookOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

impl<E: HookArgs, S: DocumentState> Plugin<E, S> for RecordingPlugin<E, S> {
    fn name(&self) -> &str {
        &self.label
    }

    fn manifest(&self) -> PluginManifest<E, S> {
        let mut manifest = PluginManifest::new();
        for hook in &self.hooks {
            let log = self.log.clone();
            let entry = format!("{}:{}", self.label, hook);
            let outcome = self.outcome;
            manifest = manifest.on(hook.clone(), move |_event: &E, _ctx| {
                log.push(entry.clone());
                outcome
            });
        }
        manifest
    }
}

/// A plugin that counts how many times `initialize` runs. Its manifest is
/// empty; an optional failure message makes `initialize` error instead.
pub struct InitCounter<E: HookArgs, S: DocumentState> {
    count: Arc<AtomicUsize>,
    fail_with: Option<String>,
    _marker: PhantomData<fn(&E, &S)>,
}

impl<E: HookArgs, S: DocumentState> InitCounter<E, S> {
    /// Create a counter plugin sharing the given counter.
    pub fn new(count: Arc<AtomicUsize>) -> Self {
        Self {
            count,
            fail_with: None,
            _marker: PhantomData,
        }
    }

    /// Make `initialize` fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }
}

impl<E: HookArgs, S: DocumentState> Plugin<E, S> for InitCounter<E, S> {
    fn name(&self) -> &str {
        "init-counter"
    }

    fn manifest(&self) -> PluginManifest<E, S> {
        PluginManifest::new()
    }

    fn initialize(&self, _host: &HostContext<E, S>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}
